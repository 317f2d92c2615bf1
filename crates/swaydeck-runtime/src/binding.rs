#![forbid(unsafe_code)]

//! Live scalar bindings: shared `f64` values with change notification.
//!
//! The renderer does not poll the controller; it holds [`LiveValue`]
//! handles for the strip offset and the swing rotation and re-reads them
//! every frame. A handle is a cheap clone of shared, reference-counted
//! storage (`Rc<RefCell<..>>`, single-threaded by design), with a version
//! counter for dirty-checking and optional push notification.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing `set`.
//! 2. Setting a bitwise-equal value is a no-op: no version bump, no
//!    notification. (Bitwise, not `PartialEq`: NaN writes are observable
//!    and repeated NaN writes coalesce.)
//! 3. Subscribers are notified in registration order.
//! 4. Dropping a [`Subscription`] guard unsubscribes; dead entries are
//!    pruned lazily on the next notification.
//!
//! # Failure Modes
//!
//! - Calling `set` from inside a subscriber callback notifies re-entrantly
//!   through a fresh borrow; an endless set-inside-notify loop is the
//!   caller's bug, not guarded here.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc = Rc<dyn Fn(f64)>;
type CallbackWeak = Weak<dyn Fn(f64)>;

struct LiveValueInner {
    value: f64,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// A shared, version-tracked `f64` with change notification.
///
/// Cloning creates a new handle to the same inner state.
pub struct LiveValue {
    inner: Rc<RefCell<LiveValueInner>>,
}

impl Clone for LiveValue {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for LiveValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("LiveValue")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl LiveValue {
    /// Create a live value starting at `value` with version 0.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LiveValueInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    /// Write a new value, bumping the version and notifying subscribers
    /// unless it is bitwise-identical to the current one.
    pub fn set(&self, value: f64) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value.to_bits() == value.to_bits() {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify(value);
    }

    /// Current version, for render-loop dirty checking.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, dead entries included until the
    /// next prune.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Subscribe to value changes. Dropping the returned guard
    /// unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    fn notify(&self, value: f64) {
        // Collect live callbacks first so no borrow is held during calls.
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in callbacks {
            cb(value);
        }
    }
}

/// Guard for a [`LiveValue`] subscription; dropping it unsubscribes.
pub struct Subscription {
    _guard: CallbackRc,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
