#![forbid(unsafe_code)]

//! Instantaneous velocity estimation for a frame-sampled scalar.
//!
//! The swing pipeline needs the live rate of change of the strip offset,
//! independent of the one-shot velocity the gesture layer reports at
//! release. [`VelocityTracker`] differentiates successive per-frame samples:
//! feed it `(value, elapsed_ms)` once per frame and read the current
//! estimate in px/s.
//!
//! # Invariants
//!
//! 1. Before the second sample the estimate is 0.0.
//! 2. The elapsed interval is floored at 1 ms, so a burst of same-frame
//!    samples cannot blow the estimate up.
//! 3. A stationary value drives the estimate to exactly 0.0 on the next
//!    sample.
//!
//! # Failure Modes
//!
//! None surfaced. Non-finite samples are ignored and leave the previous
//! estimate in place.

/// Smallest elapsed interval considered for differentiation.
const MIN_ELAPSED_MS: f64 = 1.0;

/// Frame-to-frame differentiator for a scalar value.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityTracker {
    last_value: Option<f64>,
    velocity: f64,
}

impl VelocityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's sample: the current value and the time since the
    /// previous sample in milliseconds.
    pub fn sample(&mut self, value: f64, elapsed_ms: f64) {
        if !value.is_finite() || !elapsed_ms.is_finite() {
            return;
        }
        if let Some(prev) = self.last_value {
            let elapsed = elapsed_ms.max(MIN_ELAPSED_MS);
            self.velocity = (value - prev) / elapsed * 1_000.0;
        }
        self.last_value = Some(value);
    }

    /// Latest velocity estimate, in value units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Drop history, e.g. when a new gesture takes over the value.
    pub fn reset(&mut self) {
        self.last_value = None;
        self.velocity = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
