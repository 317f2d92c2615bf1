#![forbid(unsafe_code)]

//! Frame-stepped settle animation driver.
//!
//! [`Animator`] owns the (at most one) in-flight spring converging the strip
//! offset onto a page rest position. Supersession is the whole protocol:
//! starting a new motion replaces or retargets the old one, so only the
//! latest target matters and no cancellation token exists. A drag takeover
//! calls [`Animator::cancel`] and the value goes back to direct writes.
//!
//! # Invariants
//!
//! 1. At most one motion is in flight.
//! 2. Superseding a motion with the same spring parameters retargets it in
//!    place — position and momentum carry over, the value never jumps.
//! 3. Once [`Animator::tick`] reports convergence, the animator is idle
//!    until the next `animate_to`.
//!
//! # Failure Modes
//!
//! None surfaced. A non-finite target is dropped by the underlying spring's
//! retarget guard; a fresh spring toward a non-finite target is refused
//! here and leaves the animator idle.

use std::time::Duration;

use swaydeck_core::spring::{Spring, SpringParams};

/// Drives one scalar toward the most recently requested target.
#[derive(Debug, Default)]
pub struct Animator {
    spring: Option<Spring>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or supersede) a motion from `current` toward `target`.
    ///
    /// `launch_velocity` seeds a fresh spring — typically the gesture
    /// velocity at release. If a motion with the same parameters is already
    /// in flight it is retargeted instead, keeping its own momentum.
    pub fn animate_to(
        &mut self,
        current: f64,
        launch_velocity: f64,
        target: f64,
        params: SpringParams,
    ) {
        if let Some(spring) = &mut self.spring
            && spring.params() == params
            && !spring.is_at_rest()
        {
            spring.set_target(target);
            return;
        }
        if !target.is_finite() {
            return;
        }
        self.spring = Some(Spring::new(current, target, params).with_velocity(launch_velocity));
    }

    /// Advance the in-flight motion by one frame interval.
    ///
    /// Returns the new position while a motion is live (including the final
    /// converged frame), `None` when idle.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        let spring = self.spring.as_mut()?;
        spring.advance(dt);
        let position = spring.position();
        if spring.is_at_rest() {
            self.spring = None;
        }
        Some(position)
    }

    /// Whether a motion is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.spring.is_some()
    }

    /// Velocity of the in-flight motion, 0.0 when idle.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.spring.as_ref().map_or(0.0, Spring::velocity)
    }

    /// Target of the in-flight motion, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.spring.as_ref().map(Spring::target)
    }

    /// Drop the in-flight motion; the value stays wherever it is.
    pub fn cancel(&mut self) {
        self.spring = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
