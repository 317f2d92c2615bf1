#![forbid(unsafe_code)]

//! Velocity-driven swing rotation: live strip velocity → smoothed angle.
//!
//! Two stages. First a fixed linear mapping turns the offset velocity into a
//! raw angle: the domain [-1500, 1500] px/s maps onto [+12, -12] degrees
//! with the sign inverted, so a fast leftward drag swings the cards
//! clockwise. Second, the raw angle continuously retargets an underdamped
//! spring whose output is the shared [`SwingRotation`] every card composes
//! with its own static rotation — that spring is what produces the
//! pendulum overshoot-and-decay instead of a twitchy 1:1 response.
//!
//! [`SwingRotation`]: SwingPipeline::rotation
//!
//! # Invariants
//!
//! 1. `velocity_to_angle` is clamped: no velocity maps outside
//!    [-SWING_MAX_ANGLE, +SWING_MAX_ANGLE].
//! 2. `velocity_to_angle(0.0) == 0.0` and the map is monotonically
//!    non-increasing in velocity.
//! 3. With the tracked value stationary, the smoothed rotation decays to 0.
//!
//! # Failure Modes
//!
//! None surfaced. NaN velocities map to a level angle of 0.0.

use std::time::Duration;

use crate::spring::{Spring, SpringParams};
use crate::velocity::VelocityTracker;

/// Velocity magnitude (px/s) at which the swing angle saturates.
pub const SWING_VELOCITY_DOMAIN: f64 = 1_500.0;

/// Angle (degrees) at the saturation point.
pub const SWING_MAX_ANGLE: f64 = 12.0;

/// Map an offset velocity to a raw swing angle in degrees.
///
/// Linear over [-1500, 1500] px/s → [+12, -12] degrees, clamped at the
/// endpoints.
#[must_use]
pub fn velocity_to_angle(velocity: f64) -> f64 {
    if velocity.is_nan() {
        return 0.0;
    }
    let t = ((velocity + SWING_VELOCITY_DOMAIN) / (2.0 * SWING_VELOCITY_DOMAIN)).clamp(0.0, 1.0);
    SWING_MAX_ANGLE - t * 2.0 * SWING_MAX_ANGLE
}

/// The full velocity → rotation chain, stepped once per frame.
///
/// `observe` feeds the current strip offset, `advance` steps the smoothing
/// spring, `rotation` reads the shared swing value broadcast to every card.
#[derive(Debug, Clone)]
pub struct SwingPipeline {
    tracker: VelocityTracker,
    spring: Spring,
}

impl SwingPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: VelocityTracker::new(),
            spring: Spring::new(0.0, 0.0, SpringParams::SWING),
        }
    }

    /// Record this frame's strip offset and retarget the smoothing spring.
    pub fn observe(&mut self, offset: f64, elapsed_ms: f64) {
        self.tracker.sample(offset, elapsed_ms);
        self.spring.set_target(velocity_to_angle(self.tracker.velocity()));
    }

    /// Step the smoothing spring by one frame interval.
    pub fn advance(&mut self, dt: Duration) {
        self.spring.advance(dt);
    }

    /// The smoothed swing rotation, in degrees.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.spring.position()
    }

    /// Latest estimate of the strip velocity, in px/s.
    #[inline]
    #[must_use]
    pub fn offset_velocity(&self) -> f64 {
        self.tracker.velocity()
    }

    /// Whether the swing has fully decayed.
    #[must_use]
    pub fn is_level(&self) -> bool {
        self.spring.is_at_rest() && self.spring.target().abs() < f64::EPSILON
    }
}

impl Default for SwingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
