#![forbid(unsafe_code)]

//! Damped harmonic oscillator over arbitrary `f64` values.
//!
//! Both multi-frame motions in the carousel — the settle of the strip offset
//! onto a page and the rotational swing of the cards — are driven by the
//! classical damped spring equation:
//!
//!   F = (-stiffness × (position - target) - damping × velocity) / mass
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength. Higher = faster response.
//! - **damping** (c): velocity drag. `c < 2√(k·m)` oscillates past the
//!   target before settling, which is exactly what the swing wants.
//! - **mass** (m): inertia. Kept at 1 by both presets.
//!
//! # Integration
//!
//! Semi-implicit Euler. [`Spring::advance`] accepts a `Duration` and
//! subdivides anything above 4 ms into smaller steps so high stiffness
//! stays numerically stable at uneven frame times.
//!
//! # Invariants
//!
//! 1. A spring at rest stays at rest until retargeted.
//! 2. `set_target()` preserves position and momentum — superseding a
//!    motion mid-flight never jumps the value.
//! 3. Stiffness and mass are clamped to positive minimums; damping to 0.
//! 4. Advancing is deterministic for a fixed sequence of `dt` values.
//!
//! # Failure Modes
//!
//! - Zero damping oscillates forever; the carousel presets never use it,
//!   but `is_at_rest()` may then never return true.
//! - Rest detection compares against fixed position/velocity thresholds;
//!   springs over very large magnitudes settle slightly earlier in
//!   relative terms.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum dt per integration step (4ms). Larger deltas are subdivided.
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring may come to rest.
const REST_THRESHOLD: f64 = 0.001;

/// Velocity magnitude below which the spring may come to rest.
const VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness and mass, preventing degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.001;

/// Spring coefficients, grouped so motions can be described by preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    /// Settle of the strip offset onto a page after release.
    pub const SETTLE: Self = Self {
        stiffness: 300.0,
        damping: 30.0,
        mass: 1.0,
    };

    /// Rotational swing smoothing; lighter damping for a pendulum decay.
    pub const SWING: Self = Self {
        stiffness: 300.0,
        damping: 20.0,
        mass: 1.0,
    };

    /// Clamp coefficients to physically meaningful values.
    #[must_use]
    fn sanitized(self) -> Self {
        Self {
            stiffness: self.stiffness.max(MIN_STIFFNESS),
            damping: self.damping.max(0.0),
            mass: self.mass.max(MIN_MASS),
        }
    }
}

/// A damped harmonic oscillator converging on a retargetable value.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `position` converging toward `target`.
    #[must_use]
    pub fn new(position: f64, target: f64, params: SpringParams) -> Self {
        Self {
            position,
            velocity: 0.0,
            target,
            params: params.sanitized(),
            at_rest: false,
        }
    }

    /// Start with an initial velocity, e.g. the gesture velocity at release.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity, in value units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The coefficients this spring runs with.
    #[inline]
    #[must_use]
    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target, waking the spring if the move is meaningful.
    ///
    /// Position and velocity carry over, so a settle animation superseded by
    /// a new target continues from its current motion.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (self.target - target).abs() > REST_THRESHOLD {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Advance the simulation by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let spring_force = -self.params.stiffness * displacement;
        let damping_force = -self.params.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / self.params.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
