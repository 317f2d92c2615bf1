#![forbid(unsafe_code)]

//! Motion math for the Swaydeck card carousel.
//!
//! # Role in Swaydeck
//! `swaydeck-core` is the pure layer. It owns every numeric decision the
//! carousel makes — responsive layout metrics, drag-release snap projection,
//! velocity estimation, and the damped-spring physics behind both the settle
//! animation and the rotational swing — with no clocks, no interior
//! mutability, and no I/O.
//!
//! # Primary responsibilities
//! - **LayoutMetrics**: viewport dimensions → card size, gaps, snap stride.
//! - **snap**: drag-release position + velocity → target page and offset.
//! - **Spring**: damped harmonic oscillator over arbitrary `f64` values.
//! - **SwingPipeline**: live velocity → smoothed rotation angle.
//!
//! # How it fits in the system
//! The runtime (`swaydeck-runtime`) consumes these pure functions and drives
//! them frame by frame, binding the results to live values the renderer
//! reads. Everything in this crate is deterministic and total over its
//! numeric domain: malformed inputs (NaN viewports, out-of-range
//! velocities, decks with fewer than two cards) are silently corrected, not
//! reported.

pub mod card;
pub mod metrics;
pub mod snap;
pub mod spring;
pub mod swing;
pub mod velocity;

pub use card::CardDescriptor;
pub use metrics::LayoutMetrics;
pub use snap::SnapDecision;
pub use spring::{Spring, SpringParams};
pub use swing::SwingPipeline;
pub use velocity::VelocityTracker;
