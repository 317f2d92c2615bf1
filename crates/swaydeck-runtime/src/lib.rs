#![forbid(unsafe_code)]

//! Frame-driven runtime for the Swaydeck carousel.
//!
//! # Role in Swaydeck
//! `swaydeck-runtime` is the stateful layer over the pure math in
//! `swaydeck-core`. It owns the carousel's mutable state — the strip
//! offset, the current page, the layout metrics — and exposes the gesture,
//! resize, and pagination entry points the host wires its input layer to.
//!
//! # Primary responsibilities
//! - **CarouselController**: the single owner of carousel state; no
//!   ambient globals.
//! - **LiveValue**: version-tracked scalars the renderer re-reads every
//!   frame (strip offset, swing rotation).
//! - **Animator**: the frame-stepped settle animation, supersedable by a
//!   later target.
//!
//! # Concurrency model
//! Single-threaded and cooperative. Gesture callbacks mutate state
//! synchronously; multi-frame motions (settle, swing) advance inside
//! [`CarouselController::tick`], which the host calls once per frame.
//! Nothing here locks, blocks, or spawns.

pub mod animator;
pub mod binding;
pub mod controller;

pub use animator::Animator;
pub use binding::{LiveValue, Subscription};
pub use controller::CarouselController;
