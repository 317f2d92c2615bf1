#![forbid(unsafe_code)]

//! Card dataset types.
//!
//! Cards are supplied externally and never mutated by the engine; the only
//! field the motion layer reads is `static_rotation`, composed with the
//! shared swing rotation every frame.

use serde::{Deserialize, Serialize};

/// One card of the deck, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDescriptor {
    /// Unique, stable identity.
    pub id: String,
    pub title: String,
    pub body: String,
    /// Image reference (URL or asset key); opaque to the engine.
    pub image: String,
    /// Short category label shown on the card face.
    pub tag: String,
    /// Fixed decorative tilt in degrees, per card.
    pub static_rotation: f64,
}

impl CardDescriptor {
    /// The rotation this card renders with, given the shared swing value.
    ///
    /// A hovered card levels out to 0 so it can scale up square; everything
    /// else tilts by its own static rotation plus the strip-wide swing.
    #[must_use]
    pub fn displayed_rotation(&self, swing: f64, hovered: bool) -> f64 {
        if hovered {
            0.0
        } else {
            self.static_rotation + swing
        }
    }
}

/// Stacking bias within a pair: the left (even) card renders above the
/// right (odd) card so the overlap reads correctly.
#[must_use]
pub fn z_bias(index: usize) -> i32 {
    if index % 2 == 0 { 10 } else { 1 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
