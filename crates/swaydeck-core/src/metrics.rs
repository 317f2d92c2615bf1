#![forbid(unsafe_code)]

//! Responsive layout metrics: viewport dimensions → card geometry.
//!
//! [`LayoutMetrics`] is a pure function of the viewport. It is recomputed
//! wholesale on every resize and never partially mutated, so a metrics value
//! is always internally consistent.
//!
//! # Invariants
//!
//! 1. `stride * 2 == card_width * 2 + overlap_gap + group_gap` exactly.
//! 2. `view_width == card_width * 2 + overlap_gap + group_gap` exactly.
//! 3. `compute()` is deterministic: identical inputs yield bit-identical
//!    metrics.
//! 4. `rest_offset(page)` is `<= 0` for any in-bounds page when `stride > 0`.
//!
//! # Failure Modes
//!
//! None surfaced. Non-finite or sub-unit viewport dimensions are floored to
//! 1.0 before any division, so the arithmetic never produces NaN from a
//! degenerate window. Extremely small viewports can still yield tiny (or
//! negative) card widths; downstream consumers clamp where it matters.

use serde::{Deserialize, Serialize};

/// Viewports narrower than this are laid out with the mobile rules.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Card height is this multiple of card width.
pub const CARD_ASPECT_RATIO: f64 = 1.3;

/// Uniform shrink applied to the computed card width on every tier.
const CARD_SCALE: f64 = 0.95;

/// Desktop base card width before scaling.
const DESKTOP_CARD_WIDTH: f64 = 340.0;

/// Desktop spacing, both inside a pair and between pairs.
const DESKTOP_GAP: f64 = 40.0;

/// Horizontal padding reserved at the viewport edges on mobile.
const MOBILE_EDGE_PADDING: f64 = 32.0;

/// Mobile width divisor: ~1.95 cards fully visible, the third just entering.
const MOBILE_CARD_DIVISOR: f64 = 2.05;

/// Fraction of the viewport height a mobile card may occupy.
const MOBILE_HEIGHT_FRACTION: f64 = 0.70;

/// Overlap inside a pair on mobile, as a fraction of card width.
const MOBILE_OVERLAP_FRACTION: f64 = 0.05;

/// Gap between pairs on mobile.
const MOBILE_GROUP_GAP: f64 = 16.0;

/// Extra vertical room around the strip, mobile / desktop.
const STRIP_PADDING_MOBILE: f64 = 50.0;
const STRIP_PADDING_DESKTOP: f64 = 100.0;

/// Derived layout constants for one viewport size.
///
/// `overlap_gap` is the spacing after the first card of a pair (negative on
/// mobile, where pairs overlap); `group_gap` is the spacing after the second
/// card, separating consecutive pairs. `stride` is the offset distance
/// between two consecutive page rest positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub card_width: f64,
    pub overlap_gap: f64,
    pub group_gap: f64,
    pub stride: f64,
    pub view_width: f64,
    pub is_mobile: bool,
}

impl LayoutMetrics {
    /// Compute metrics for a viewport of `width` x `height` pixels.
    ///
    /// Non-finite or sub-unit dimensions are treated as 1.0.
    #[must_use]
    pub fn compute(width: f64, height: f64) -> Self {
        let width = sanitize_dimension(width);
        let height = sanitize_dimension(height);
        let is_mobile = width < MOBILE_BREAKPOINT;

        let (card_width, overlap_gap, group_gap) = if is_mobile {
            let width_constraint = (width - MOBILE_EDGE_PADDING) / MOBILE_CARD_DIVISOR;
            let height_constraint = (height * MOBILE_HEIGHT_FRACTION) / CARD_ASPECT_RATIO;
            let card_width = width_constraint.min(height_constraint) * CARD_SCALE;
            (
                card_width,
                -(card_width * MOBILE_OVERLAP_FRACTION),
                MOBILE_GROUP_GAP,
            )
        } else {
            (DESKTOP_CARD_WIDTH * CARD_SCALE, DESKTOP_GAP, DESKTOP_GAP)
        };

        // One page spans two cards: card + overlap + card + group gap.
        // The stride is half of that span so even page indices land on
        // pair boundaries.
        let pair_span = card_width * 2.0 + overlap_gap + group_gap;
        Self {
            card_width,
            overlap_gap,
            group_gap,
            stride: pair_span / 2.0,
            view_width: pair_span,
            is_mobile,
        }
    }

    /// Rest position of the strip for a given page index.
    #[must_use]
    pub fn rest_offset(&self, page: usize) -> f64 {
        -(page as f64 * self.stride)
    }

    /// Leftmost legal strip offset for a deck of `card_count` cards.
    ///
    /// The rightmost is always `0.0`. For decks of fewer than two cards this
    /// collapses to `0.0` (degenerate single-page carousel).
    #[must_use]
    pub fn max_offset(&self, card_count: usize) -> f64 {
        -(card_count.saturating_sub(2) as f64 * self.stride)
    }

    /// Spacing to the right of card `index` in a `card_count` deck.
    ///
    /// Cards alternate: the first card of a pair is followed by the (possibly
    /// negative) overlap gap, the second by the inter-pair group gap. The
    /// last card carries no trailing gap.
    #[must_use]
    pub fn gap_after(&self, index: usize, card_count: usize) -> f64 {
        if card_count == 0 || index + 1 >= card_count {
            0.0
        } else if index % 2 == 0 {
            self.overlap_gap
        } else {
            self.group_gap
        }
    }

    /// Height of the strip viewport: card height plus vertical breathing room.
    #[must_use]
    pub fn strip_height(&self) -> f64 {
        let padding = if self.is_mobile {
            STRIP_PADDING_MOBILE
        } else {
            STRIP_PADDING_DESKTOP
        };
        self.card_width * CARD_ASPECT_RATIO + padding
    }
}

/// Floor a viewport dimension to a safe positive value.
fn sanitize_dimension(dim: f64) -> f64 {
    if dim.is_finite() && dim >= 1.0 { dim } else { 1.0 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
