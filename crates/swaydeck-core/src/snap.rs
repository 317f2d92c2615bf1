#![forbid(unsafe_code)]

//! Drag-release snap resolution: position + velocity → target page.
//!
//! On release, the strip's stopping point is projected forward from the
//! gesture velocity, rounded to the nearest page index, forced to even
//! parity (pages advance in pairs), and clamped to the deck bounds. The
//! whole pipeline is a pure function; the caller owns the page state and
//! feeds the returned target to the settle animator.
//!
//! # Invariants
//!
//! 1. The resolved page is always even.
//! 2. `0 <= page <= max_page(card_count)`.
//! 3. `target_offset == -(page * stride)` exactly.
//! 4. [`resolve`] is deterministic: identical inputs yield identical
//!    decisions.
//!
//! # Failure Modes
//!
//! None surfaced. A non-positive or non-finite stride (conceivable only
//! from a degenerate viewport) resolves to page 0 rather than dividing by
//! zero. Decks of fewer than two cards clamp to the single page 0.
//!
//! Near an odd upper bound the post-clamp re-even step can snap one pair
//! further back than naive rounding would. That bias is the documented
//! rubber-band behavior at the end of the deck and is kept as-is.

use crate::metrics::LayoutMetrics;

/// Fraction of the release velocity extrapolated as extra travel distance.
///
/// Calibrated so a typical flick translates into roughly one extra page.
pub const PROJECTION_POWER: f64 = 0.2;

/// The outcome of a drag release: the page to settle on and its rest offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecision {
    /// Even page index, identifies the left card of the visible pair.
    pub page: usize,
    /// Exact rest position of the strip for `page`.
    pub target_offset: f64,
}

/// Highest reachable page index for a deck of `card_count` cards.
///
/// Note this is `card_count - 2` even when that is odd; the parity rules in
/// [`resolve`] bias odd bounds down to the lower even neighbor.
#[must_use]
pub fn max_page(card_count: usize) -> usize {
    card_count.saturating_sub(2)
}

/// Number of page groups (pairs) a deck paginates into, for indicator UI.
#[must_use]
pub fn page_group_count(card_count: usize) -> usize {
    card_count.div_ceil(2)
}

/// Page index for an explicit indicator selection, clamped and evened.
#[must_use]
pub fn page_for_group(group: usize, card_count: usize) -> usize {
    let mut page = (group * 2).min(max_page(card_count));
    if page % 2 != 0 {
        page -= 1;
    }
    page
}

/// Resolve the page the strip should settle on after a drag release.
///
/// `final_offset` is the strip offset at release, `release_velocity` the
/// gesture velocity in px/s (negative = leftward, toward higher pages).
#[must_use]
pub fn resolve(
    final_offset: f64,
    release_velocity: f64,
    metrics: &LayoutMetrics,
    card_count: usize,
) -> SnapDecision {
    let stride = metrics.stride;
    if !stride.is_finite() || stride <= f64::EPSILON {
        return SnapDecision {
            page: 0,
            target_offset: 0.0,
        };
    }

    // Project where the strip would coast to, then quantize to a page.
    let projected = final_offset + release_velocity * PROJECTION_POWER;
    let mut raw = (-projected / stride).round() as i64;

    // Pages advance in pairs: an odd landing rounds toward the direction
    // of motion.
    if raw.rem_euclid(2) != 0 {
        if release_velocity < 0.0 {
            raw += 1;
        } else {
            raw -= 1;
        }
    }

    let mut page = raw.clamp(0, max_page(card_count) as i64);

    // The clamp bound itself can be odd; bias down to its even neighbor.
    if page % 2 != 0 {
        page -= 1;
    }

    let page = page as usize;
    SnapDecision {
        page,
        target_offset: metrics.rest_offset(page),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
