#![forbid(unsafe_code)]

//! Property-based invariant tests for the carousel motion math.
//!
//! ## Invariants
//!
//! 1. Resolved pages are always even.
//! 2. Resolved pages never leave `[0, max_page]`.
//! 3. Target offsets equal the page's exact rest position.
//! 4. Snap resolution is deterministic.
//! 5. Metrics satisfy the stride/view-width formulas for any viewport.
//! 6. Metrics computation is idempotent (bit-identical on re-run).
//! 7. Swing angles stay inside [-12, +12] and the map is monotone.

use proptest::prelude::*;
use swaydeck_core::metrics::LayoutMetrics;
use swaydeck_core::snap;
use swaydeck_core::swing::{SWING_MAX_ANGLE, velocity_to_angle};

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_viewport() -> impl Strategy<Value = (f64, f64)> {
    (1.0f64..3000.0, 1.0f64..2000.0)
}

fn arb_release() -> impl Strategy<Value = (f64, f64)> {
    (-6000.0f64..1500.0, -4000.0f64..4000.0)
}

fn arb_card_count() -> impl Strategy<Value = usize> {
    0usize..16
}

// ── 1–3. Parity, bounds, target exactness ─────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn resolved_page_is_even_and_bounded(
        (w, h) in arb_viewport(),
        (offset, velocity) in arb_release(),
        card_count in arb_card_count(),
    ) {
        let metrics = LayoutMetrics::compute(w, h);
        let d = snap::resolve(offset, velocity, &metrics, card_count);
        prop_assert_eq!(d.page % 2, 0);
        prop_assert!(d.page <= snap::max_page(card_count));
        // Numeric equality: the degenerate-stride path answers 0.0 where
        // rest_offset(0) is -0.0.
        prop_assert_eq!(d.target_offset, metrics.rest_offset(d.page));
    }

    // ── 4. Determinism ────────────────────────────────────────────────────

    #[test]
    fn resolution_is_deterministic(
        (w, h) in arb_viewport(),
        (offset, velocity) in arb_release(),
        card_count in arb_card_count(),
    ) {
        let metrics = LayoutMetrics::compute(w, h);
        let a = snap::resolve(offset, velocity, &metrics, card_count);
        let b = snap::resolve(offset, velocity, &metrics, card_count);
        prop_assert_eq!(a, b);
    }

    // ── 5–6. Metrics formulas and idempotence ─────────────────────────────

    #[test]
    fn metrics_formulas_hold((w, h) in arb_viewport()) {
        let m = LayoutMetrics::compute(w, h);
        let span = m.card_width * 2.0 + m.overlap_gap + m.group_gap;
        prop_assert!((m.stride * 2.0 - span).abs() < 1e-9);
        prop_assert!((m.view_width - span).abs() < 1e-9);
    }

    #[test]
    fn metrics_are_idempotent((w, h) in arb_viewport()) {
        let a = LayoutMetrics::compute(w, h);
        let b = LayoutMetrics::compute(w, h);
        prop_assert_eq!(a.card_width.to_bits(), b.card_width.to_bits());
        prop_assert_eq!(a.overlap_gap.to_bits(), b.overlap_gap.to_bits());
        prop_assert_eq!(a.group_gap.to_bits(), b.group_gap.to_bits());
        prop_assert_eq!(a.stride.to_bits(), b.stride.to_bits());
        prop_assert_eq!(a.view_width.to_bits(), b.view_width.to_bits());
        prop_assert_eq!(a.is_mobile, b.is_mobile);
    }

    // ── 7. Swing mapping range and monotonicity ───────────────────────────

    #[test]
    fn swing_angle_is_bounded(v in -50_000.0f64..50_000.0) {
        let angle = velocity_to_angle(v);
        prop_assert!(angle <= SWING_MAX_ANGLE);
        prop_assert!(angle >= -SWING_MAX_ANGLE);
    }

    #[test]
    fn swing_map_is_monotone_non_increasing(
        a in -3_000.0f64..3_000.0,
        b in -3_000.0f64..3_000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(velocity_to_angle(hi) <= velocity_to_angle(lo) + 1e-12);
    }

    // ── Explicit pagination shares the same bounds ────────────────────────

    #[test]
    fn group_pagination_is_even_and_bounded(
        group in 0usize..32,
        card_count in arb_card_count(),
    ) {
        let page = snap::page_for_group(group, card_count);
        prop_assert_eq!(page % 2, 0);
        prop_assert!(page <= snap::max_page(card_count));
    }
}
