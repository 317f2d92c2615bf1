#![forbid(unsafe_code)]

//! End-to-end drag sessions against the full controller stack.
//!
//! Each test plays a realistic gesture script — pointer moves at 60 fps,
//! release with a velocity estimate, frames ticked until the strip settles —
//! and checks the externally observable contract: pagination state, rest
//! offsets, swing behavior, and the live-value versions the renderer keys
//! off.
//!
//! Organized into four modules:
//! 1. `session_flick` — momentum releases across the deck
//! 2. `session_resize` — viewport changes at rest and mid-gesture
//! 3. `session_takeover` — drags and taps superseding in-flight settles
//! 4. `session_bindings` — renderer-facing live value behavior

use std::time::Duration;

use swaydeck_core::card::CardDescriptor;
use swaydeck_core::snap;
use swaydeck_runtime::CarouselController;

const MS_16: Duration = Duration::from_millis(16);
const DESKTOP: (f64, f64) = (1280.0, 800.0);
const PHONE: (f64, f64) = (390.0, 844.0);

fn deck(count: usize) -> Vec<CardDescriptor> {
    (0..count)
        .map(|i| CardDescriptor {
            id: format!("card-{i}"),
            title: format!("Card {i}"),
            body: format!("Body copy for card {i}."),
            image: format!("cards/{i}.webp"),
            tag: "demo".into(),
            static_rotation: [-4.0, 3.0, -5.0, 5.0, -3.0, 4.0][i % 6],
        })
        .collect()
}

fn controller() -> CarouselController {
    CarouselController::new(deck(6), DESKTOP.0, DESKTOP.1)
}

/// Drag in `steps` equal moves of `step_px`, ticking a frame per move,
/// then release at `release_velocity`.
fn play_drag(c: &mut CarouselController, step_px: f64, steps: usize, release_velocity: f64) {
    c.drag_start();
    for _ in 0..steps {
        c.drag_move(step_px);
        c.tick(MS_16);
    }
    c.drag_end(release_velocity);
}

fn settle(c: &mut CarouselController) {
    for _ in 0..1_000 {
        c.tick(MS_16);
        if !c.is_settling() {
            return;
        }
    }
    panic!("settle did not converge within 1000 frames");
}

// =========================================================================
// 1. Momentum releases
// =========================================================================

mod session_flick {
    use super::*;

    #[test]
    fn flick_left_advances_a_pair_and_settles_exactly() {
        let mut c = controller();
        play_drag(&mut c, -30.0, 10, -1500.0);

        assert_eq!(c.page(), 2, "projection of -300 at -1500 px/s lands on page 2");
        settle(&mut c);
        assert!((c.offset().get() - c.metrics().rest_offset(2)).abs() < 0.01);
        assert_eq!(c.page_group(), 1);
    }

    #[test]
    fn successive_flicks_walk_the_deck_and_pin_at_the_end() {
        let mut c = controller();
        for expected in [2usize, 4, 4] {
            play_drag(&mut c, -30.0, 10, -1500.0);
            settle(&mut c);
            assert_eq!(c.page(), expected);
        }
        assert!((c.offset().get() - c.metrics().rest_offset(4)).abs() < 0.01);
    }

    #[test]
    fn flick_back_right_returns_home() {
        let mut c = controller();
        play_drag(&mut c, -30.0, 10, -1500.0);
        settle(&mut c);
        assert_eq!(c.page(), 2);

        play_drag(&mut c, 30.0, 10, 1500.0);
        settle(&mut c);
        assert_eq!(c.page(), 0);
        assert!(c.offset().get().abs() < 0.01);
    }

    #[test]
    fn weak_release_snaps_to_nearest_page() {
        let mut c = controller();
        // Barely moved, no momentum: stays on page 0.
        play_drag(&mut c, -5.0, 10, -40.0);
        assert_eq!(c.page(), 0);
        settle(&mut c);
        assert!(c.offset().get().abs() < 0.01);
    }

    #[test]
    fn swing_rises_during_the_drag_and_decays_after() {
        let mut c = controller();
        c.drag_start();
        for _ in 0..12 {
            c.drag_move(-40.0); // -2500 px/s, saturates the mapping
            c.tick(MS_16);
        }
        let mid_drag = c.swing_rotation().get();
        assert!(mid_drag > 2.0, "swing during a hard drag, got {mid_drag}");

        c.drag_end(-2500.0);
        settle(&mut c);
        for _ in 0..400 {
            c.tick(MS_16);
        }
        assert!(c.swing_rotation().get().abs() < 0.01);
    }

    #[test]
    fn every_reachable_page_is_even_and_bounded() {
        let mut c = controller();
        let scripts: &[(f64, usize, f64)] = &[
            (-50.0, 8, -2200.0),
            (-10.0, 3, -100.0),
            (35.0, 6, 1800.0),
            (-80.0, 12, -3000.0),
            (60.0, 4, 2500.0),
        ];
        for &(step, steps, velocity) in scripts {
            play_drag(&mut c, step, steps, velocity);
            settle(&mut c);
            assert_eq!(c.page() % 2, 0);
            assert!(c.page() <= snap::max_page(6));
        }
    }
}

// =========================================================================
// 2. Resize
// =========================================================================

mod session_resize {
    use super::*;

    #[test]
    fn resize_at_rest_keeps_the_page_and_realigns() {
        let mut c = controller();
        play_drag(&mut c, -30.0, 10, -1500.0);
        settle(&mut c);
        assert_eq!(c.page(), 2);

        c.on_resize(PHONE.0, PHONE.1);
        assert!(c.metrics().is_mobile);
        assert_eq!(c.page(), 2, "resize never repaginates");
        assert!((c.offset().get() - c.metrics().rest_offset(2)).abs() < 1e-9);

        // Idempotent: same viewport again is a no-op for the offset.
        let offset = c.offset().get();
        let version = c.offset().version();
        c.on_resize(PHONE.0, PHONE.1);
        assert_eq!(c.offset().get(), offset);
        assert_eq!(c.offset().version(), version);
    }

    #[test]
    fn mid_drag_resize_applies_at_release_with_new_metrics() {
        let mut c = controller();
        c.drag_start();
        for _ in 0..10 {
            c.drag_move(-30.0);
            c.tick(MS_16);
        }
        c.on_resize(PHONE.0, PHONE.1);
        assert!(!c.metrics().is_mobile, "still desktop while the gesture is live");

        c.drag_end(-1500.0);
        assert!(c.metrics().is_mobile);
        settle(&mut c);
        assert!((c.offset().get() - c.metrics().rest_offset(c.page())).abs() < 0.01);
    }
}

// =========================================================================
// 3. Takeover
// =========================================================================

mod session_takeover {
    use super::*;

    #[test]
    fn drag_start_freezes_a_settling_strip() {
        let mut c = controller();
        play_drag(&mut c, -30.0, 10, -1500.0);
        for _ in 0..3 {
            c.tick(MS_16);
        }
        assert!(c.is_settling());

        c.drag_start();
        let held = c.offset().get();
        for _ in 0..10 {
            c.tick(MS_16);
        }
        assert_eq!(c.offset().get(), held);
    }

    #[test]
    fn indicator_tap_supersedes_a_settle() {
        let mut c = controller();
        play_drag(&mut c, -30.0, 10, -1500.0);
        for _ in 0..3 {
            c.tick(MS_16);
        }
        c.go_to_page(0);
        assert_eq!(c.page(), 0);
        settle(&mut c);
        assert!(c.offset().get().abs() < 0.01);
    }

    #[test]
    fn abandoned_settle_still_reaches_the_latest_target() {
        let mut c = controller();
        c.go_to_page(1);
        c.tick(MS_16);
        c.go_to_page(2);
        c.tick(MS_16);
        c.go_to_page(0);
        settle(&mut c);
        assert_eq!(c.page(), 0);
        assert!(c.offset().get().abs() < 0.01);
    }
}

// =========================================================================
// 4. Renderer-facing bindings
// =========================================================================

mod session_bindings {
    use super::*;

    #[test]
    fn offset_handle_tracks_across_clones() {
        let mut c = controller();
        let offset = c.offset();
        c.drag_start();
        c.drag_move(-120.0);
        assert!((offset.get() - -120.0).abs() < 1e-9);
    }

    #[test]
    fn versions_only_move_when_values_do() {
        let mut c = controller();
        let offset = c.offset();
        let swing = c.swing_rotation();
        let (ov, sv) = (offset.version(), swing.version());

        // At rest, ticking changes nothing.
        for _ in 0..5 {
            c.tick(MS_16);
        }
        assert_eq!(offset.version(), ov);
        assert_eq!(swing.version(), sv);

        c.drag_start();
        c.drag_move(-50.0);
        assert!(offset.version() > ov);
    }

    #[test]
    fn card_rotations_share_one_swing_value() {
        let mut c = controller();
        c.drag_start();
        for _ in 0..8 {
            c.drag_move(-35.0);
            c.tick(MS_16);
        }
        let swing = c.swing_rotation().get();
        for (i, card) in c.deck().to_vec().iter().enumerate() {
            let r = c.card_rotation(i, false).unwrap();
            assert!(
                (r - (card.static_rotation + swing)).abs() < 1e-9,
                "card {i} must compose the shared swing"
            );
        }
    }

    #[test]
    fn subscription_fires_on_settle_frames() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut c = controller();
        let frames = Rc::new(Cell::new(0u32));
        let frames_in_cb = Rc::clone(&frames);
        let _sub = c.offset().subscribe(move |_| frames_in_cb.set(frames_in_cb.get() + 1));

        c.go_to_page(1);
        for _ in 0..10 {
            c.tick(MS_16);
        }
        assert!(frames.get() >= 10, "each settle frame publishes a new offset");
    }
}
