#![forbid(unsafe_code)]

//! The carousel controller: single owner of all mutable carousel state.
//!
//! One explicit object holds `LayoutMetrics + offset + page` and exposes the
//! entry points the host wires up — `on_resize`, `drag_start` / `drag_move` /
//! `drag_end`, `go_to_page`, and the per-frame `tick`. The pure math lives in
//! `swaydeck-core`; this module only sequences it and publishes the results
//! through [`LiveValue`] handles the renderer re-reads every frame.
//!
//! # State machine
//!
//! - **Idle**: offset at a page rest position, swing level.
//! - **Dragging**: the gesture layer owns the offset via `drag_move`;
//!   exactly one drag is tracked at a time; a drag start while a settle is
//!   in flight takes the offset over immediately.
//! - **Settling**: the animator converges the offset onto the resolved
//!   page; superseded by a newer target or a drag start.
//!
//! # Invariants
//!
//! 1. `page()` is always even and within `[0, max_page]`.
//! 2. The page is updated synchronously on release, before the settle
//!    animation runs, so indicator UI reflects the destination immediately.
//! 3. A resize arriving mid-drag is deferred to `drag_end`; metrics are
//!    never swapped under a live gesture.
//! 4. Resize re-alignment is instant (no animation) and atomic with
//!    respect to the next frame's render.
//!
//! # Failure Modes
//!
//! None surfaced. Out-of-order gesture calls (`drag_move` without a start,
//! a second `drag_start`, `drag_end` while idle) are ignored. Decks of
//! fewer than two cards degrade to a single-page carousel.

use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use swaydeck_core::card::CardDescriptor;
use swaydeck_core::metrics::LayoutMetrics;
use swaydeck_core::snap;
use swaydeck_core::spring::SpringParams;
use swaydeck_core::swing::SwingPipeline;

use crate::animator::Animator;
use crate::binding::LiveValue;

/// Resistance applied to drag travel beyond the deck bounds.
pub const DRAG_ELASTIC: f64 = 0.2;

/// Frame interval assumed for the first self-clocked tick.
const NOMINAL_FRAME: Duration = Duration::from_millis(16);

/// Cap on self-clocked frame deltas, so a backgrounded host does not replay
/// a long pause as one giant physics step.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Frame-driven carousel state and gesture surface.
#[derive(Debug)]
pub struct CarouselController {
    deck: Vec<CardDescriptor>,
    metrics: LayoutMetrics,
    page: usize,
    offset: LiveValue,
    swing_rotation: LiveValue,
    swing: SwingPipeline,
    animator: Animator,
    dragging: bool,
    deferred_resize: Option<(f64, f64)>,
    last_tick: Option<Instant>,
}

impl CarouselController {
    /// Create a controller for `deck` at the given viewport size.
    ///
    /// Starts on page 0 with the strip at rest.
    #[must_use]
    pub fn new(deck: Vec<CardDescriptor>, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            metrics: LayoutMetrics::compute(viewport_width, viewport_height),
            deck,
            page: 0,
            offset: LiveValue::new(0.0),
            swing_rotation: LiveValue::new(0.0),
            swing: SwingPipeline::new(),
            animator: Animator::new(),
            dragging: false,
            deferred_resize: None,
            last_tick: None,
        }
    }

    // -- Read surface -------------------------------------------------------

    /// Current layout metrics.
    #[must_use]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// The cards, in strip order.
    #[must_use]
    pub fn deck(&self) -> &[CardDescriptor] {
        &self.deck
    }

    /// Current page index (always even; left card of the visible pair).
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page-group number for indicator display.
    #[must_use]
    pub fn page_group(&self) -> usize {
        self.page / 2
    }

    /// Total number of page groups.
    #[must_use]
    pub fn page_group_count(&self) -> usize {
        snap::page_group_count(self.deck.len())
    }

    /// Live handle to the strip offset; re-read it every frame.
    #[must_use]
    pub fn offset(&self) -> LiveValue {
        self.offset.clone()
    }

    /// Live handle to the shared swing rotation, in degrees.
    #[must_use]
    pub fn swing_rotation(&self) -> LiveValue {
        self.swing_rotation.clone()
    }

    /// Whether a drag gesture currently owns the offset.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a settle animation is in flight.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.animator.is_active()
    }

    /// Displayed rotation of card `index`: its static tilt plus the shared
    /// swing, or level when hovered. `None` for an out-of-range index.
    #[must_use]
    pub fn card_rotation(&self, index: usize, hovered: bool) -> Option<f64> {
        self.deck
            .get(index)
            .map(|card| card.displayed_rotation(self.swing_rotation.get(), hovered))
    }

    // -- Resize -------------------------------------------------------------

    /// Recompute metrics for a new viewport and re-align the strip.
    ///
    /// During a drag the resize is deferred to `drag_end` so metrics never
    /// change under the live gesture. Otherwise the offset snaps instantly
    /// (no animation) to the current page's rest position under the new
    /// metrics, superseding any in-flight settle.
    pub fn on_resize(&mut self, viewport_width: f64, viewport_height: f64) {
        if self.dragging {
            trace!(viewport_width, viewport_height, "resize deferred until drag end");
            self.deferred_resize = Some((viewport_width, viewport_height));
            return;
        }
        self.apply_viewport(viewport_width, viewport_height);
        self.animator.cancel();
        self.offset.set(self.metrics.rest_offset(self.page));
    }

    fn apply_viewport(&mut self, viewport_width: f64, viewport_height: f64) {
        self.metrics = LayoutMetrics::compute(viewport_width, viewport_height);
        trace!(
            stride = self.metrics.stride,
            is_mobile = self.metrics.is_mobile,
            "metrics recomputed"
        );
    }

    // -- Gestures -----------------------------------------------------------

    /// Begin a drag: the gesture takes the offset over, superseding any
    /// in-flight settle. A second start while dragging is ignored.
    pub fn drag_start(&mut self) {
        if self.dragging {
            return;
        }
        self.dragging = true;
        self.animator.cancel();
        debug!(offset = self.offset.get(), "drag start");
    }

    /// Move the strip by `delta` pixels (positive = rightward).
    ///
    /// Travel beyond the deck bounds is resisted: the out-of-bounds portion
    /// of the step is scaled by [`DRAG_ELASTIC`], movement back toward the
    /// range is 1:1.
    pub fn drag_move(&mut self, delta: f64) {
        if !self.dragging || !delta.is_finite() {
            return;
        }
        let lower = self.metrics.max_offset(self.deck.len());
        let next = rubber_band_step(self.offset.get(), delta, lower, 0.0);
        self.offset.set(next);
    }

    /// Release the drag with the gesture layer's velocity estimate (px/s,
    /// positive = rightward) and settle onto the resolved page.
    pub fn drag_end(&mut self, release_velocity: f64) {
        if !self.dragging {
            return;
        }
        self.dragging = false;

        if let Some((w, h)) = self.deferred_resize.take() {
            self.apply_viewport(w, h);
        }

        let release_velocity = if release_velocity.is_finite() {
            release_velocity
        } else {
            0.0
        };
        let decision = snap::resolve(
            self.offset.get(),
            release_velocity,
            &self.metrics,
            self.deck.len(),
        );
        debug!(
            release_velocity,
            page = decision.page,
            target = decision.target_offset,
            "drag end"
        );

        // Page first: indicators show the destination before it settles.
        self.page = decision.page;
        self.animator.animate_to(
            self.offset.get(),
            release_velocity,
            decision.target_offset,
            SpringParams::SETTLE,
        );
    }

    // -- Explicit pagination ------------------------------------------------

    /// Jump to a page group (indicator tap). Clamped to the deck; animated
    /// with the same settle spring as a drag release.
    pub fn go_to_page(&mut self, group: usize) {
        if self.dragging {
            return;
        }
        let page = snap::page_for_group(group, self.deck.len());
        debug!(group, page, "explicit pagination");
        self.page = page;
        self.animator.animate_to(
            self.offset.get(),
            self.swing.offset_velocity(),
            self.metrics.rest_offset(page),
            SpringParams::SETTLE,
        );
    }

    // -- Frame step ---------------------------------------------------------

    /// Advance one frame: step the settle animation, sample the offset into
    /// the swing pipeline, and publish the new swing rotation.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(position) = self.animator.tick(dt) {
            self.offset.set(position);
        }

        let offset = self.offset.get();
        self.swing.observe(offset, dt.as_secs_f64() * 1_000.0);
        self.swing.advance(dt);
        self.swing_rotation.set(self.swing.rotation());
    }

    /// Self-clocked variant of [`tick`](Self::tick) for hosts whose frame
    /// callbacks carry no delta: measures the interval since the previous
    /// call, capped at [`MAX_FRAME_DELTA`].
    pub fn tick_now(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_tick
            .map_or(NOMINAL_FRAME, |last| (now - last).min(MAX_FRAME_DELTA));
        self.last_tick = Some(now);
        self.tick(dt);
    }
}

/// One drag step against the bounds `[lower, upper]` with rubber-band
/// resistance: the in-bounds portion of `delta` applies 1:1, any portion
/// past a bound is scaled by [`DRAG_ELASTIC`]. Movement back toward the
/// range is never resisted.
fn rubber_band_step(current: f64, delta: f64, lower: f64, upper: f64) -> f64 {
    if delta > 0.0 {
        let free = (upper - current).clamp(0.0, delta);
        current + free + (delta - free) * DRAG_ELASTIC
    } else if delta < 0.0 {
        let free = (lower - current).clamp(delta, 0.0);
        current + free + (delta - free) * DRAG_ELASTIC
    } else {
        current
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
