//! Navigation menu state machine.
//!
//! [`NavAnimator`] owns every piece of mutable menu state: the pointer, the
//! drag flags, the filters and the item layout. Browser callbacks only reach
//! that state through the transition methods below, and each method runs to
//! completion on the UI thread.
//!
//! Timers and animation frames are requested, not scheduled: methods return
//! a [`DragTimer`] or a `bool` "request a frame" flag and the host decides how
//! to honour them. A timer that fires after it was superseded carries a stale
//! token and is ignored.

use tracing::{debug, trace};

use crate::colour::Colour;
use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::filter::{HoverFilter, ScreenFilter};
use crate::layout::{self, NavItem, Rect};
use crate::pointer::{self, Point, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Maps a DOM `pointerType`. Unknown types are treated as touch so they
    /// never drive the menu without a drag.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            _ => Self::Touch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTimerKind {
    BeginDrag,
    EndDrag,
}

/// A delayed callback the host must schedule. Scheduling a new one replaces
/// whatever was pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTimer {
    pub token: u64,
    pub kind: DragTimerKind,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerUp {
    /// Item whose link should be activated.
    pub activate: Option<usize>,
    pub timer: DragTimer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Closed,
    Open,
    Dragging,
    /// Closed, but one last animation frame is still pending.
    Closing,
}

#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Last committed position in CSS pixels.
    pub pixel: Point,
    pub normalized: Point,
    /// Where the animation is heading, in CSS pixels.
    pub target: Point,
    pub dragging: bool,
    pub down: bool,
    pub animating: bool,
    saved_animating: bool,
}

/// Everything the renderer needs for one frame.
pub struct Scene<'a> {
    pub items: &'a mut [NavItem],
    pub screen: &'a mut ScreenFilter,
    pub container_x: f64,
    pub viewport: Viewport,
    pub mask: Rect,
    pub background: Colour,
    pub background_alpha: f32,
}

#[derive(Debug)]
pub struct NavAnimator {
    config: NavConfig,
    items: Vec<NavItem>,
    nav_width: f64,
    viewport: Viewport,
    pointer: PointerState,
    screen: ScreenFilter,
    container_x: f64,
    background: Colour,
    mask_padding: f64,
    mask: Rect,
    pointer_over: Option<usize>,
    frame_pending: bool,
    pending_timer: Option<DragTimer>,
    next_token: u64,
}

impl NavAnimator {
    pub fn new(config: NavConfig, mut items: Vec<NavItem>, viewport: Viewport) -> Self {
        for item in &mut items {
            item.hover = HoverFilter::new(config.time_step);
        }
        let nav_width = layout::layout_items(&mut items);
        let background = Colour::parse_hex(&config.background_colour).unwrap_or_else(|err| {
            debug!(%err, "falling back to default background");
            Colour::DEFAULT_BACKGROUND
        });
        let mask_padding = if config.mask_padding.is_nan() { 100.0 } else { config.mask_padding };
        let screen = ScreenFilter::new(config.resolution, viewport, config.time_step);
        debug!(items = items.len(), nav_width, "navigation laid out");

        Self {
            items,
            nav_width,
            viewport,
            pointer: PointerState::default(),
            screen,
            container_x: 0.0,
            background,
            mask_padding,
            mask: layout::mask_rect(viewport, mask_padding),
            pointer_over: None,
            frame_pending: false,
            pending_timer: None,
            next_token: 0,
            config,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn nav_width(&self) -> f64 {
        self.nav_width
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn screen_filter(&self) -> &ScreenFilter {
        &self.screen
    }

    pub fn container_x(&self) -> f64 {
        self.container_x
    }

    pub fn background(&self) -> Colour {
        self.background
    }

    pub fn mask(&self) -> Rect {
        self.mask
    }

    pub fn phase(&self) -> NavPhase {
        if self.pointer.dragging {
            NavPhase::Dragging
        } else if self.pointer.animating {
            NavPhase::Open
        } else if self.frame_pending {
            NavPhase::Closing
        } else {
            NavPhase::Closed
        }
    }

    pub fn scene(&mut self) -> Scene<'_> {
        Scene {
            items: &mut self.items,
            screen: &mut self.screen,
            container_x: self.container_x,
            viewport: self.viewport,
            mask: self.mask,
            background: self.background,
            background_alpha: self.config.background_alpha,
        }
    }

    /// Commits a pixel pointer position: scrolls the strip, normalizes the
    /// position and feeds it to the screen filter.
    pub fn set_pointer_px(&mut self, px: Point) -> NavResult<()> {
        let normalized = pointer::to_normalized(px, self.viewport);
        self.screen.set_pointer(&normalized)?;
        self.pointer.pixel = px;
        self.pointer.normalized = normalized;
        self.container_x = layout::container_offset(self.nav_width, px[0], self.viewport);
        Ok(())
    }

    /// Pixel position that centres item `idx` under the distortion.
    pub fn focus_position(&self, idx: usize) -> Point {
        if self.items.is_empty() {
            return self.viewport.centre();
        }
        layout::focus_position(&self.items, self.nav_width, idx, self.viewport)
    }

    /// `navOpen`. Returns true when the host must request an animation frame.
    pub fn open(&mut self) -> bool {
        // A drag in progress owns the pointer; the open takes effect on release.
        let arm = if self.pointer.dragging {
            self.pointer.saved_animating = true;
            false
        } else {
            self.set_animating(true)
        };
        let focus = self.focus_position(0);
        self.commit_or_log(focus);
        self.pointer.target = focus;
        let start = [self.config.open_start_x, self.viewport.height * 0.5];
        self.commit_or_log(start);
        debug!(?focus, ?start, arm, "nav open");
        arm
    }

    /// `navClose`. The animation loop ends after its current frame.
    pub fn close(&mut self) {
        self.pointer.animating = false;
        self.pointer.saved_animating = false;
        debug!("nav close");
    }

    /// One animation frame: move a fixed fraction of the way to the target.
    /// Returns true when another frame should be requested.
    pub fn step(&mut self) -> bool {
        self.frame_pending = false;
        let current = pointer::to_pixel(self.pointer.normalized, self.viewport);
        let target = self.pointer.target;
        let s = self.config.smoothing;
        let next = [
            current[0] + (target[0] - current[0]) * s,
            current[1] + (target[1] - current[1]) * s,
        ];
        trace!(?current, ?next, "nav step");
        self.commit_or_log(next);

        if self.pointer.animating {
            self.claim_frame()
        } else {
            false
        }
    }

    pub fn pointer_move(&mut self, pos: Point, kind: PointerKind) {
        if !(self.pointer.dragging || kind == PointerKind::Mouse) {
            return;
        }
        if self.pointer.animating {
            self.pointer.target = pos;
        } else {
            self.commit_or_log(pos);
        }
    }

    pub fn pointer_down(&mut self) -> DragTimer {
        self.pointer.down = true;
        self.schedule(DragTimerKind::BeginDrag)
    }

    /// `on_stage` is whether the release happened on the menu surface; only
    /// then can it activate an item.
    pub fn pointer_up(&mut self, pos: Point, on_stage: bool) -> PointerUp {
        let activate = if on_stage && !self.pointer.dragging {
            self.item_at(pos)
        } else {
            None
        };
        self.pointer.down = false;
        PointerUp {
            activate,
            timer: self.schedule(DragTimerKind::EndDrag),
        }
    }

    /// Host callback for a scheduled [`DragTimer`]. Returns true when the
    /// host must request an animation frame.
    pub fn drag_timer_fired(&mut self, token: u64) -> bool {
        let Some(timer) = self.pending_timer.filter(|t| t.token == token) else {
            trace!(token, "stale drag timer");
            return false;
        };
        self.pending_timer = None;

        match timer.kind {
            DragTimerKind::BeginDrag => {
                if self.pointer.down && !self.pointer.dragging {
                    self.pointer.saved_animating = self.pointer.animating;
                    self.pointer.animating = false;
                    self.pointer.dragging = true;
                    debug!("drag started");
                }
                false
            }
            DragTimerKind::EndDrag => {
                if !self.pointer.dragging {
                    return false;
                }
                self.pointer.dragging = false;
                let restore = std::mem::take(&mut self.pointer.saved_animating);
                debug!(restore, "drag ended");
                self.set_animating(restore)
            }
        }
    }

    pub fn pending_timer(&self) -> Option<DragTimer> {
        self.pending_timer
    }

    /// Keyboard focus on an item: highlight it and jump the pointer there.
    pub fn focus_item(&mut self, idx: usize) -> NavResult<()> {
        let focus = self.focus_position(idx);
        let item = self.items.get_mut(idx).ok_or(NavError::UnknownItem(idx))?;
        item.hovered = true;
        self.set_pointer_px(focus)
    }

    pub fn blur_item(&mut self, idx: usize) -> NavResult<()> {
        let item = self.items.get_mut(idx).ok_or(NavError::UnknownItem(idx))?;
        item.hovered = false;
        Ok(())
    }

    /// Pointer-over / pointer-out tracking. Returns true if the item under
    /// the pointer changed.
    pub fn hover_at(&mut self, pos: Option<Point>) -> bool {
        let over = pos.and_then(|p| self.item_at(p));
        if over == self.pointer_over {
            return false;
        }
        if let Some(item) = self.pointer_over.and_then(|i| self.items.get_mut(i)) {
            item.hovered = false;
        }
        if let Some(item) = over.and_then(|i| self.items.get_mut(i)) {
            item.hovered = true;
        }
        self.pointer_over = over;
        true
    }

    pub fn item_at(&self, pos: Point) -> Option<usize> {
        self.items
            .iter()
            .position(|item| layout::item_rect(item, self.container_x, self.viewport).contains(pos))
    }

    /// Window resize. Item layout is kept; only the surface-dependent state
    /// is re-derived.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.screen.on_resize(viewport);
        self.mask = layout::mask_rect(viewport, self.mask_padding);
    }

    pub fn set_background_colour(&mut self, value: &str) -> NavResult<()> {
        self.background = Colour::parse_hex(value)?;
        Ok(())
    }

    pub fn set_background_rgb(&mut self, rgb: u32) {
        self.background = Colour(rgb & 0xFF_FFFF);
    }

    pub fn set_mask_padding(&mut self, padding: f64) -> NavResult<()> {
        if padding.is_nan() {
            return Err(NavError::InvalidPadding(padding));
        }
        self.mask_padding = padding;
        self.mask = layout::mask_rect(self.viewport, padding);
        Ok(())
    }

    fn set_animating(&mut self, on: bool) -> bool {
        let was = self.pointer.animating;
        self.pointer.animating = on;
        !was && on && self.claim_frame()
    }

    fn claim_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    fn schedule(&mut self, kind: DragTimerKind) -> DragTimer {
        self.next_token += 1;
        let timer = DragTimer {
            token: self.next_token,
            kind,
            delay_ms: self.config.drag_delay_ms,
        };
        self.pending_timer = Some(timer);
        timer
    }

    fn commit_or_log(&mut self, px: Point) {
        if let Err(err) = self.set_pointer_px(px) {
            debug!(%err, "pointer rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { width: 1000.0, height: 800.0 };

    fn animator() -> NavAnimator {
        let items = vec![
            NavItem::new("Home", "/index.html", 300.0, 120.0),
            NavItem::new("Work", "/work.html", 300.0, 120.0),
        ];
        NavAnimator::new(NavConfig::default(), items, VP)
    }

    #[test]
    fn open_arms_loop_once_and_targets_first_item() {
        let mut nav = animator();
        assert_eq!(nav.phase(), NavPhase::Closed);
        assert!(nav.open());
        assert!(!nav.open(), "loop already running");
        assert_eq!(nav.phase(), NavPhase::Open);

        assert_eq!(nav.pointer().target, nav.focus_position(0));
        assert_eq!(nav.pointer().pixel, [3000.0, 400.0]);
    }

    #[test]
    fn step_moves_five_percent_of_remaining_distance() {
        let mut nav = animator();
        nav.open();
        nav.set_pointer_px([0.0, 400.0]).unwrap();
        nav.pointer_move([100.0, 400.0], PointerKind::Mouse);

        assert!(nav.step());
        assert!((nav.pointer().pixel[0] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_is_monotone_without_overshoot() {
        let mut nav = animator();
        nav.open();
        nav.set_pointer_px([0.0, 400.0]).unwrap();
        nav.pointer_move([100.0, 400.0], PointerKind::Mouse);

        let mut last = 0.0;
        for _ in 0..500 {
            nav.step();
            let x = nav.pointer().pixel[0];
            assert!(x >= last && x <= 100.0 + 1e-9, "x={x} last={last}");
            last = x;
        }
        assert!(last > 99.9);
    }

    #[test]
    fn close_lets_the_loop_run_out() {
        let mut nav = animator();
        nav.open();
        nav.close();
        assert_eq!(nav.phase(), NavPhase::Closing);
        assert!(!nav.step());
        assert_eq!(nav.phase(), NavPhase::Closed);
        assert!(nav.open(), "reopening re-arms the loop");
    }

    #[test]
    fn touch_move_before_grace_period_is_ignored() {
        let mut nav = animator();
        nav.open();
        let target = nav.pointer().target;

        let timer = nav.pointer_down();
        assert_eq!(timer.kind, DragTimerKind::BeginDrag);
        assert_eq!(timer.delay_ms, 100);
        nav.pointer_move([10.0, 10.0], PointerKind::Touch);
        assert_eq!(nav.pointer().target, target);

        nav.drag_timer_fired(timer.token);
        assert_eq!(nav.phase(), NavPhase::Dragging);
        assert!(!nav.pointer().animating);

        nav.pointer_move([250.0, 300.0], PointerKind::Touch);
        assert_eq!(nav.pointer().pixel, [250.0, 300.0]);
        assert_eq!(nav.pointer().target, target);
    }

    #[test]
    fn drag_end_restores_animation() {
        let mut nav = animator();
        nav.open();
        let down = nav.pointer_down();
        nav.drag_timer_fired(down.token);
        assert!(!nav.step(), "loop stops while dragging");

        let up = nav.pointer_up([0.0, 0.0], true);
        assert_eq!(up.activate, None, "release after a drag never clicks");
        assert_eq!(up.timer.kind, DragTimerKind::EndDrag);
        assert!(nav.drag_timer_fired(up.timer.token));
        assert_eq!(nav.phase(), NavPhase::Open);
    }

    #[test]
    fn close_during_drag_is_not_undone_on_release() {
        let mut nav = animator();
        nav.open();
        let down = nav.pointer_down();
        nav.drag_timer_fired(down.token);
        nav.close();
        let up = nav.pointer_up([0.0, 0.0], false);
        assert!(!nav.drag_timer_fired(up.timer.token));
        assert!(!nav.pointer().animating);
    }

    #[test]
    fn second_press_during_release_keeps_cached_animation() {
        let mut nav = animator();
        nav.open();
        let down = nav.pointer_down();
        nav.drag_timer_fired(down.token);
        assert!(!nav.step());

        // second press lands before the end-drag timer fires
        let up = nav.pointer_up([0.0, 0.0], false);
        let again = nav.pointer_down();
        assert!(!nav.drag_timer_fired(up.timer.token));
        assert!(!nav.drag_timer_fired(again.token));
        assert_eq!(nav.phase(), NavPhase::Dragging);

        let up = nav.pointer_up([0.0, 0.0], false);
        assert!(nav.drag_timer_fired(up.timer.token));
        assert_eq!(nav.phase(), NavPhase::Open);
    }

    #[test]
    fn open_during_drag_applies_on_release() {
        let mut nav = animator();
        let down = nav.pointer_down();
        nav.drag_timer_fired(down.token);

        assert!(!nav.open(), "no frame while the drag owns the pointer");
        assert!(!nav.pointer().animating);
        assert_eq!(nav.phase(), NavPhase::Dragging);

        let up = nav.pointer_up([0.0, 0.0], false);
        assert!(nav.drag_timer_fired(up.timer.token));
        assert_eq!(nav.phase(), NavPhase::Open);
    }

    #[test]
    fn quick_tap_cancels_pending_drag() {
        let mut nav = animator();
        let down = nav.pointer_down();
        let up = nav.pointer_up([0.0, 0.0], false);
        let again = nav.pointer_down();

        assert!(!nav.drag_timer_fired(down.token));
        assert!(!nav.drag_timer_fired(up.timer.token));
        assert!(!nav.pointer().dragging);

        nav.drag_timer_fired(again.token);
        assert!(nav.pointer().dragging);
    }

    #[test]
    fn release_over_item_activates_it() {
        let mut nav = animator();
        nav.set_pointer_px([500.0, 400.0]).unwrap();
        // container at 0: items span [200, 500) and [500, 800) from y=400
        let up = nav.pointer_up([650.0, 450.0], true);
        assert_eq!(up.activate, Some(1));

        let up = nav.pointer_up([650.0, 450.0], false);
        assert_eq!(up.activate, None);
    }

    #[test]
    fn hover_tracks_pointer_over_and_out() {
        let mut nav = animator();
        nav.set_pointer_px([500.0, 400.0]).unwrap();
        assert!(nav.hover_at(Some([300.0, 450.0])));
        assert!(nav.items()[0].hovered);
        assert!(!nav.hover_at(Some([310.0, 450.0])));

        assert!(nav.hover_at(Some([650.0, 450.0])));
        assert!(!nav.items()[0].hovered);
        assert!(nav.items()[1].hovered);

        assert!(nav.hover_at(None));
        assert!(!nav.items()[1].hovered);
    }

    #[test]
    fn focus_highlights_and_moves_pointer() {
        let mut nav = animator();
        nav.focus_item(1).unwrap();
        assert!(nav.items()[1].hovered);
        assert_eq!(nav.pointer().pixel, nav.focus_position(1));
        nav.blur_item(1).unwrap();
        assert!(!nav.items()[1].hovered);
        assert!(nav.focus_item(7).is_err());
    }

    #[test]
    fn bad_pointer_keeps_previous_state() {
        let mut nav = animator();
        nav.set_pointer_px([100.0, 100.0]).unwrap();
        let before = nav.pointer().clone();
        assert!(nav.set_pointer_px([f64::NAN, 0.0]).is_err());
        assert_eq!(nav.pointer().pixel, before.pixel);
        assert_eq!(nav.screen_filter().pointer(), before.normalized);
    }

    #[test]
    fn background_colour_setter_validates() {
        let mut nav = animator();
        nav.set_background_colour("#AABBCC").unwrap();
        assert_eq!(nav.background(), Colour(0xAABBCC));
        assert!(nav.set_background_colour("not-a-color").is_err());
        assert_eq!(nav.background(), Colour(0xAABBCC));
    }

    #[test]
    fn mask_follows_resize_and_padding() {
        let mut nav = animator();
        assert!(nav.set_mask_padding(f64::NAN).is_err());
        nav.set_mask_padding(10.0).unwrap();
        nav.resize(Viewport::new(500.0, 400.0).unwrap());
        assert_eq!(nav.mask(), Rect { x: -10.0, y: -10.0, width: 520.0, height: 420.0 });
        assert_eq!(nav.screen_filter().resolution(), [1000.0, 800.0]);
    }
}
