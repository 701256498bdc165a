use std::time::{Duration, Instant};

use crate::config::{LayoutConfig, RevealConfig};

use super::engine::{self, compute_window, Window, FALLBACK_VIEWPORT_ITEMS};
use super::reveal::LazyReveal;

/// Transient scroll geometry, owned exclusively by the controller for
/// the lifetime of one attached list.
#[derive(Debug, Default, Clone, Copy)]
struct WindowState {
    scroll_offset: usize,
    viewport_height: usize,
}

/// Drives the windowing engine from scroll and resize signals.
///
/// Signals are recorded last-write-wins and applied by [`tick`], which
/// runs at most one windowing pass per frame interval. After each pass
/// the near-bottom condition feeds the reveal controller. `detach`
/// cancels any pending reveal so nothing mutates state afterwards.
///
/// [`tick`]: ScrollController::tick
#[derive(Debug)]
pub struct ScrollController {
    state: WindowState,
    reveal: LazyReveal,
    item_height: usize,
    buffer_count: usize,
    frame_interval: Duration,
    last_pass: Option<Instant>,
    dirty: bool,
    attached: bool,
    window: Window,
}

impl ScrollController {
    pub fn new(layout: &LayoutConfig, reveal: &RevealConfig) -> Self {
        Self {
            state: WindowState::default(),
            reveal: LazyReveal::new(reveal),
            item_height: layout.item_height.max(1),
            buffer_count: layout.buffer_count,
            frame_interval: Duration::from_millis(16),
            last_pass: None,
            dirty: false,
            attached: false,
            window: Window::default(),
        }
    }

    /// Begin listening; the next tick runs a full pass.
    pub fn attach(&mut self) {
        self.attached = true;
        self.last_pass = None;
        self.dirty = true;
    }

    /// Stop listening and cancel any in-flight reveal expansion.
    pub fn detach(&mut self) {
        self.attached = false;
        self.dirty = false;
        self.reveal.cancel();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Latest computed window; stale until the next tick after a signal.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn scroll_offset(&self) -> usize {
        self.state.scroll_offset
    }

    pub fn item_height(&self) -> usize {
        self.item_height
    }

    pub fn revealed_count(&self, total: usize) -> usize {
        self.reveal.revealed_count(total)
    }

    /// Scroll by a signed number of length units. Clamped to the
    /// revealed block on the next pass.
    pub fn scroll_by(&mut self, delta: isize) {
        self.state.scroll_offset = self.state.scroll_offset.saturating_add_signed(delta);
        self.dirty = true;
    }

    /// Record a new container height (resize signal).
    pub fn on_resize(&mut self, viewport_height: usize) {
        if viewport_height != self.state.viewport_height {
            self.state.viewport_height = viewport_height;
            self.dirty = true;
        }
    }

    /// Force a full pass on the next tick (filter/sort/data change).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Adjust scroll so the item at `index` is fully inside the viewport.
    pub fn ensure_visible(&mut self, index: usize) {
        let h = self.item_height;
        let viewport = self.effective_viewport();
        let top = index * h;
        let bottom = top + h;
        if top < self.state.scroll_offset {
            self.state.scroll_offset = top;
            self.dirty = true;
        } else if bottom > self.state.scroll_offset + viewport {
            self.state.scroll_offset = bottom - viewport;
            self.dirty = true;
        }
    }

    /// One cooperative step: land due reveals, then run at most one
    /// throttled windowing pass over the latest recorded signals.
    /// Returns true when the window was recomputed.
    pub fn tick(&mut self, total: usize, now: Instant) -> bool {
        if !self.attached {
            return false;
        }
        if self.reveal.tick(total, now) {
            self.dirty = true;
        }
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_pass {
            if now.duration_since(last) < self.frame_interval {
                // Throttled; the latest signals stay recorded and the
                // next eligible tick picks them up.
                return false;
            }
        }

        let revealed = self.reveal.revealed_count(total);
        let viewport = self.effective_viewport();
        let max = engine::max_scroll(viewport, self.item_height, revealed);
        self.state.scroll_offset = self.state.scroll_offset.min(max);

        self.window = compute_window(
            self.state.scroll_offset,
            self.state.viewport_height,
            self.item_height,
            self.buffer_count,
            revealed,
        );
        self.reveal.maybe_trigger(
            self.state.scroll_offset,
            viewport,
            self.item_height,
            total,
            now,
        );
        self.last_pass = Some(now);
        self.dirty = false;
        true
    }

    fn effective_viewport(&self) -> usize {
        if self.state.viewport_height == 0 {
            FALLBACK_VIEWPORT_ITEMS * self.item_height
        } else {
            self.state.viewport_height
        }
    }
}
