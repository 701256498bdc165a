use std::time::{Duration, Instant};

use crate::config::RevealConfig;

/// Progressively unlocks more of the sorted collection for windowing
/// as the viewport approaches the bottom of loaded content.
///
/// The internal count only ever grows; [`LazyReveal::revealed_count`]
/// caps it at the current collection length. At most one expansion is
/// in flight at a time, and the expansion lands after a short
/// configurable delay (zero allowed).
#[derive(Debug)]
pub struct LazyReveal {
    revealed: usize,
    increment: usize,
    threshold: usize,
    delay: Duration,
    /// Deadline of the pending expansion; Some while loading
    pending: Option<Instant>,
}

impl LazyReveal {
    pub fn new(cfg: &RevealConfig) -> Self {
        Self {
            revealed: cfg.initial_count,
            increment: cfg.increment,
            threshold: cfg.near_bottom_threshold,
            delay: Duration::from_millis(cfg.delay_ms),
            pending: None,
        }
    }

    /// How many items are eligible for windowing right now.
    pub fn revealed_count(&self, total: usize) -> usize {
        self.revealed.min(total)
    }

    pub fn is_loading_more(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the scroll position is within the near-bottom threshold
    /// of the revealed block.
    pub fn near_bottom(
        &self,
        scroll_offset: usize,
        viewport_height: usize,
        item_height: usize,
        total: usize,
    ) -> bool {
        let revealed_height = self.revealed_count(total) * item_height.max(1);
        let seen = scroll_offset + viewport_height;
        revealed_height.saturating_sub(seen) < self.threshold
    }

    /// Arm an expansion if the viewport is near the bottom, more items
    /// are available, and no expansion is already in flight. Returns
    /// true when a reveal cycle was started.
    pub fn maybe_trigger(
        &mut self,
        scroll_offset: usize,
        viewport_height: usize,
        item_height: usize,
        total: usize,
        now: Instant,
    ) -> bool {
        if self.pending.is_some() || self.revealed_count(total) >= total {
            return false;
        }
        if !self.near_bottom(scroll_offset, viewport_height, item_height, total) {
            return false;
        }
        self.pending = Some(now + self.delay);
        true
    }

    /// Land the pending expansion once its deadline has passed.
    /// Returns true when `revealed` grew.
    pub fn tick(&mut self, total: usize, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                let grown = (self.revealed + self.increment).min(total);
                if grown > self.revealed {
                    self.revealed = grown;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Drop any in-flight expansion; used on teardown so nothing
    /// mutates state after the list detaches.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal(initial: usize, increment: usize, threshold: usize, delay_ms: u64) -> LazyReveal {
        LazyReveal::new(&RevealConfig {
            initial_count: initial,
            increment,
            near_bottom_threshold: threshold,
            delay_ms,
        })
    }

    #[test]
    fn revealed_count_is_capped_by_total() {
        let r = reveal(20, 20, 200, 0);
        assert_eq!(r.revealed_count(7), 7);
        assert_eq!(r.revealed_count(100), 20);
    }

    #[test]
    fn scroll_near_bottom_expands_once() {
        // 20 of 100 revealed at 88 units each; viewport bottom within
        // 150 units of the revealed block's end.
        let mut r = reveal(20, 20, 200, 0);
        let now = Instant::now();
        let scroll = 20 * 88 - 600 - 150;
        assert!(r.maybe_trigger(scroll, 600, 88, 100, now));
        assert!(r.is_loading_more());
        assert!(r.tick(100, now));
        assert_eq!(r.revealed_count(100), 40);
        assert!(!r.is_loading_more());
    }

    #[test]
    fn double_trigger_lands_one_increment() {
        let mut r = reveal(20, 20, 200, 50);
        let now = Instant::now();
        let scroll = 20 * 88;
        assert!(r.maybe_trigger(scroll, 600, 88, 100, now));
        // Second near-bottom signal while the first is still in flight
        assert!(!r.maybe_trigger(scroll, 600, 88, 100, now));
        assert!(!r.tick(100, now)); // deadline not reached yet
        assert!(r.tick(100, now + Duration::from_millis(50)));
        assert_eq!(r.revealed_count(100), 40);
    }

    #[test]
    fn no_trigger_when_everything_is_revealed() {
        let mut r = reveal(20, 20, 200, 0);
        let now = Instant::now();
        assert!(!r.maybe_trigger(0, 600, 88, 15, now));
        assert!(!r.maybe_trigger(10_000, 600, 88, 20, now));
    }

    #[test]
    fn no_trigger_far_from_bottom() {
        let mut r = reveal(20, 20, 200, 0);
        assert!(!r.maybe_trigger(0, 600, 88, 100, Instant::now()));
    }

    #[test]
    fn growth_is_monotonic_and_capped() {
        let mut r = reveal(20, 20, 200, 0);
        let mut last = r.revealed_count(50);
        for _ in 0..10 {
            let now = Instant::now();
            let scroll = r.revealed_count(50) * 88;
            r.maybe_trigger(scroll, 600, 88, 50, now);
            r.tick(50, now);
            let current = r.revealed_count(50);
            assert!(current >= last);
            assert!(current <= 50);
            last = current;
        }
        assert_eq!(last, 50);
    }

    #[test]
    fn cancel_drops_pending_expansion() {
        let mut r = reveal(20, 20, 200, 50);
        let now = Instant::now();
        assert!(r.maybe_trigger(20 * 88, 600, 88, 100, now));
        r.cancel();
        assert!(!r.tick(100, now + Duration::from_millis(100)));
        assert_eq!(r.revealed_count(100), 20);
    }
}
