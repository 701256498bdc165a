/// Viewport height substitute, in items, for the first pass before the
/// container has been measured. Keeps the initial paint from rendering
/// nothing.
pub const FALLBACK_VIEWPORT_ITEMS: usize = 12;

/// The contiguous slice of the revealed collection to render, plus the
/// geometry needed to place it. Derived fresh on every pass, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// First index to render (inclusive)
    pub start: usize,
    /// One past the last index to render
    pub end: usize,
    /// Offset of `start` from the top of the full list, in length units
    pub top_offset: usize,
    /// Reserved height of the whole revealed collection
    pub total_height: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the index range intersecting the viewport.
///
/// All lengths are in the same abstract unit (the TUI passes terminal
/// rows); the fixed item height is what makes this O(1) arithmetic
/// instead of an O(n) offset scan over the collection.
///
/// `viewport_height == 0` means the container has not been measured
/// yet and a fallback of [`FALLBACK_VIEWPORT_ITEMS`] items is used.
pub fn compute_window(
    scroll_offset: usize,
    viewport_height: usize,
    item_height: usize,
    buffer_count: usize,
    revealed_count: usize,
) -> Window {
    let item_height = item_height.max(1);
    if revealed_count == 0 {
        return Window::default();
    }
    let viewport_height = if viewport_height == 0 {
        FALLBACK_VIEWPORT_ITEMS * item_height
    } else {
        viewport_height
    };

    let start = (scroll_offset / item_height)
        .saturating_sub(buffer_count)
        .min(revealed_count - 1);
    let end = ((scroll_offset + viewport_height).div_ceil(item_height) + buffer_count)
        .clamp(start, revealed_count);

    Window {
        start,
        end,
        top_offset: start * item_height,
        total_height: revealed_count * item_height,
    }
}

/// Maximum scroll offset that still keeps the viewport inside the
/// revealed collection.
pub fn max_scroll(viewport_height: usize, item_height: usize, revealed_count: usize) -> usize {
    (revealed_count * item_height.max(1)).saturating_sub(viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn top_of_list_renders_from_zero() {
        // 1,000-item feed revealed to 20: viewport covers ceil(600/88)
        // items plus buffer, clamped by the reveal count.
        let w = compute_window(0, 600, 88, 5, 20);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, (600usize.div_ceil(88) + 5).min(20));
        assert_eq!(w.end, 12);
        assert_eq!(w.top_offset, 0);
        assert_eq!(w.total_height, 20 * 88);
    }

    #[test]
    fn mid_scroll_window() {
        // Scrolled to item 100 of 200 revealed
        let w = compute_window(8800, 600, 88, 5, 200);
        assert_eq!(w.start, 95);
        assert_eq!(w.end, 112);
        assert_eq!(w.top_offset, 95 * 88);
    }

    #[test]
    fn zero_revealed_is_an_empty_window() {
        let w = compute_window(500, 600, 88, 5, 0);
        assert_eq!(w, Window::default());
        assert!(w.is_empty());
        assert_eq!(w.total_height, 0);
    }

    #[test]
    fn unmeasured_viewport_uses_fallback() {
        let w = compute_window(0, 0, 88, 0, 1000);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, FALLBACK_VIEWPORT_ITEMS);
    }

    #[test]
    fn scroll_past_end_clamps() {
        let w = compute_window(1_000_000, 600, 88, 5, 20);
        assert_eq!(w.start, 19);
        assert_eq!(w.end, 20);
    }

    #[test]
    fn max_scroll_reserves_viewport() {
        assert_eq!(max_scroll(600, 88, 20), 20 * 88 - 600);
        assert_eq!(max_scroll(600, 88, 2), 0);
    }

    proptest! {
        #[test]
        fn window_is_contained(
            scroll in 0usize..100_000,
            viewport in 0usize..2_000,
            item_height in 1usize..200,
            buffer in 0usize..20,
            revealed in 0usize..5_000,
        ) {
            let w = compute_window(scroll, viewport, item_height, buffer, revealed);
            prop_assert!(w.start <= w.end);
            prop_assert!(w.end <= revealed);
        }

        #[test]
        fn item_at_scroll_edge_is_covered(
            scroll in 0usize..100_000,
            viewport in 1usize..2_000,
            item_height in 1usize..200,
            buffer in 0usize..20,
            revealed in 1usize..5_000,
        ) {
            // The item under the top edge of the viewport is always
            // inside the window (no gap at the visible edge).
            let w = compute_window(scroll, viewport, item_height, buffer, revealed);
            let edge_item = (scroll / item_height).min(revealed - 1);
            prop_assert!(w.start <= edge_item);
            prop_assert!(edge_item < w.end);
        }

        #[test]
        fn top_offset_matches_start(
            scroll in 0usize..100_000,
            viewport in 0usize..2_000,
            item_height in 1usize..200,
            buffer in 0usize..20,
            revealed in 1usize..5_000,
        ) {
            let w = compute_window(scroll, viewport, item_height, buffer, revealed);
            prop_assert_eq!(w.top_offset, w.start * item_height);
        }
    }
}
