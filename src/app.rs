use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::feed::{
    filter_indices, sort_indices, ClassFilter, FilterConfig, Item, StatusStore,
};
use crate::window::{ScrollController, Window};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    List,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneFocus {
    List,
    Preview,
}

/// User intent reported upward by the list. The list never mutates
/// status itself; the shell applies these to the status store.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    Select(String),
    MarkDone(String),
    Snooze(String, u32),
    Reopen(String),
}

/// Why the filtered feed came out empty; drives the empty-state wording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmptyReason {
    NoItems,
    NoSearchMatches,
    NothingInClassView,
}

pub struct App {
    pub config: Arc<Config>,
    pub view: View,
    pub items: Vec<Item>,
    /// Filtered + sorted positions into `items`, display order
    pub view_indices: Vec<usize>,
    pub filter: FilterConfig,
    /// Position within `view_indices`
    pub selected: Option<usize>,
    pub controller: ScrollController,
    pub store: StatusStore,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub focused_pane: PaneFocus,
    pub preview_scroll: u16,
    // Mouse tracking - pane areas
    pub list_area: Rect,
    pub preview_area: Rect,
}

impl App {
    pub fn new(items: Vec<Item>, config: Arc<Config>, store: StatusStore) -> Self {
        let mut controller = ScrollController::new(&config.layout, &config.reveal);
        controller.attach();

        let mut app = Self {
            config,
            view: View::List,
            items,
            view_indices: Vec::new(),
            filter: FilterConfig::default(),
            selected: None,
            controller,
            store,
            should_quit: false,
            status_message: None,
            focused_pane: PaneFocus::List,
            preview_scroll: 0,
            list_area: Rect::default(),
            preview_area: Rect::default(),
        };
        app.recompute();
        app
    }

    /// Full pass: filter, sort, re-anchor the selection, and mark the
    /// window stale. Runs on every data/filter/status change.
    pub fn recompute(&mut self) {
        let selected_id = self.selected_item().map(|i| i.id.clone());

        let filtered = filter_indices(&self.items, &self.filter);
        self.view_indices = sort_indices(
            &self.items,
            filtered,
            self.store.done_ids(),
            self.store.snoozed_ids(),
        );

        // Keep the same item selected where possible, else clamp
        self.selected = match selected_id {
            Some(id) => self
                .view_indices
                .iter()
                .position(|&i| self.items[i].id == id)
                .or(if self.view_indices.is_empty() { None } else { Some(0) }),
            None if !self.view_indices.is_empty() => Some(0),
            None => None,
        };
        if let Some(sel) = self.selected {
            self.controller.ensure_visible(sel);
        }
        self.controller.invalidate();
    }

    /// One cooperative step of the scroll/reveal machinery.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(self.view_indices.len(), now)
    }

    pub fn window(&self) -> Window {
        self.controller.window()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected
            .and_then(|pos| self.view_indices.get(pos))
            .and_then(|&idx| self.items.get(idx))
    }

    pub fn next(&mut self) {
        if self.view_indices.is_empty() {
            return;
        }
        let revealed = self.controller.revealed_count(self.view_indices.len());
        let max = revealed.saturating_sub(1);
        let pos = match self.selected {
            Some(pos) => (pos + 1).min(max),
            None => 0,
        };
        self.selected = Some(pos);
        self.preview_scroll = 0;
        self.controller.ensure_visible(pos);
    }

    pub fn previous(&mut self) {
        if self.view_indices.is_empty() {
            return;
        }
        let pos = self.selected.map(|p| p.saturating_sub(1)).unwrap_or(0);
        self.selected = Some(pos);
        self.preview_scroll = 0;
        self.controller.ensure_visible(pos);
    }

    pub fn preview_scroll_down(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_add(3);
    }

    pub fn preview_scroll_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(3);
    }

    /// Scroll the list viewport by whole rows
    pub fn scroll_list(&mut self, rows: isize) {
        self.controller.scroll_by(rows);
    }

    pub fn refresh(&mut self, items: Vec<Item>) {
        self.items = items;
        self.recompute();
        self.status_message = Some("Refreshed".to_string());
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn start_search(&mut self) {
        self.filter.search_text.clear();
        self.view = View::Search;
        self.recompute();
    }

    pub fn cancel_search(&mut self) {
        self.filter.search_text.clear();
        self.view = View::List;
        self.recompute();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search_text.push(c);
        self.recompute();
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search_text.pop();
        self.recompute();
    }

    pub fn set_class_filter(&mut self, class_filter: ClassFilter) {
        self.filter.class_filter = class_filter;
        self.recompute();
    }

    pub fn toggle_suppress_promotional(&mut self) {
        self.filter.suppress_promotional = !self.filter.suppress_promotional;
        self.recompute();
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.view_indices.is_empty() {
            return None;
        }
        Some(if !self.filter.search_text.is_empty() {
            EmptyReason::NoSearchMatches
        } else if self.filter.class_filter != ClassFilter::All || self.filter.suppress_promotional {
            EmptyReason::NothingInClassView
        } else {
            EmptyReason::NoItems
        })
    }

    /// Update pane areas (called during render)
    pub fn set_pane_areas(&mut self, list: Rect, preview: Rect) {
        self.list_area = list;
        self.preview_area = preview;
    }

    /// Handle click at (x, y); returns the action it maps to, if any.
    pub fn handle_click(&mut self, x: u16, y: u16) -> Option<FeedAction> {
        let click = ratatui::layout::Position::new(x, y);
        if self.list_area.contains(click) {
            self.focused_pane = PaneFocus::List;
            // Row inside the list body, accounting for border and scroll
            let visual_row = y.saturating_sub(self.list_area.y + 1) as usize;
            let row = visual_row + self.controller.scroll_offset();
            let pos = row / self.controller.item_height();
            let revealed = self.controller.revealed_count(self.view_indices.len());
            if pos < revealed {
                self.selected = Some(pos);
                let id = self.items[self.view_indices[pos]].id.clone();
                return Some(FeedAction::Select(id));
            }
        } else if self.preview_area.contains(click) {
            self.focused_pane = PaneFocus::Preview;
        }
        None
    }

    /// Map a key-driven intent on the current selection to an action.
    pub fn action_on_selected(&self, make: impl FnOnce(String) -> FeedAction) -> Option<FeedAction> {
        self.selected_item().map(|item| make(item.id.clone()))
    }
}
