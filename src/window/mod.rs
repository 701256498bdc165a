mod controller;
mod engine;
mod reveal;

pub use controller::ScrollController;
pub use engine::{compute_window, max_scroll, Window, FALLBACK_VIEWPORT_ITEMS};
pub use reveal::LazyReveal;
