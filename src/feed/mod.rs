mod cache;
mod classify;
mod filter;
mod sort;
mod source;
mod status;
mod store;
mod types;

pub use classify::classify;
pub use filter::{filter_indices, ClassFilter, FilterConfig};
pub use sort::{compare, sort_indices, sort_key};
pub use source::scan_feed;
pub use status::resolve_status;
pub use store::StatusStore;
pub use types::{CachedItem, Classification, Item, LifecycleStatus, Sender};
