mod feed;
mod help;
mod pane;
mod preview;

pub use feed::*;
pub use help::*;
pub use pane::*;
pub use preview::*;
