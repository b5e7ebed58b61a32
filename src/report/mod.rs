//! Text formatting for tooltips, axes and terminal summaries.

pub mod format;

pub use format::*;
