//! Input/output helpers.
//!
//! - per-bar CSV export (`export`)
//! - scene JSON read/write (`scene`)

pub mod export;
pub mod scene;

pub use export::*;
pub use scene::*;
