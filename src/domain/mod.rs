//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the parsed GDP document (`Dataset`, `DataPoint`)
//! - chart geometry and policies (`ChartConfig`, `Padding`, `CitationPolicy`)

pub mod types;

pub use types::*;
