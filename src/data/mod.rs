//! Data acquisition and shaping.
//!
//! - fetching/loading/parsing the GDP document (`source`)
//! - deriving chart labels from it (`shape`)

pub mod shape;
pub mod source;

pub use shape::{ChartText, extract_citation, series_label};
pub use source::{GdpClient, load_file, parse_dataset};
