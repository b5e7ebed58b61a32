//! `gdp-chart` library crate.
//!
//! The binary (`gdp`) is a thin wrapper around this library so that:
//!
//! - the scene pipeline is testable without spawning processes or a browser
//! - backends (SVG/HTML, ASCII, TUI) share one scene description
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod render;
pub mod report;
pub mod tui;
