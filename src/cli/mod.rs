//! Command-line parsing for the GDP bar chart.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scene/rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::render::OutputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gdp", version, about = "Quarterly GDP bar chart")]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `gdp_chart=debug`).
    #[arg(long, global = true, default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the chart to an SVG or HTML document.
    Render(RenderArgs),
    /// Print a dataset summary and an ASCII preview.
    Summary(SummaryArgs),
    /// Preview a previously exported scene JSON.
    Plot(PlotArgs),
    /// Launch the interactive terminal chart.
    ///
    /// Moving the mouse over a bar (or using ←/→) shows its tooltip.
    Tui(TuiArgs),
}

/// Where the dataset comes from.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// Dataset URL (defaults to `GDP_DATA_URL` or the public GDP document).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the dataset from a local JSON file instead of fetching it.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Render an empty citation instead of failing when the description has none.
    #[arg(long)]
    pub allow_missing_citation: bool,
}

/// Options for `gdp render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file (stdout when omitted).
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Output document type.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Export per-bar attributes and geometry to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the scene description to JSON.
    #[arg(long = "export-scene")]
    pub export_scene: Option<PathBuf>,
}

/// Options for `gdp summary`.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for plotting a saved scene.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Scene JSON file produced by `gdp render --export-scene`.
    #[arg(long, value_name = "JSON")]
    pub scene: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for `gdp tui`.
#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_defaults() {
        let cli = Cli::parse_from(["gdp", "render", "--input", "gdp.json"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(args.source.input, Some(PathBuf::from("gdp.json")));
        assert!(!args.source.allow_missing_citation);
        assert_eq!(cli.log, "warn");
    }

    #[test]
    fn url_and_input_conflict() {
        let res = Cli::try_parse_from(["gdp", "tui", "--url", "http://x", "--input", "a.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
