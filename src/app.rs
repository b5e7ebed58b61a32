//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - fetches or loads the GDP dataset
//! - builds the chart scene
//! - writes documents, previews and optional exports

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, PlotArgs, RenderArgs, SummaryArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gdp` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gdp` and `gdp --input x.json` to behave like `gdp tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(&cli.log);

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Summary(args) => handle_summary(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--log`.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let run = pipeline::run_chart(&args.source)?;
    let document = args.format.render(&run.scene);

    match &args.out {
        Some(path) => {
            std::fs::write(path, &document)
                .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
            tracing::info!(path = %path.display(), bars = run.scene.bars.len(), "wrote chart");
        }
        None => {
            std::io::stdout()
                .write_all(document.as_bytes())
                .map_err(|e| AppError::io(format!("Failed to write chart to stdout: {e}")))?;
        }
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_bars_csv(path, &run.scene)?;
    }
    if let Some(path) = &args.export_scene {
        crate::io::scene::write_scene_json(path, &run.scene)?;
    }

    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let run = pipeline::run_chart(&args.source)?;
    println!("{}", crate::report::format_summary(&run.dataset, &run.scene));
    println!(
        "{}",
        crate::plot::render_ascii_bars(&run.scene, args.width, args.height)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let scene = crate::io::scene::read_scene_json(&args.scene)?;
    println!(
        "{}",
        crate::plot::render_ascii_bars(&scene, args.width, args.height)
    );
    Ok(())
}

/// Rewrite argv so `gdp` defaults to `gdp tui`.
///
/// Rules:
/// - `gdp`                      -> `gdp tui`
/// - `gdp --input x.json ...`   -> `gdp tui --input x.json ...`
/// - `gdp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "summary" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["gdp"])), argv(&["gdp", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["gdp", "--input", "a.json"])),
            argv(&["gdp", "tui", "--input", "a.json"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        assert_eq!(rewrite_args(argv(&["gdp", "render"])), argv(&["gdp", "render"]));
        assert_eq!(rewrite_args(argv(&["gdp", "--help"])), argv(&["gdp", "--help"]));
    }
}
