//! Shared "chart pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch/load -> parse -> shape -> scales -> scene
//!
//! The CLI and the TUI can then focus on presentation (documents vs widgets).

use crate::chart::Scene;
use crate::cli::SourceArgs;
use crate::data::{GdpClient, load_file};
use crate::domain::{ChartConfig, CitationPolicy, Dataset};
use crate::error::AppError;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub scene: Scene,
}

/// Chart configuration for the given source options.
pub fn chart_config(source: &SourceArgs) -> ChartConfig {
    ChartConfig {
        citation: if source.allow_missing_citation {
            CitationPolicy::Empty
        } else {
            CitationPolicy::Require
        },
        ..ChartConfig::default()
    }
}

/// Fetch or load the dataset named by `source`.
pub fn load_dataset(source: &SourceArgs) -> Result<Dataset, AppError> {
    if let Some(path) = &source.input {
        return load_file(path);
    }
    let client = match &source.url {
        Some(url) => GdpClient::new(url.clone()),
        None => GdpClient::from_env(),
    };
    client.fetch()
}

/// Execute the full pipeline. Nothing is rendered on failure; the binary
/// prints the error once on stderr.
pub fn run_chart(source: &SourceArgs) -> Result<RunOutput, AppError> {
    let result = load_dataset(source).and_then(|dataset| run_with_dataset(dataset, &chart_config(source)));
    if let Err(err) = &result {
        tracing::debug!(kind = ?err.kind(), exit_code = err.exit_code(), "chart pipeline failed");
    }
    result
}

/// Execute the pipeline with a pre-loaded dataset.
pub fn run_with_dataset(dataset: Dataset, config: &ChartConfig) -> Result<RunOutput, AppError> {
    let scene = Scene::build(&dataset, config)?;
    Ok(RunOutput { dataset, scene })
}
