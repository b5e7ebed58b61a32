//! Export per-bar results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart::Scene;
use crate::error::AppError;
use crate::report::format_date;

/// Write one CSV row per bar: source attributes plus computed geometry.
pub fn write_bars_csv(path: &Path, scene: &Scene) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_bars(file, scene)?;
    tracing::info!(path = %path.display(), rows = scene.bars.len(), "wrote bar CSV");
    Ok(())
}

/// Write the bar CSV to any writer.
pub fn write_bars<W: Write>(mut out: W, scene: &Scene) -> Result<(), AppError> {
    // Header
    writeln!(out, "date,quarter,gdp_billion,x,y,width,height")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for bar in &scene.bars {
        writeln!(
            out,
            "{},{},{},{:.4},{:.4},{},{:.4}",
            bar.date,
            format_date(&bar.date),
            bar.value,
            bar.x,
            bar.y,
            bar.width,
            bar.height,
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
