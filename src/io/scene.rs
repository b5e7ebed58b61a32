//! Read/write scene JSON files.
//!
//! Scene JSON is the "portable" representation of a rendered chart: the chart
//! configuration plus every bar, axis tick and label with its computed
//! geometry. It can be re-rendered later (`gdp plot --scene`) without
//! fetching the dataset again.

use std::fs::File;
use std::path::Path;

use crate::chart::Scene;
use crate::error::AppError;

/// Write a scene JSON file.
pub fn write_scene_json(path: &Path, scene: &Scene) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create scene JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, scene)
        .map_err(|e| AppError::io(format!("Failed to write scene JSON: {e}")))?;

    Ok(())
}

/// Read a scene JSON file.
pub fn read_scene_json(path: &Path) -> Result<Scene, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open scene JSON '{}': {e}", path.display())))?;
    let scene: Scene =
        serde_json::from_reader(file).map_err(|e| AppError::parse(format!("Invalid scene JSON: {e}")))?;
    Ok(scene)
}
