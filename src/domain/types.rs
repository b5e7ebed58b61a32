//! Shared domain types.
//!
//! These types are kept lightweight and serializable so the dataset can be
//! read straight from the GDP JSON document and the chart configuration can
//! travel with an exported scene.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default remote source for the quarterly GDP document.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/GDP-data.json";

/// Fixed chart geometry.
pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 600.0;
pub const PADDING_HORIZONTAL: f64 = 60.0;
pub const PADDING_VERTICAL: f64 = 100.0;
pub const BAR_WIDTH: f64 = 2.5;

/// The parsed GDP document.
///
/// `data` is chronological as delivered by the source and never mutated after
/// parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Series title, e.g. `"Gross Domestic Product, 1 Decimal"`.
    pub name: String,
    /// Free text that embeds a `(...pdf` citation.
    pub description: String,
    /// Display suffix for the chart title (`"GDP"`).
    pub code: String,
    pub data: Vec<DataPoint>,
}

impl Dataset {
    /// Earliest and latest observation dates.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.data.iter().map(|p| p.day).min()?;
        let max = self.data.iter().map(|p| p.day).max()?;
        Some((min, max))
    }

    /// Largest value in the series.
    pub fn max_value(&self) -> Option<f64> {
        self.data
            .iter()
            .map(|p| p.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// One `[dateString, value]` pair from the document.
///
/// The raw string is kept verbatim for the `data-date` attribute; `day` is the
/// parsed calendar date used for scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(String, f64)", into = "(String, f64)")]
pub struct DataPoint {
    pub date: String,
    pub day: NaiveDate,
    /// GDP in billions of USD.
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Result<Self, String> {
        let date = date.into();
        let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{date}': {e}"))?;
        Ok(Self { date, day, value })
    }
}

impl TryFrom<(String, f64)> for DataPoint {
    type Error = String;

    fn try_from((date, value): (String, f64)) -> Result<Self, Self::Error> {
        DataPoint::new(date, value)
    }
}

impl From<DataPoint> for (String, f64) {
    fn from(point: DataPoint) -> Self {
        (point.date, point.value)
    }
}

/// What to do when the description carries no `(...pdf` citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CitationPolicy {
    /// Abort rendering with an extraction error.
    Require,
    /// Render the citation line with an empty citation.
    Empty,
}

/// Chart padding in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top and bottom padding.
    pub vertical: f64,
    /// Left and right padding.
    pub horizontal: f64,
}

/// Everything the scene builder needs besides the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    pub bar_width: f64,
    pub citation: CitationPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            padding: Padding {
                vertical: PADDING_VERTICAL,
                horizontal: PADDING_HORIZONTAL,
            },
            bar_width: BAR_WIDTH,
            citation: CitationPolicy::Require,
        }
    }
}

impl ChartConfig {
    /// Pixel row of the zero baseline (x-axis position).
    pub fn baseline(&self) -> f64 {
        self.height - self.padding.vertical
    }
}
