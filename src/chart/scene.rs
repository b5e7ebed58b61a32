//! Scene construction.
//!
//! A [`Scene`] is the complete, immutable description of what gets drawn:
//! bars with their inspectable attributes, both axes with ticks, and the
//! static text labels. Backends (SVG, ASCII, TUI) only read it.

use serde::{Deserialize, Serialize};

use crate::chart::scale::{LinearScale, Tick, TimeScale};
use crate::data::ChartText;
use crate::domain::{ChartConfig, Dataset};
use crate::error::AppError;
use crate::report::tooltip_html;

/// Approximate tick count requested from each axis.
pub const AXIS_TICKS: usize = 10;

/// The x (time) and y (value) scales for one dataset.
#[derive(Debug, Clone, Copy)]
pub struct ChartScales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl ChartScales {
    pub fn from_dataset(dataset: &Dataset, config: &ChartConfig) -> Result<Self, AppError> {
        let (min, max) = dataset
            .date_extent()
            .ok_or_else(|| AppError::parse("GDP dataset contains no observations."))?;
        let max_value = dataset
            .max_value()
            .ok_or_else(|| AppError::parse("GDP dataset contains no observations."))?;

        let pad = config.padding;
        Ok(Self {
            x: TimeScale::new(
                [min, max],
                [pad.horizontal, config.width - pad.horizontal],
            ),
            y: LinearScale::new(
                [0.0, max_value],
                [config.height - pad.vertical, pad.vertical],
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Raw date string (`data-date`).
    pub date: String,
    /// Raw value (`data-gdp`).
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Tooltip body shown while hovered.
    pub tooltip: String,
}

impl Bar {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: String,
    pub orientation: AxisOrientation,
    /// Translation of the axis group: y for a bottom axis, x for a left axis.
    pub offset: f64,
    /// Extent of the axis line along its direction.
    pub range: [f64; 2],
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn transform(&self) -> String {
        match self.orientation {
            AxisOrientation::Bottom => format!("translate(0, {})", fmt_num(self.offset)),
            AxisOrientation::Left => format!("translate({}, 0)", fmt_num(self.offset)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelRole {
    Series,
    Title,
    Citation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub role: LabelRole,
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees around `(x, y)`.
    pub rotation: f64,
    pub anchor: TextAnchor,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub config: ChartConfig,
    pub bars: Vec<Bar>,
    pub axes: Vec<Axis>,
    pub labels: Vec<TextLabel>,
}

impl Scene {
    /// Build the scene for a dataset. Either every element is produced or an
    /// error is returned; there is no partial scene.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> Result<Self, AppError> {
        let scales = ChartScales::from_dataset(dataset, config)?;
        let text = ChartText::from_dataset(dataset, config.citation)?;
        let baseline = config.baseline();

        let bars = dataset
            .data
            .iter()
            .map(|p| {
                let y = scales.y.apply(p.value);
                Bar {
                    date: p.date.clone(),
                    value: p.value,
                    x: scales.x.apply(p.day),
                    y,
                    width: config.bar_width,
                    height: baseline - y,
                    tooltip: tooltip_html(p),
                }
            })
            .collect();

        let axes = vec![
            Axis {
                id: "x-axis".to_string(),
                orientation: AxisOrientation::Bottom,
                offset: baseline,
                range: scales.x.range(),
                ticks: scales.x.axis_ticks(AXIS_TICKS),
            },
            Axis {
                id: "y-axis".to_string(),
                orientation: AxisOrientation::Left,
                offset: config.padding.horizontal,
                range: scales.y.range(),
                ticks: scales.y.axis_ticks(AXIS_TICKS),
            },
        ];

        let labels = vec![
            TextLabel {
                role: LabelRole::Series,
                id: None,
                x: config.padding.horizontal + 20.0,
                y: config.padding.vertical,
                rotation: -90.0,
                anchor: TextAnchor::End,
                text: text.series_label,
            },
            TextLabel {
                role: LabelRole::Title,
                id: Some("title".to_string()),
                x: config.width / 2.0,
                y: config.padding.vertical / 1.5,
                rotation: 0.0,
                anchor: TextAnchor::Middle,
                text: text.title,
            },
            TextLabel {
                role: LabelRole::Citation,
                id: None,
                x: config.width - config.padding.horizontal,
                y: config.height - config.padding.vertical / 2.0,
                rotation: 0.0,
                anchor: TextAnchor::End,
                text: text.citation_line,
            },
        ];

        tracing::debug!(bars = dataset.data.len(), "built chart scene");

        Ok(Self {
            config: config.clone(),
            bars,
            axes,
            labels,
        })
    }

    pub fn label(&self, role: LabelRole) -> Option<&TextLabel> {
        self.labels.iter().find(|l| l.role == role)
    }

    pub fn title(&self) -> Option<&str> {
        self.label(LabelRole::Title).map(|l| l.text.as_str())
    }

    pub fn citation(&self) -> Option<&str> {
        self.label(LabelRole::Citation).map(|l| l.text.as_str())
    }

    pub fn axis(&self, orientation: AxisOrientation) -> Option<&Axis> {
        self.axes.iter().find(|a| a.orientation == orientation)
    }

    /// Index of the bar whose rectangle contains `(x, y)`.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<usize> {
        self.bars.iter().position(|b| b.contains(x, y))
    }

    /// Index of the bar whose centre is horizontally closest to `x`.
    pub fn nearest_bar(&self, x: f64) -> Option<usize> {
        self.bars
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.center_x() - x).abs();
                let db = (b.center_x() - x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }
}

/// Render a coordinate without a trailing `.0` for whole numbers.
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
