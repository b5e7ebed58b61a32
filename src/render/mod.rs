//! Document backends for a [`crate::chart::Scene`].

pub mod svg;

use clap::ValueEnum;

use crate::chart::Scene;

/// Output document type for `gdp render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Html,
}

impl OutputFormat {
    pub fn render(self, scene: &Scene) -> String {
        match self {
            OutputFormat::Svg => svg::render_svg(scene),
            OutputFormat::Html => svg::render_html(scene),
        }
    }
}
