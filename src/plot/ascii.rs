//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each grid column shows the tallest bar that lands in it, drawn with `#`.

use crate::chart::Scene;
use crate::chart::scene::AxisOrientation;
use crate::report::{format_date, format_gdp};

/// Render the bars of a scene into a `width` × `height` character grid.
pub fn render_ascii_bars(scene: &Scene, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(3);

    let [x0, x1] = scene
        .axis(AxisOrientation::Bottom)
        .map(|a| a.range)
        .unwrap_or([
            scene.config.padding.horizontal,
            scene.config.width - scene.config.padding.horizontal,
        ]);
    let plot_height = scene.config.baseline() - scene.config.padding.vertical;

    // Column fill levels (rows from the bottom).
    let mut levels = vec![0usize; width];
    for bar in &scene.bars {
        let col = map_x(bar.x, x0, x1, width);
        let frac = if plot_height > 0.0 {
            (bar.height / plot_height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let rows = (frac * height as f64).round() as usize;
        levels[col] = levels[col].max(rows);
    }

    let mut out = String::new();
    out.push_str(&header(scene));
    for row in 0..height {
        let line: String = levels
            .iter()
            .map(|&level| if row >= height - level { '#' } else { ' ' })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn header(scene: &Scene) -> String {
    let (Some(first), Some(last)) = (scene.bars.first(), scene.bars.last()) else {
        return "Plot: (no data)\n".to_string();
    };
    let max = scene
        .bars
        .iter()
        .map(|b| b.value)
        .fold(f64::NEG_INFINITY, f64::max);
    format!(
        "Plot: {} .. {} | max={}\n",
        format_date(&first.date),
        format_date(&last.date),
        format_gdp(max)
    )
}

fn map_x(x: f64, x0: f64, x1: f64, width: usize) -> usize {
    let width = width.max(2);
    if x1 <= x0 {
        return width / 2;
    }
    let u = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartConfig, DataPoint, Dataset};

    fn scene(points: &[(&str, f64)]) -> Scene {
        let ds = Dataset {
            name: "GDP, test".to_string(),
            description: "(http://example.com/x.pdf)".to_string(),
            code: "GDP".to_string(),
            data: points
                .iter()
                .map(|(d, v)| DataPoint::new(*d, *v).unwrap())
                .collect(),
        };
        Scene::build(&ds, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let scene = scene(&[("2000-01-01", 100.0), ("2000-07-01", 50.0), ("2001-01-01", 200.0)]);
        let txt = render_ascii_bars(&scene, 10, 4);
        let expected = concat!(
            "Plot: Q1 2000 .. Q1 2001 | max=$200.00 Billion\n",
            "         #\n",
            "         #\n",
            "#        #\n",
            "#   #    #\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn tallest_bar_wins_shared_column() {
        let scene = scene(&[("2000-01-01", 10.0), ("2000-01-02", 40.0), ("2010-01-01", 40.0)]);
        let txt = render_ascii_bars(&scene, 10, 4);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "#        #");
    }
}
