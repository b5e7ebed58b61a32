//! Drives the library from JSON through scene construction, tooltip
//! interaction and the document backends.

use std::path::Path;

use gdp_chart::app::pipeline::{RunOutput, run_chart, run_with_dataset};
use gdp_chart::chart::scene::AxisOrientation;
use gdp_chart::chart::{PointerEvent, Tooltip, Visibility};
use gdp_chart::cli::SourceArgs;
use gdp_chart::data::parse_dataset;
use gdp_chart::domain::ChartConfig;
use gdp_chart::error::ErrorKind;
use gdp_chart::render::svg::{render_html, render_svg};

const MINIMAL: &str = r#"{
    "name": "Gross Domestic Product, USA",
    "description": "... (http://example.com/x.pdf)",
    "code": "GDP",
    "data": [["1947-01-01", 243.1], ["1947-04-01", 246.3]]
}"#;

fn minimal_run() -> RunOutput {
    let dataset = parse_dataset(MINIMAL).unwrap();
    run_with_dataset(dataset, &ChartConfig::default()).unwrap()
}

#[test]
fn minimal_dataset_renders_two_bars() {
    let run = minimal_run();
    let scene = &run.scene;

    assert_eq!(scene.bars.len(), 2);
    assert_eq!((scene.bars[0].date.as_str(), scene.bars[0].value), ("1947-01-01", 243.1));
    assert_eq!((scene.bars[1].date.as_str(), scene.bars[1].value), ("1947-04-01", 246.3));
    assert!(scene.title().unwrap().ends_with("GDP"));
    assert!(scene.citation().unwrap().contains("x.pdf"));

    let svg = render_svg(scene);
    assert!(svg.contains(r#"data-date="1947-01-01" data-gdp="243.1""#));
    assert!(svg.contains(r#"data-date="1947-04-01" data-gdp="246.3""#));
}

#[test]
fn hover_shows_and_hides_tooltip() {
    let run = minimal_run();
    let bar = &run.scene.bars[0];
    let mut tooltip = Tooltip::new(run.scene.config.baseline());

    tooltip.on_pointer_enter(
        PointerEvent {
            page_x: bar.x + 1.0,
            page_y: bar.y + 10.0,
        },
        bar,
        0.0,
    );
    assert_eq!(tooltip.visibility(), Visibility::Visible);
    assert_eq!(tooltip.opacity(), 0.9);
    assert_eq!(tooltip.html(), "Q1 1947<br>$243.10 Billion");
    assert_eq!(tooltip.data_date(), Some("1947-01-01"));
    assert_eq!(tooltip.top(), 500.0);

    tooltip.on_pointer_leave(0.9);
    assert_eq!(tooltip.opacity(), 0.0);
}

#[test]
fn y_scale_bounds_and_monotonic() {
    let run = minimal_run();
    let bars = &run.scene.bars;
    // Bars start at the baseline, the tallest one reaches the top padding.
    for bar in bars {
        assert!((bar.y + bar.height - 500.0).abs() < 1e-9);
    }
    assert!((bars[1].y - 100.0).abs() < 1e-9);
    assert!(bars[0].y > bars[1].y);
}

#[test]
fn fixture_file_round_trip() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gdp_small.json");
    let source = SourceArgs {
        input: Some(path),
        ..SourceArgs::default()
    };
    let run = run_chart(&source).unwrap();

    assert_eq!(run.scene.bars.len(), 5);
    assert_eq!(run.scene.bars.first().unwrap().x, 60.0);
    assert_eq!(run.scene.bars.last().unwrap().x, 740.0);
    assert_eq!(
        run.scene.citation(),
        Some("More information: http://www.bea.gov/national/pdf/nipaguid.pdf")
    );
    assert_eq!(run.scene.bars[3].tooltip, "Q4 1947<br>$260.30 Billion");

    let x_axis = run.scene.axis(AxisOrientation::Bottom).unwrap();
    assert!(!x_axis.ticks.is_empty());

    let html = render_html(&run.scene);
    assert_eq!(html.matches(r#"class="bar""#).count(), 5);
    assert!(html.contains(r#"id="tooltip""#));
}

#[test]
fn citation_less_description_aborts() {
    let body = MINIMAL.replace("(http://example.com/x.pdf)", "no link");
    let dataset = parse_dataset(&body).unwrap();
    let err = run_with_dataset(dataset, &ChartConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Extraction);
}
