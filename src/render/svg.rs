//! SVG / HTML backend.
//!
//! The output mirrors the DOM a browser chart would build: one `rect.bar` per
//! data point carrying `data-date` / `data-gdp`, `#x-axis` and `#y-axis`
//! groups, a `#title` text, and (for HTML) a hidden `#tooltip` element that
//! an inline script fades in over hovered bars.

use std::fmt::Write as _;

use crate::chart::scene::{Axis, AxisOrientation, Bar, Scene, TextLabel, fmt_num};
use crate::chart::tooltip::{FADE_IN, FADE_OUT, POINTER_OFFSET_X, VISIBLE_OPACITY};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Render a standalone SVG document.
pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="chart">"#,
        w = fmt_num(scene.config.width),
        h = fmt_num(scene.config.height),
    );

    for bar in &scene.bars {
        write_bar(&mut out, bar);
    }
    for axis in &scene.axes {
        write_axis(&mut out, axis);
    }
    for label in &scene.labels {
        write_label(&mut out, label);
    }

    out.push_str("</svg>\n");
    out
}

/// Render an HTML page embedding the SVG and a hidden tooltip element.
pub fn render_html(scene: &Scene) -> String {
    let title = scene.title().unwrap_or("GDP");
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");
    out.push_str(r#"<div id="tooltip" style="opacity: 0;"></div>"#);
    out.push('\n');
    out.push_str(&render_svg(scene));
    out.push_str(&tooltip_script(scene));
    out.push_str("</body>\n</html>\n");
    out
}

/// Pointer handlers for `rect.bar`: enter fills and fades the tooltip in at
/// the baseline, leave fades it out.
fn tooltip_script(scene: &Scene) -> String {
    format!(
        "<script>
(function () {{
  var tooltip = document.getElementById('tooltip');
  document.querySelectorAll('rect.bar').forEach(function (bar) {{
    bar.addEventListener('mouseover', function (e) {{
      tooltip.setAttribute('data-date', bar.getAttribute('data-date'));
      tooltip.innerHTML = bar.getAttribute('data-tooltip');
      tooltip.style.left = (e.pageX + {offset}) + 'px';
      tooltip.style.top = '{top}px';
      tooltip.style.transition = 'opacity {fade_in}ms';
      tooltip.style.opacity = {opacity};
    }});
    bar.addEventListener('mouseout', function () {{
      tooltip.style.transition = 'opacity {fade_out}ms';
      tooltip.style.opacity = 0;
    }});
  }});
}})();
</script>
",
        offset = fmt_num(POINTER_OFFSET_X),
        top = fmt_num(scene.config.baseline()),
        fade_in = FADE_IN.as_millis(),
        fade_out = FADE_OUT.as_millis(),
        opacity = VISIBLE_OPACITY,
    )
}

const STYLE: &str = "<style>
  body { font-family: sans-serif; }
  .bar { fill: #33adff; }
  .bar:hover { fill: #ffffff; }
  #tooltip { position: absolute; pointer-events: none; padding: 6px; background: #ddd; border-radius: 4px; }
</style>
";

fn write_bar(out: &mut String, bar: &Bar) {
    let _ = writeln!(
        out,
        r#"  <rect class="bar" data-date="{}" data-gdp="{}" x="{}" y="{}" width="{}" height="{}" data-tooltip="{}"><title>{}</title></rect>"#,
        escape(&bar.date),
        bar.value,
        fmt_num(bar.x),
        fmt_num(bar.y),
        fmt_num(bar.width),
        fmt_num(bar.height),
        escape(&bar.tooltip),
        escape(&bar.tooltip.replace("<br>", "\n")),
    );
}

fn write_axis(out: &mut String, axis: &Axis) {
    let _ = writeln!(
        out,
        r#"  <g id="{}" transform="{}" fill="none" font-size="10" text-anchor="{}">"#,
        escape(&axis.id),
        axis.transform(),
        match axis.orientation {
            AxisOrientation::Bottom => "middle",
            AxisOrientation::Left => "end",
        },
    );

    let [r0, r1] = axis.range;
    let domain = match axis.orientation {
        AxisOrientation::Bottom => format!(
            "M{},{TICK_SIZE}V0H{}V{TICK_SIZE}",
            fmt_num(r0),
            fmt_num(r1)
        ),
        AxisOrientation::Left => format!(
            "M-{TICK_SIZE},{}H0V{}H-{TICK_SIZE}",
            fmt_num(r0),
            fmt_num(r1)
        ),
    };
    let _ = writeln!(out, r#"    <path class="domain" stroke="currentColor" d="{domain}"/>"#);

    for tick in &axis.ticks {
        let pos = fmt_num(tick.position);
        let label = escape(&tick.label);
        match axis.orientation {
            AxisOrientation::Bottom => {
                let _ = writeln!(
                    out,
                    r#"    <g class="tick" transform="translate({pos},0)"><line stroke="currentColor" y2="{TICK_SIZE}"/><text fill="currentColor" y="{}" dy="0.71em">{label}</text></g>"#,
                    fmt_num(TICK_SIZE + TICK_PADDING),
                );
            }
            AxisOrientation::Left => {
                let _ = writeln!(
                    out,
                    r#"    <g class="tick" transform="translate(0,{pos})"><line stroke="currentColor" x2="-{TICK_SIZE}"/><text fill="currentColor" x="-{}" dy="0.32em">{label}</text></g>"#,
                    fmt_num(TICK_SIZE + TICK_PADDING),
                );
            }
        }
    }

    out.push_str("  </g>\n");
}

fn write_label(out: &mut String, label: &TextLabel) {
    let id = label
        .id
        .as_deref()
        .map(|id| format!(r#" id="{}""#, escape(id)))
        .unwrap_or_default();
    let position = if label.rotation != 0.0 {
        format!(
            r#"transform="translate({}, {}) rotate({})""#,
            fmt_num(label.x),
            fmt_num(label.y),
            fmt_num(label.rotation)
        )
    } else {
        format!(r#"x="{}" y="{}""#, fmt_num(label.x), fmt_num(label.y))
    };
    let _ = writeln!(
        out,
        r#"  <text{id} {position} text-anchor="{}">{}</text>"#,
        label.anchor.as_str(),
        escape(&label.text),
    );
}

/// Escape text for XML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartConfig, DataPoint, Dataset};

    fn scene() -> Scene {
        let ds = Dataset {
            name: "Gross Domestic Product, USA".to_string(),
            description: "(http://example.com/x.pdf)".to_string(),
            code: "GDP".to_string(),
            data: vec![
                DataPoint::new("1947-01-01", 243.1).unwrap(),
                DataPoint::new("1947-04-01", 246.3).unwrap(),
            ],
        };
        Scene::build(&ds, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn bars_carry_data_attributes() {
        let svg = render_svg(&scene());
        assert_eq!(svg.matches(r#"class="bar""#).count(), 2);
        assert!(svg.contains(r#"data-date="1947-01-01" data-gdp="243.1""#));
        assert!(svg.contains(r#"data-date="1947-04-01" data-gdp="246.3""#));
        assert!(svg.contains("<title>Q1 1947\n$243.10 Billion</title>"));
    }

    #[test]
    fn axes_and_text() {
        let svg = render_svg(&scene());
        assert!(svg.contains(r#"<g id="x-axis" transform="translate(0, 500)""#));
        assert!(svg.contains(r#"<g id="y-axis" transform="translate(60, 0)""#));
        assert!(svg.contains(r#"<text id="title" x="400" y="66.667" text-anchor="middle">United States GDP</text>"#));
        assert!(svg.contains(r#"transform="translate(80, 100) rotate(-90)" text-anchor="end">Gross Domestic Product</text>"#));
        assert!(svg.contains(r#"x="740" y="550" text-anchor="end">More information: http://example.com/x.pdf</text>"#));
    }

    #[test]
    fn html_has_hidden_tooltip() {
        let html = render_html(&scene());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="tooltip" style="opacity: 0;"></div>"#));
        assert!(html.contains("<svg "));
    }

    #[test]
    fn html_script_wires_bar_hover() {
        let html = render_html(&scene());
        assert!(html.contains(r#"data-tooltip="Q1 1947&lt;br&gt;$243.10 Billion""#));
        assert!(html.contains("<script>"));
        assert!(html.contains("querySelectorAll('rect.bar')"));
        assert!(html.contains("addEventListener('mouseover'"));
        assert!(html.contains("tooltip.setAttribute('data-date', bar.getAttribute('data-date'));"));
        assert!(html.contains("tooltip.innerHTML = bar.getAttribute('data-tooltip');"));
        assert!(html.contains("tooltip.style.left = (e.pageX + 5) + 'px';"));
        assert!(html.contains("tooltip.style.top = '500px';"));
        assert!(html.contains("tooltip.style.transition = 'opacity 200ms';"));
        assert!(html.contains("tooltip.style.opacity = 0.9;"));
        assert!(html.contains("addEventListener('mouseout'"));
        assert!(html.contains("tooltip.style.transition = 'opacity 500ms';"));
        assert!(html.contains("tooltip.style.opacity = 0;"));
        // The script follows the chart it binds to.
        assert!(html.find("<svg ").unwrap() < html.find("<script>").unwrap());
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }
}
