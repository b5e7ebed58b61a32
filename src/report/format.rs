//! Formatting utilities: quarter labels, currency, tooltip text, summaries.
//!
//! We keep formatting code in one place so:
//! - the scene builder and backends share exactly the same strings
//! - output changes are localized (important for the golden tests)

use crate::chart::Scene;
use crate::domain::{DataPoint, Dataset};

/// Map a month number to its quarter label.
///
/// The source only uses quarter-start months (01, 04, 07, 10). Any other month
/// collapses to `Q1`; this is a known narrowing, not an error.
pub fn quarter_label(month: u32) -> &'static str {
    match month {
        10 => "Q4",
        7 => "Q3",
        4 => "Q2",
        _ => "Q1",
    }
}

/// `"1947-04-01"` → `"Q2 1947"`.
///
/// The year is taken verbatim from the string; an unparsable month yields `Q1`.
pub fn format_date(date: &str) -> String {
    let mut parts = date.split('-');
    let year = parts.next().unwrap_or("");
    let month = parts
        .next()
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(1);
    format!("{} {year}", quarter_label(month))
}

/// en-US currency rendering: `$18,064.70`, `-$5.00`.
///
/// Rounds once, on the exact binary value, so `1.115` (stored just below)
/// becomes `$1.11`.
pub fn format_usd(value: f64) -> String {
    let abs = format!("{:.2}", value.abs());
    let (int_part, cents) = abs.split_once('.').unwrap_or((abs.as_str(), "00"));
    let negative = value < 0.0 && abs.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(int_part))
}

/// Currency with the `" Billion"` suffix used in the tooltip.
pub fn format_gdp(value: f64) -> String {
    format!("{} Billion", format_usd(value))
}

/// Tooltip body for one data point.
pub fn tooltip_html(point: &DataPoint) -> String {
    format!("{}<br>{}", format_date(&point.date), format_gdp(point.value))
}

/// Insert `,` every three digits from the right of a run of ASCII digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Tick label for a linear axis: thousands grouping with just enough decimals
/// for the tick step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().max(0.0) as usize
    };
    let abs = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match abs.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (abs.clone(), None),
    };
    let negative = value < 0.0 && abs.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        // Negative tick labels use the Unicode minus sign.
        out.push('\u{2212}');
    }
    out.push_str(&group_thousands(&int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Format the run summary printed by `gdp summary`.
pub fn format_summary(dataset: &Dataset, scene: &Scene) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", scene.title().unwrap_or("gdp")));
    out.push_str(&format!("Series: {}\n", dataset.name));
    if let (Some(first), Some(last)) = (dataset.data.first(), dataset.data.last()) {
        out.push_str(&format!(
            "Points: n={} | {} .. {}\n",
            dataset.data.len(),
            format_date(&first.date),
            format_date(&last.date),
        ));
    }
    if let Some(max) = dataset
        .data
        .iter()
        .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
    {
        out.push_str(&format!("Peak: {} ({})\n", format_gdp(max.value), format_date(&max.date)));
    }
    if let Some(citation) = scene.citation() {
        out.push_str(citation);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_mapping() {
        assert_eq!(format_date("1947-01-01"), "Q1 1947");
        assert_eq!(format_date("1947-04-01"), "Q2 1947");
        assert_eq!(format_date("1947-07-01"), "Q3 1947");
        assert_eq!(format_date("1947-10-01"), "Q4 1947");
    }

    #[test]
    fn off_quarter_months_collapse_to_q1() {
        assert_eq!(format_date("2001-05-01"), "Q1 2001");
        assert_eq!(format_date("2001-12-01"), "Q1 2001");
        assert_eq!(format_date("2001-xx-01"), "Q1 2001");
        assert_eq!(format_date("2001"), "Q1 2001");
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(243.1), "$243.10");
        assert_eq!(format_usd(18064.7), "$18,064.70");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(-5.0), "-$5.00");
        assert_eq!(format_usd(0.999), "$1.00");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn usd_rounds_the_stored_value_once() {
        assert_eq!(format_usd(1.115), "$1.11");
        assert_eq!(format_usd(2.675), "$2.67");
    }

    #[test]
    fn tooltip_text() {
        let p = DataPoint::new("1947-01-01", 243.1).unwrap();
        assert_eq!(tooltip_html(&p), "Q1 1947<br>$243.10 Billion");
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.0, 2000.0), "0");
        assert_eq!(format_tick(18000.0, 2000.0), "18,000");
        assert_eq!(format_tick(0.5, 0.1), "0.5");
        assert_eq!(format_tick(-1000.0, 500.0), "\u{2212}1,000");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
