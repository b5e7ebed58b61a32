//! Continuous scales and axis tick generation.
//!
//! Both scales are immutable once built: they are pure functions of their
//! domain and range. A degenerate domain (min == max) maps every input to the
//! middle of the range.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::report::format_tick;

/// Linear value → pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        interpolate(self.domain[0], self.domain[1], value, self.range)
    }

    /// Evenly spaced "nice" tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain[0], self.domain[1]);
        nice_ticks(lo, hi, count)
    }

    /// Ticks with their pixel positions and labels.
    pub fn axis_ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = ordered(self.domain[0], self.domain[1]);
        let step = tick_step(lo, hi, count);
        self.ticks(count)
            .into_iter()
            .map(|v| Tick {
                position: self.apply(v),
                label: format_tick(v, step),
            })
            .collect()
    }
}

/// Calendar date → pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: [NaiveDate; 2],
    range: [f64; 2],
}

impl TimeScale {
    pub fn new(domain: [NaiveDate; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn apply(&self, day: NaiveDate) -> f64 {
        let span = (self.domain[1] - self.domain[0]).num_days() as f64;
        let offset = (day - self.domain[0]).num_days() as f64;
        interpolate(0.0, span, offset, self.range)
    }

    /// Calendar-aligned ticks: whole years for spans of two years or more,
    /// otherwise first-of-month ticks.
    pub fn axis_ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };

        let span_years = (hi - lo).num_days() as f64 / 365.25;
        if span_years >= 2.0 {
            self.year_ticks(lo, hi, count)
        } else {
            self.month_ticks(lo, hi, count)
        }
    }

    fn year_ticks(&self, lo: NaiveDate, hi: NaiveDate, count: usize) -> Vec<Tick> {
        let step = tick_step(lo.year() as f64, hi.year() as f64, count).max(1.0).round() as i32;
        let mut out = Vec::new();
        let mut year = lo.year();
        while year <= hi.year() {
            if year.rem_euclid(step) == 0 {
                if let Some(day) = NaiveDate::from_ymd_opt(year, 1, 1) {
                    if day >= lo && day <= hi {
                        out.push(Tick {
                            position: self.apply(day),
                            label: year.to_string(),
                        });
                    }
                }
            }
            year += 1;
        }
        out
    }

    fn month_ticks(&self, lo: NaiveDate, hi: NaiveDate, count: usize) -> Vec<Tick> {
        let months = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
        let raw = tick_step(months(lo) as f64, months(hi) as f64, count);
        let step = if raw <= 1.0 {
            1
        } else if raw <= 3.0 {
            3
        } else {
            6
        };

        let mut out = Vec::new();
        for index in months(lo)..=months(hi) {
            if index.rem_euclid(12).rem_euclid(step) != 0 {
                continue;
            }
            let year = index.div_euclid(12);
            let month = index.rem_euclid(12) as u32 + 1;
            let Some(day) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };
            if day < lo || day > hi {
                continue;
            }
            let label = if month == 1 {
                day.format("%Y").to_string()
            } else {
                day.format("%b").to_string()
            };
            out.push(Tick {
                position: self.apply(day),
                label,
            });
        }
        out
    }
}

/// One labelled tick on an axis, positioned along the axis direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn interpolate(d0: f64, d1: f64, value: f64, range: [f64; 2]) -> f64 {
    let span = d1 - d0;
    if span == 0.0 || !span.is_finite() {
        return (range[0] + range[1]) / 2.0;
    }
    let t = (value - d0) / span;
    range[0] + t * (range[1] - range[0])
}

/// Step between ticks: a power of ten times 1, 2 or 5, giving roughly `count`
/// ticks across `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) {
        return Vec::new();
    }
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return vec![lo];
    }

    // Fractional steps divide by the inverse to avoid 0.30000000000000004.
    if step < 1.0 {
        let inv = (1.0 / step).round();
        let i0 = (lo * inv).ceil() as i64;
        let i1 = (hi * inv).floor() as i64;
        (i0..=i1).map(|i| i as f64 / inv).collect()
    } else {
        let i0 = (lo / step).ceil() as i64;
        let i1 = (hi / step).floor() as i64;
        (i0..=i1).map(|i| i as f64 * step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn linear_scale_inverted_range() {
        let y = LinearScale::new([0.0, 246.3], [500.0, 100.0]);
        assert_eq!(y.apply(0.0), 500.0);
        assert!((y.apply(246.3) - 100.0).abs() < 1e-9);
        assert!(y.apply(100.0) > y.apply(200.0));
    }

    #[test]
    fn linear_scale_degenerate_domain() {
        let y = LinearScale::new([0.0, 0.0], [500.0, 100.0]);
        assert_eq!(y.apply(0.0), 300.0);
    }

    #[test]
    fn time_scale_bounds_and_monotonic() {
        let x = TimeScale::new([day(1947, 1, 1), day(2015, 7, 1)], [60.0, 740.0]);
        assert_eq!(x.apply(day(1947, 1, 1)), 60.0);
        assert_eq!(x.apply(day(2015, 7, 1)), 740.0);
        let mut prev = f64::NEG_INFINITY;
        for year in 1947..=2015 {
            let px = x.apply(day(year, 4, 1));
            assert!(px >= prev);
            prev = px;
        }
    }

    #[test]
    fn time_scale_single_date() {
        let x = TimeScale::new([day(1947, 1, 1), day(1947, 1, 1)], [60.0, 740.0]);
        assert_eq!(x.apply(day(1947, 1, 1)), 400.0);
    }

    #[test]
    fn tick_steps_follow_1_2_5() {
        assert_eq!(tick_step(0.0, 18064.7, 10), 2000.0);
        assert!((tick_step(0.0, 1.0, 10) - 0.1).abs() < 1e-12);
        assert_eq!(tick_step(1947.0, 2015.0, 10), 5.0);
        assert_eq!(tick_step(0.0, 246.3, 10), 20.0);
    }

    #[test]
    fn linear_ticks() {
        let y = LinearScale::new([0.0, 18064.7], [500.0, 100.0]);
        let ticks = y.ticks(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&18000.0));
        assert_eq!(ticks.len(), 10);

        let labelled = y.axis_ticks(10);
        assert_eq!(labelled[1].label, "2,000");
        assert_eq!(labelled[0].position, 500.0);
    }

    #[test]
    fn fractional_ticks_are_exact() {
        let y = LinearScale::new([0.0, 1.0], [100.0, 0.0]);
        let ticks = y.ticks(10);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn year_ticks_every_five_years() {
        let x = TimeScale::new([day(1947, 1, 1), day(2015, 7, 1)], [60.0, 740.0]);
        let ticks = x.axis_ticks(10);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"1950"));
        assert_eq!(labels.last(), Some(&"2015"));
        assert_eq!(labels.len(), 14);
    }

    #[test]
    fn month_ticks_for_short_spans() {
        let x = TimeScale::new([day(1947, 1, 1), day(1947, 4, 1)], [60.0, 740.0]);
        let ticks = x.axis_ticks(10);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1947", "Feb", "Mar", "Apr"]);
        assert_eq!(ticks[0].position, 60.0);
        assert_eq!(ticks[3].position, 740.0);
    }
}
