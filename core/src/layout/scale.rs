//! Band, linear and time scales.
//!
//! These follow the d3 scale conventions so chart geometry lines up with
//! what a d3 chart of the same data would draw.

use chrono::{Datelike, Months, NaiveDate};

/// A labelled position along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

fn range_midpoint(range: (f64, f64)) -> f64 {
    (range.0 + range.1) / 2.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Band Scale
// ─────────────────────────────────────────────────────────────────────────────

/// Equal-width bands over an ordered domain, centred in the range.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Uses the same value for inner and outer padding.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self::with_padding(domain, range, padding, padding)
    }

    pub fn with_padding(
        domain: Vec<String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let n = domain.len() as f64;
        let (lo, hi) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };
        let step = (hi - lo) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding_inner)) * 0.5;
        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Left edge of the band for `key`
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// One tick per band, at the band centre
    pub fn ticks(&self) -> Vec<Tick> {
        self.domain
            .iter()
            .enumerate()
            .map(|(i, label)| Tick {
                position: self.start + self.step * i as f64 + self.bandwidth / 2.0,
                label: label.clone(),
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Linear Scale
// ─────────────────────────────────────────────────────────────────────────────

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

pub const DEFAULT_TICK_COUNT: usize = 10;

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Tick spacing for roughly `count` ticks over [start, stop].
///
/// Positive results are the step itself; negative results are the
/// reciprocal of a sub-unit step (-10 means 0.1), as in d3.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let factor = step_factor(step / 10f64.powf(power));
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Tick values between `start` and `stop` (inclusive where they land
/// exactly on a step).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reversed) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let factor = step_factor(step / 10f64.powf(power));

    let mut values = Vec::new();
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (lo * inc).round();
        let mut i2 = (hi * inc).round();
        if i1 / inc < lo {
            i1 += 1.0;
        }
        if i2 / inc > hi {
            i2 -= 1.0;
        }
        let mut i = i1;
        while i <= i2 {
            values.push(i / inc);
            i += 1.0;
        }
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (lo / inc).round();
        let mut i2 = (hi / inc).round();
        if i1 * inc < lo {
            i1 += 1.0;
        }
        if i2 * inc > hi {
            i2 -= 1.0;
        }
        let mut i = i1;
        while i <= i2 {
            values.push(i * inc);
            i += 1.0;
        }
    }

    if reversed {
        values.reverse();
    }
    values
}

/// Continuous mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain [0, max]. A zero max falls back to [0, 1] so the axis still
    /// has a readable extent.
    pub fn from_max(max: f64, range: (f64, f64)) -> Self {
        let upper = if max > 0.0 { max } else { 1.0 };
        Self::new((0.0, upper), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return range_midpoint(self.range);
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Extend the domain outward to round tick values.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    pub fn tick_values(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let values = self.tick_values(count);
        let step = match values.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => 1.0,
        };
        values
            .into_iter()
            .map(|v| Tick {
                position: self.map(v),
                label: format_tick(v, step),
            })
            .collect()
    }
}

/// Format a tick value with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 || step <= 0.0 {
        format!("{:.0}", value)
    } else {
        let decimals = (-step.log10() - 1e-9).ceil().max(0.0) as usize;
        format!("{:.*}", decimals, value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time Scale
// ─────────────────────────────────────────────────────────────────────────────

/// Linear mapping from calendar days onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f64, f64)) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self { start, end, range }
    }

    /// Scale over the extent of `dates`, or None when there are none
    pub fn from_dates(
        dates: impl IntoIterator<Item = NaiveDate>,
        range: (f64, f64),
    ) -> Option<Self> {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            extent = Some(match extent {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }
        extent.map(|(lo, hi)| Self::new(lo, hi, range))
    }

    pub fn extent(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        let span = (self.end - self.start).num_days();
        if span == 0 {
            return range_midpoint(self.range);
        }
        let offset = (date - self.start).num_days() as f64;
        self.range.0 + offset / span as f64 * (self.range.1 - self.range.0)
    }

    /// The first of every month inside the extent
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        let mut months = Vec::new();
        let mut month = NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), 1);
        if month.is_some_and(|m| m < self.start) {
            month = month.and_then(next_month);
        }
        while let Some(current) = month
            && current <= self.end
        {
            months.push(current);
            month = next_month(current);
        }
        months
    }

    /// Monthly ticks labelled like "Jan 2009"
    pub fn month_ticks(&self) -> Vec<Tick> {
        self.month_starts()
            .into_iter()
            .map(|date| Tick {
                position: self.map(date),
                label: date.format("%b %Y").to_string(),
            })
            .collect()
    }
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}
