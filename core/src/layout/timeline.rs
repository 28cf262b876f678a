//! Grouped bars per date bucket.

use chrono::NaiveDate;

use casualty_types::{ChartFrame, Color, TimeBucket};

use super::palette::{CategoryColors, OrdinalColors};
use super::scale::{DEFAULT_TICK_COUNT, LinearScale, Tick, TimeScale};

/// Vertical distance between legend rows
pub const LEGEND_ROW_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeBar {
    pub date: NaiveDate,
    pub category: String,
    pub count: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub category: String,
    pub color: Color,
    /// Row offset from the top of the chart
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeChartLayout {
    pub frame: ChartFrame,
    pub bar_width: f64,
    pub bars: Vec<TimeBar>,
    pub legend: Vec<LegendEntry>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub baseline: f64,
}

/// "Date: Dec 27, 2008\nClaim: Hamas\nDeaths: 3"
pub fn bar_tooltip(date: NaiveDate, category: &str, count: u64) -> String {
    format!(
        "Date: {}\nClaim: {}\nDeaths: {}",
        date.format("%b %d, %Y"),
        category,
        count
    )
}

/// Lay out one sub-bar per (date, category) pair.
///
/// Sub-bar width is the plot width divided by the number of buckets and
/// then by `divisor`. The sub-bars of a date sit side by side, centred on
/// the date's x position. Returns None when there are no buckets.
pub fn grouped_time_bars(
    buckets: &[TimeBucket],
    frame: &ChartFrame,
    divisor: f64,
    colors: &OrdinalColors,
) -> Option<TimeChartLayout> {
    let m = frame.margin;
    let x = TimeScale::from_dates(
        buckets.iter().map(|b| b.date),
        (m.left, frame.width - m.right),
    )?;
    let max = buckets.iter().map(TimeBucket::max_count).max().unwrap_or(0);
    let y = LinearScale::from_max(max as f64, (frame.height - m.bottom, m.top)).nice(DEFAULT_TICK_COUNT);
    let baseline = y.map(0.0);

    let mut ordered: Vec<&TimeBucket> = buckets.iter().collect();
    ordered.sort_by_key(|b| b.date);

    let divisor = if divisor > 0.0 { divisor } else { 1.0 };
    let bar_width = frame.plot_width() / ordered.len() as f64 / divisor;

    let mut bars = Vec::new();
    for bucket in ordered {
        let center = x.map(bucket.date);
        let group_width = bar_width * bucket.counts.len() as f64;
        for (i, entry) in bucket.counts.iter().enumerate() {
            let top = y.map(entry.count as f64);
            bars.push(TimeBar {
                date: bucket.date,
                category: entry.category.clone(),
                count: entry.count,
                x: center + i as f64 * bar_width - group_width / 2.0,
                y: top,
                width: bar_width,
                height: baseline - top,
                color: colors.color(&entry.category),
                tooltip: bar_tooltip(bucket.date, &entry.category, entry.count),
            });
        }
    }

    let legend = colors
        .domain()
        .iter()
        .enumerate()
        .map(|(i, category)| LegendEntry {
            category: category.clone(),
            color: colors.color(category),
            y: i as f64 * LEGEND_ROW_HEIGHT,
        })
        .collect();

    Some(TimeChartLayout {
        frame: *frame,
        bar_width,
        bars,
        legend,
        x_ticks: x.month_ticks(),
        y_ticks: y.ticks(DEFAULT_TICK_COUNT),
        baseline,
    })
}
