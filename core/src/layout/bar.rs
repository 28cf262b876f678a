use casualty_types::{ChartFrame, Color};

use super::palette::CategoryColors;
use super::scale::{BandScale, DEFAULT_TICK_COUNT, LinearScale, Tick};

/// One rectangle of a bar chart, in frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub frame: ChartFrame,
    pub bars: Vec<Bar>,
    /// Band centres along the bottom axis
    pub x_ticks: Vec<Tick>,
    /// Value ticks along the left axis
    pub y_ticks: Vec<Tick>,
    /// y of the value-axis baseline
    pub baseline: f64,
}

/// Vertical bars over a band scale, heights proportional to value on a
/// niced linear scale starting at zero.
pub fn bar_layout<S: AsRef<str>>(
    entries: &[(S, u64)],
    colors: &impl CategoryColors,
    frame: &ChartFrame,
    padding: f64,
) -> BarLayout {
    let m = frame.margin;
    let x = BandScale::new(
        entries.iter().map(|(l, _)| l.as_ref().to_string()).collect(),
        (m.left, frame.width - m.right),
        padding,
    );
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let y = LinearScale::from_max(max as f64, (frame.height - m.bottom, m.top)).nice(DEFAULT_TICK_COUNT);
    let baseline = y.map(0.0);

    let bars = entries
        .iter()
        .filter_map(|(label, value)| {
            let label = label.as_ref();
            let left = x.position(label)?;
            let top = y.map(*value as f64);
            Some(Bar {
                label: label.to_string(),
                value: *value,
                x: left,
                y: top,
                width: x.bandwidth(),
                height: baseline - top,
                color: colors.color(label),
            })
        })
        .collect();

    BarLayout {
        frame: *frame,
        bars,
        x_ticks: x.ticks(),
        y_ticks: y.ticks(DEFAULT_TICK_COUNT),
        baseline,
    }
}
