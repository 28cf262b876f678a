//! Chart geometry.
//!
//! Everything here is pure: summaries go in, positions and shapes come out,
//! and nothing is retained between calls. Renderers turn the resulting
//! layouts into SVG.

mod bar;
mod palette;
mod pie;
mod scale;
mod timeline;

#[cfg(test)]
mod layout_tests;

use std::fmt;

pub use bar::{Bar, BarLayout, bar_layout};
pub use palette::{CategoryColors, ColorMap, OrdinalColors, SPLIT_CIVILIAN, SPLIT_MILITIA};
pub use pie::{
    LabelPlacement, PieLabel, PieLayout, PieSlice, TextAnchor, inside_labels, outside_labels,
    percent, pie_layout, pie_slices, point_at, resolve_overlaps, slice_label,
};
pub use scale::{
    BandScale, DEFAULT_TICK_COUNT, LinearScale, Tick, TimeScale, format_tick, tick_increment,
    ticks,
};
pub use timeline::{
    LEGEND_ROW_HEIGHT, LegendEntry, TimeBar, TimeChartLayout, bar_tooltip, grouped_time_bars,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// "x,y" with three decimals, as used in SVG attribute lists
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3},{:.3}", self.x, self.y)
    }
}
