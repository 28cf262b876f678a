//! Output renderers.
//!
//! Views describe what a page shows as a [`PageDocument`]; the submodules
//! turn that into SVG charts, a self-contained HTML page or plain-text
//! tables for the terminal. Rendering never touches summaries or records.

pub mod html;
pub mod svg;
pub mod text;


use casualty_types::{Color, FilterSelection};

use crate::filter::FilterOptions;
use crate::layout::{BarLayout, PieLayout, TimeChartLayout};

/// Placeholder shown for tables and charts without data
pub const NO_DATA: &str = "No data available";
pub const LOADING: &str = "Loading…";

/// A titled table of preformatted cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(title: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub layout: PieLayout,
    /// One fill per slice, in slice order
    pub fills: Vec<Color>,
    pub leader_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Pie(PieChart),
    Bar(BarLayout),
    Timeline(TimeChartLayout),
    /// Nothing to draw
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub body: ChartBody,
}

impl Chart {
    pub fn new(title: impl Into<String>, body: ChartBody) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// Number of marks (slices, bars) the chart draws
    pub fn mark_count(&self) -> usize {
        match &self.body {
            ChartBody::Pie(pie) => pie.layout.slices.len(),
            ChartBody::Bar(bar) => bar.bars.len(),
            ChartBody::Timeline(timeline) => timeline.bars.len(),
            ChartBody::Empty => 0,
        }
    }
}

/// Selector state rendered above filterable tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterControls {
    /// Caption of the category selector (the dataset's category field)
    pub category_label: String,
    pub options: FilterOptions,
    pub selection: FilterSelection,
}

/// Everything a page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDocument {
    pub title: String,
    /// Shown instead of content while loading
    pub status: Option<String>,
    pub filter: Option<FilterControls>,
    pub tables: Vec<Table>,
    pub charts: Vec<Chart>,
}

/// Escape text for XML/HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
