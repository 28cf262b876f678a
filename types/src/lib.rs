//! Shared configuration and summary types for casualty-dash
//!
//! This crate contains the serializable types shared between the
//! aggregation/layout core (casualty-core) and the REPL front end
//! (casualty-cli).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Summary Types (produced by the aggregator, consumed by layout and views)
// ─────────────────────────────────────────────────────────────────────────────

/// Which half of the militia/civilian split a record lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Militia,
    Civilian,
}

/// Militia/civilian breakdown for one category.
///
/// `total` is always `militia_count + civilian_count`; use [`GroupSummary::record`]
/// to keep the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub category: String,
    pub militia_count: u64,
    pub civilian_count: u64,
    pub total: u64,
}

impl GroupSummary {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            militia_count: 0,
            civilian_count: 0,
            total: 0,
        }
    }

    /// Count one record on the given side.
    pub fn record(&mut self, side: Side) {
        match side {
            Side::Militia => self.militia_count += 1,
            Side::Civilian => self.civilian_count += 1,
        }
        self.total += 1;
    }
}

/// Occurrences of one raw category value (open-set, no split).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCount {
    pub claim: String,
    pub count: u64,
}

/// Occurrences of one distinct verdict string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub verdict: String,
    pub count: u64,
}

/// Militia and civilian totals summed across a set of group summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTotals {
    pub militia: u64,
    pub civilian: u64,
}

impl SplitTotals {
    pub fn total(&self) -> u64 {
        self.militia + self.civilian
    }
}

/// Count for one category inside a time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// All records sharing one parsed date of death, keyed by category.
/// Categories keep the order in which they were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub date: NaiveDate,
    pub counts: Vec<CategoryCount>,
}

impl TimeBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            counts: Vec::new(),
        }
    }

    pub fn count_for(&self, category: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Largest single-category count in this bucket
    pub fn max_count(&self) -> u64 {
        self.counts.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Ordering applied to a finished group summary list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrder {
    /// Keep category enumeration order
    #[default]
    Input,
    /// Smallest militia count first (stable for ties)
    MilitiaAscending,
    /// Case-insensitive by category label
    Alphabetical,
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Active filter values for a record view. An empty string means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub verdict: String,
}

impl FilterSelection {
    pub fn category(&self) -> Option<&str> {
        (!self.category.is_empty()).then_some(self.category.as_str())
    }

    pub fn verdict(&self) -> Option<&str> {
        (!self.verdict.is_empty()).then_some(self.verdict.as_str())
    }

    /// True when no dimension is active
    pub fn is_all(&self) -> bool {
        self.category.is_empty() && self.verdict.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Format a color for SVG/CSS attributes.
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("rgba({},{},{},{:.3})", r, g, b, a as f64 / 255.0)
    }
}

/// Named colors used by the default category table and charts
pub mod palette {
    use super::Color;

    pub const WHITE: Color = [255, 255, 255, 255];
    pub const YELLOW: Color = [255, 255, 0, 255];
    pub const GREEN: Color = [0, 128, 0, 255];
    pub const BLACK: Color = [0, 0, 0, 255];
    pub const GREY: Color = [128, 128, 128, 255];
    pub const RED: Color = [255, 0, 0, 255];
    pub const BLUE: Color = [0, 0, 255, 255];
    pub const ORANGE: Color = [255, 165, 0, 255];
    pub const LIGHT_BLUE: Color = [173, 216, 230, 255];

    /// The ten-color categorical scheme (d3 "category10")
    pub const CATEGORY10: [Color; 10] = [
        [0x1f, 0x77, 0xb4, 255],
        [0xff, 0x7f, 0x0e, 255],
        [0x2c, 0xa0, 0x2c, 255],
        [0xd6, 0x27, 0x28, 255],
        [0x94, 0x67, 0xbd, 255],
        [0x8c, 0x56, 0x4b, 255],
        [0xe3, 0x77, 0xc2, 255],
        [0x7f, 0x7f, 0x7f, 255],
        [0xbc, 0xbd, 0x22, 255],
        [0x17, 0xbe, 0xcf, 255],
    ];
}

// ─────────────────────────────────────────────────────────────────────────────
// Category Table
// ─────────────────────────────────────────────────────────────────────────────

/// One known faction label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub label: String,
    pub color: Color,
    /// When set, a field containing this label also marks the record civilian
    #[serde(default)]
    pub civilian_synonym: bool,
}

impl CategoryDef {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            civilian_synonym: false,
        }
    }

    pub fn civilian_synonym(mut self) -> Self {
        self.civilian_synonym = true;
        self
    }
}

fn default_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("Army of Islam", palette::WHITE),
        CategoryDef::new("Fatah", palette::YELLOW),
        CategoryDef::new("Hamas", palette::GREEN),
        CategoryDef::new("PIJ", palette::BLACK),
        CategoryDef::new("PRC", palette::BLACK),
        CategoryDef::new("Unaffiliated", palette::GREY).civilian_synonym(),
        CategoryDef::new("Warrior", palette::RED),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Chart Settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Outer size of a chart and the margin reserved for axes/labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartFrame {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Radius of a pie that fits the plot area
    pub fn pie_radius(&self) -> f64 {
        self.plot_width().min(self.plot_height()) / 2.0
    }
}

fn default_pie_frame() -> ChartFrame {
    ChartFrame {
        width: 800.0,
        height: 400.0,
        margin: Margin::new(50.0, 150.0, 50.0, 50.0),
    }
}

fn default_bar_frame() -> ChartFrame {
    ChartFrame {
        width: 800.0,
        height: 400.0,
        margin: Margin::new(20.0, 30.0, 40.0, 40.0),
    }
}

fn default_timeline_frame() -> ChartFrame {
    ChartFrame {
        width: 2000.0,
        height: 500.0,
        margin: Margin::new(20.0, 30.0, 50.0, 50.0),
    }
}

fn default_label_spacing() -> f64 {
    20.0
}
fn default_band_padding() -> f64 {
    0.1
}
fn default_time_bar_divisor() -> f64 {
    4.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_pie_frame")]
    pub pie: ChartFrame,
    #[serde(default = "default_bar_frame")]
    pub bar: ChartFrame,
    #[serde(default = "default_timeline_frame")]
    pub timeline: ChartFrame,
    /// Minimum vertical distance between outside pie labels
    #[serde(default = "default_label_spacing")]
    pub label_spacing: f64,
    /// Inner and outer padding of band scales, as a fraction of the step
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    /// Sub-bar width = plot width / date buckets / divisor
    #[serde(default = "default_time_bar_divisor")]
    pub time_bar_divisor: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            pie: default_pie_frame(),
            bar: default_bar_frame(),
            timeline: default_timeline_frame(),
            label_spacing: default_label_spacing(),
            band_padding: default_band_padding(),
            time_bar_divisor: default_time_bar_divisor(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard Config
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path or URL of the claims CSV (Orient Affiliation shape)
    pub claims_source: String,
    /// Path or URL of the timeline CSV (Orient claim shape)
    pub timeline_source: String,
    /// Where `export` writes rendered pages
    pub output_directory: String,
    /// Known categories, in match priority order
    pub categories: Vec<CategoryDef>,
    /// Substrings marking a record civilian, besides synonym labels
    pub civilian_keywords: Vec<String>,
    /// Labels left out of chart-oriented views
    pub chart_excluded: Vec<String>,
    pub fallback_color: Color,
    pub militia_color: Color,
    pub civilian_color: Color,
    pub leader_line_color: Color,
    pub date_format: String,
    pub charts: ChartSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            claims_source: "lonerbox_palestinian_police_data.csv".to_string(),
            timeline_source: "cast_lead_lonerbox_data.csv".to_string(),
            output_directory: "out".to_string(),
            categories: default_categories(),
            civilian_keywords: vec!["Civilian".to_string()],
            chart_excluded: vec!["Unaffiliated".to_string()],
            fallback_color: palette::GREY,
            militia_color: palette::BLUE,
            civilian_color: palette::ORANGE,
            leader_line_color: palette::LIGHT_BLUE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            charts: ChartSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Every substring that classifies a matched record as civilian:
    /// the configured keywords followed by the synonym labels.
    pub fn civilian_markers(&self) -> Vec<String> {
        let mut markers = self.civilian_keywords.clone();
        for def in self.categories.iter().filter(|c| c.civilian_synonym) {
            if !markers.contains(&def.label) {
                markers.push(def.label.clone());
            }
        }
        markers
    }

    /// Configured color for a category label, or the fallback
    pub fn color_for(&self, label: &str) -> Color {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.color)
            .unwrap_or(self.fallback_color)
    }

    pub fn category_labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }
}
