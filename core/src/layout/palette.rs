//! Category to color assignment.

use casualty_types::{Color, DashboardConfig, palette};

/// Anything that can pick a fill for a category label.
pub trait CategoryColors {
    fn color(&self, category: &str) -> Color;
}

/// Explicit label → color table with a fallback for unknown labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, Color)>,
    fallback: Color,
}

impl ColorMap {
    pub fn new(entries: Vec<(String, Color)>, fallback: Color) -> Self {
        Self { entries, fallback }
    }

    /// Colors of the configured category table
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config
                .categories
                .iter()
                .map(|c| (c.label.clone(), c.color))
                .collect(),
            config.fallback_color,
        )
    }

    /// Colors for the two halves of the militia/civilian split
    pub fn split(config: &DashboardConfig) -> Self {
        Self::new(
            vec![
                (SPLIT_MILITIA.to_string(), config.militia_color),
                (SPLIT_CIVILIAN.to_string(), config.civilian_color),
            ],
            config.fallback_color,
        )
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }
}

pub const SPLIT_MILITIA: &str = "Militia";
pub const SPLIT_CIVILIAN: &str = "Civilian";

impl CategoryColors for ColorMap {
    fn color(&self, category: &str) -> Color {
        self.entries
            .iter()
            .find(|(label, _)| label == category)
            .map(|(_, color)| *color)
            .unwrap_or(self.fallback)
    }
}

/// Colors assigned from a fixed scheme in domain order, cycling when the
/// domain outgrows the scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColors {
    domain: Vec<String>,
    scheme: &'static [Color],
}

impl OrdinalColors {
    pub fn new(domain: Vec<String>) -> Self {
        Self::with_scheme(domain, &palette::CATEGORY10)
    }

    pub fn with_scheme(domain: Vec<String>, scheme: &'static [Color]) -> Self {
        Self { domain, scheme }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

impl CategoryColors for OrdinalColors {
    /// Labels outside the domain get the color the next domain entry
    /// would receive.
    fn color(&self, category: &str) -> Color {
        if self.scheme.is_empty() {
            return palette::GREY;
        }
        let slot = self
            .domain
            .iter()
            .position(|d| d == category)
            .unwrap_or(self.domain.len());
        self.scheme[slot % self.scheme.len()]
    }
}
