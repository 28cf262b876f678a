//! Dashboard configuration
//!
//! This module re-exports the shared config types from casualty-types and
//! provides persistence for [`DashboardConfig`].

use std::path::{Path, PathBuf};

pub use casualty_types::{CategoryDef, ChartFrame, ChartSettings, DashboardConfig, Margin};

use super::error::ConfigError;
use crate::dataset::{DatasetKind, Source};

/// confy application name; the file lives under the platform config dir
pub const APP_NAME: &str = "casualty-dash";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for DashboardConfig persistence and source lookup
pub trait DashboardConfigExt: Sized {
    fn load() -> Self;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn source_for(&self, kind: DatasetKind) -> Source;
}

impl DashboardConfigExt for DashboardConfig {
    /// Load from the default location. A missing file is created with
    /// defaults; an unreadable one falls back to defaults.
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load configuration, using defaults");
            Self::default()
        })
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    fn source_for(&self, kind: DatasetKind) -> Source {
        match kind {
            DatasetKind::Claims => Source::parse(&self.claims_source),
            DatasetKind::Timeline => Source::parse(&self.timeline_source),
        }
    }
}
