mod background_tasks;
mod config;
mod error;

pub use background_tasks::{BackgroundTasks, PendingLoad};
pub use config::{
    APP_NAME, CategoryDef, ChartFrame, ChartSettings, DashboardConfig, DashboardConfigExt, Margin,
};
pub use error::ConfigError;
