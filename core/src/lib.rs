pub mod aggregate;
pub mod context;
pub mod dataset;
pub mod filter;
pub mod layout;
pub mod render;
pub mod view;

// Re-exports for convenience
pub use aggregate::{AggregateConfig, Summary, aggregate};
pub use context::{BackgroundTasks, ConfigError, DashboardConfig, DashboardConfigExt, PendingLoad};
pub use dataset::{Dataset, DatasetKind, LoadError, LoadHandle, Record, Source, spawn_load};
pub use filter::FilterOptions;
pub use render::{Chart, ChartBody, PageDocument, Table};
pub use view::{LoadTicket, Page, PageView, ViewState};
