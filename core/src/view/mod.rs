//! Page views: one mounted page, its dataset and its derived summaries.
//!
//! A [`PageView`] moves from `Loading` to `Ready` or `Failed` when its
//! load completes. Every load is identified by a [`LoadTicket`]; results
//! carrying an older ticket than the latest `begin_load` are dropped, so a
//! slow response can never overwrite a newer one. The summary cache is
//! rebuilt in full whenever the dataset or the filter changes.

mod charts;
mod page;
mod tables;

#[cfg(test)]
mod view_tests;

pub use charts::page_charts;
pub use page::Page;
pub use tables::page_tables;

use casualty_types::{DashboardConfig, FilterSelection};

use crate::aggregate::{AggregateConfig, Summary, aggregate};
use crate::context::DashboardConfigExt;
use crate::dataset::{Dataset, DatasetKind, LoadError, Record, spawn_load};
use crate::filter::{FilterOptions, matches};
use crate::render::{FilterControls, LOADING, PageDocument};

#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Ready(Dataset),
    /// Load failed; the page renders as empty
    Failed(String),
}

/// Identifies one load request of a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Inputs shared by the table and chart builders.
pub struct PageData<'a> {
    pub kind: DatasetKind,
    pub records: &'a [&'a Record],
    pub summary: &'a Summary,
    pub aggregate: &'a AggregateConfig,
    pub config: &'a DashboardConfig,
}

pub struct PageView {
    page: Page,
    config: DashboardConfig,
    aggregate: AggregateConfig,
    state: ViewState,
    filter: FilterSelection,
    /// Indices of the records passing the filter
    visible: Vec<usize>,
    summary: Summary,
    next_ticket: u64,
    pending: Option<LoadTicket>,
}

impl PageView {
    pub fn new(page: Page, config: &DashboardConfig) -> Self {
        Self {
            page,
            config: config.clone(),
            aggregate: AggregateConfig::from_config(config),
            state: ViewState::Loading,
            filter: FilterSelection::default(),
            visible: Vec::new(),
            summary: Summary::default(),
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            ViewState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Ticket of the load whose result is still awaited
    pub fn pending(&self) -> Option<LoadTicket> {
        self.pending
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Mount `page` and wait for its dataset.
    pub async fn load(page: Page, config: &DashboardConfig) -> Self {
        let mut view = Self::new(page, config);
        let ticket = view.begin_load();
        let kind = page.dataset_kind();
        let result = spawn_load(config.source_for(kind), kind).join().await;
        view.complete(ticket, result);
        view
    }

    /// Start a new load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending = Some(ticket);
        self.state = ViewState::Loading;
        self.recompute();
        ticket
    }

    /// Deliver a load result. Returns false when the ticket is stale and the
    /// result was discarded.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Dataset, LoadError>) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(page = %self.page, ?ticket, "discarding stale load result");
            return false;
        }
        self.pending = None;

        self.state = match result {
            Ok(dataset) => {
                tracing::info!(
                    page = %self.page,
                    records = dataset.len(),
                    source = %dataset.source,
                    "page data ready"
                );
                ViewState::Ready(dataset)
            }
            Err(e) => {
                tracing::error!(page = %self.page, error = %e, "failed to load page data");
                ViewState::Failed(e.to_string())
            }
        };
        self.recompute();
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering and derived state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_filter(&mut self, selection: FilterSelection) {
        self.filter = selection;
        self.recompute();
    }

    /// Rebuild the visible record set and every summary.
    pub fn recompute(&mut self) {
        let ViewState::Ready(dataset) = &self.state else {
            self.visible.clear();
            self.summary = Summary::default();
            return;
        };

        self.visible = dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| matches(r, dataset.kind, &self.filter))
            .map(|(i, _)| i)
            .collect();
        self.summary = aggregate(
            self.visible.iter().map(|&i| &dataset.records[i]),
            dataset.kind,
            &self.aggregate,
        );
        tracing::debug!(
            page = %self.page,
            visible = self.visible.len(),
            unmatched = self.summary.unmatched,
            "recomputed page summary"
        );
    }

    /// Records passing the filter, in original order
    pub fn visible_records(&self) -> Vec<&Record> {
        match &self.state {
            ViewState::Ready(dataset) => self.visible.iter().map(|&i| &dataset.records[i]).collect(),
            _ => Vec::new(),
        }
    }

    /// Selector values observed in the loaded dataset
    pub fn filter_options(&self) -> Option<FilterOptions> {
        self.dataset().map(FilterOptions::from_dataset)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────────────────────

    /// Describe the page for the renderers.
    pub fn document(&self) -> PageDocument {
        let title = self.page.title().to_string();
        if self.is_loading() {
            return PageDocument {
                title,
                status: Some(LOADING.to_string()),
                ..Default::default()
            };
        }

        let records = self.visible_records();
        let data = PageData {
            kind: self.page.dataset_kind(),
            records: &records,
            summary: &self.summary,
            aggregate: &self.aggregate,
            config: &self.config,
        };

        let filter = self
            .filter_options()
            .filter(|_| self.page.is_filterable() || !self.filter.is_all())
            .map(|options| FilterControls {
                category_label: data.kind.category_field().to_string(),
                options,
                selection: self.filter.clone(),
            });

        PageDocument {
            title,
            status: None,
            filter,
            tables: page_tables(self.page, &data),
            charts: page_charts(self.page, &data),
        }
    }
}
