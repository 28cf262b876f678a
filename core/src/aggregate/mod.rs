//! Aggregation of raw records into summary structures.
//!
//! Every summary shape can be produced on its own through the one-shot
//! helpers (`group_fixed`, `tally_verdicts`, ...), or all at once through
//! [`aggregate`], which walks the records a single time. Views call
//! `aggregate` again whenever their records or filter change; there is no
//! incremental update.

mod grouping;
mod timeline;
mod verdicts;


pub use grouping::{
    CategoryTable, FixedGroupOptions, FixedGrouper, OpenGrouper, arrange, claim_counts,
    group_fixed, group_open, side_of, split_totals, tally_claims,
};
pub use timeline::{DateBinner, bin_by_date, parse_date};
pub use verdicts::{VerdictTally, tally_verdicts};

use casualty_types::{
    ClaimCount, DashboardConfig, GroupSummary, SplitTotals, SummaryOrder, TimeBucket,
    VerdictSummary,
};

use crate::dataset::{DatasetKind, Record};

/// Inputs to the aggregation pipeline, derived from [`DashboardConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateConfig {
    pub table: CategoryTable,
    /// Labels left out of chart-oriented views
    pub chart_excluded: Vec<String>,
    pub date_format: String,
}

impl AggregateConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            table: CategoryTable::from_config(config),
            chart_excluded: config.chart_excluded.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

/// Every summary shape derived from one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub record_count: usize,
    /// Open-set counts of the category field, alphabetical
    pub claims: Vec<ClaimCount>,
    /// Fixed-set split, one entry per known label in enumeration order
    pub losses: Vec<GroupSummary>,
    /// Open-set split, first-seen order
    pub open_losses: Vec<GroupSummary>,
    pub verdicts: Vec<VerdictSummary>,
    /// Date buckets, chronological
    pub timeline: Vec<TimeBucket>,
    /// Records whose category matched no known label (or was blank)
    pub unmatched: usize,
    /// Records left out of `timeline` because the date did not parse
    pub unparsed_dates: usize,
}

impl Summary {
    /// Fixed-set losses arranged for a consuming view
    pub fn arranged_losses(&self, options: &FixedGroupOptions) -> Vec<GroupSummary> {
        arrange(&self.losses, options)
    }

    /// Fixed-set losses minus the chart-excluded labels
    pub fn chart_losses(&self, config: &AggregateConfig, order: SummaryOrder) -> Vec<GroupSummary> {
        self.arranged_losses(&FixedGroupOptions::ordered(order).excluding(&config.chart_excluded))
    }

    pub fn split(&self) -> SplitTotals {
        split_totals(&self.losses)
    }

    pub fn open_split(&self) -> SplitTotals {
        split_totals(&self.open_losses)
    }
}

/// Derive every summary from `records` in one pass.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    kind: DatasetKind,
    config: &AggregateConfig,
) -> Summary {
    let category_field = kind.category_field();
    let verdict_field = kind.verdict_field();
    let date_field = kind.date_field();

    let mut fixed = FixedGrouper::new(&config.table);
    let mut open = OpenGrouper::new(config.table.markers());
    let mut verdicts = VerdictTally::new();
    let mut dates = DateBinner::new(&config.date_format);
    let mut record_count = 0;

    for record in records {
        record_count += 1;
        let category = record.field(category_field);
        fixed.add(category);
        open.add(category);
        verdicts.add(record.field(verdict_field));
        dates.add(record.field(date_field), category);
    }

    let unmatched = fixed.dropped();
    let unparsed_dates = dates.unparsed();
    let open_losses = open.finish();

    if unparsed_dates > 0 {
        tracing::debug!(unparsed_dates, kind = kind.name(), "records without a usable date");
    }

    Summary {
        record_count,
        claims: claim_counts(&open_losses),
        losses: fixed.finish(),
        open_losses,
        verdicts: verdicts.finish(),
        timeline: dates.finish(),
        unmatched,
        unparsed_dates,
    }
}
