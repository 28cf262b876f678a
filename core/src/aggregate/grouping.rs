//! Categorical grouping with the militia/civilian split.

use std::cmp::Ordering;

use hashbrown::HashMap;

use casualty_types::{
    ClaimCount, DashboardConfig, GroupSummary, Side, SplitTotals, SummaryOrder,
};

use crate::dataset::Record;

// ─────────────────────────────────────────────────────────────────────────────
// Category Table
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered set of known labels plus the substrings that mark a record
/// civilian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    labels: Vec<String>,
    markers: Vec<String>,
}

impl CategoryTable {
    pub fn new(labels: Vec<String>, markers: Vec<String>) -> Self {
        Self { labels, markers }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.categories.iter().map(|c| c.label.clone()).collect(),
            config.civilian_markers(),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Index of the first label contained in `value`.
    ///
    /// Matching is by substring in enumeration order, so a label listed
    /// earlier wins over any later label the text also contains.
    pub fn match_label(&self, value: &str) -> Option<usize> {
        self.labels.iter().position(|label| value.contains(label.as_str()))
    }

    pub fn side(&self, value: &str) -> Side {
        side_of(value, &self.markers)
    }

    /// Trim a raw category field and resolve it to (label index, side).
    /// Blank or unmatched values resolve to None.
    pub fn classify(&self, raw: &str) -> Option<(usize, Side)> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        let index = self.match_label(value)?;
        Some((index, self.side(value)))
    }
}

/// Civilian when the value contains any marker, militia otherwise.
pub fn side_of(value: &str, markers: &[String]) -> Side {
    if markers.iter().any(|m| value.contains(m.as_str())) {
        Side::Civilian
    } else {
        Side::Militia
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accumulators
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-set grouping: one summary per known label, zero counts included.
#[derive(Debug, Clone)]
pub struct FixedGrouper<'t> {
    table: &'t CategoryTable,
    summaries: Vec<GroupSummary>,
    dropped: usize,
}

impl<'t> FixedGrouper<'t> {
    pub fn new(table: &'t CategoryTable) -> Self {
        Self {
            table,
            summaries: table.labels.iter().map(GroupSummary::new).collect(),
            dropped: 0,
        }
    }

    pub fn add(&mut self, raw: &str) {
        match self.table.classify(raw) {
            Some((index, side)) => self.summaries[index].record(side),
            None => self.dropped += 1,
        }
    }

    /// Records that were blank or matched no label
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> Vec<GroupSummary> {
        self.summaries
    }
}

/// Open-set grouping: every distinct trimmed value is its own category,
/// kept in first-seen order.
#[derive(Debug, Clone)]
pub struct OpenGrouper<'m> {
    markers: &'m [String],
    summaries: Vec<GroupSummary>,
    index: HashMap<String, usize>,
}

impl<'m> OpenGrouper<'m> {
    pub fn new(markers: &'m [String]) -> Self {
        Self {
            markers,
            summaries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        let side = side_of(value, self.markers);
        let slot = match self.index.get(value) {
            Some(&slot) => slot,
            None => {
                self.summaries.push(GroupSummary::new(value));
                self.index.insert(value.to_string(), self.summaries.len() - 1);
                self.summaries.len() - 1
            }
        };
        self.summaries[slot].record(side);
    }

    pub fn finish(self) -> Vec<GroupSummary> {
        self.summaries
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-set grouping of `field` over `records`, in enumeration order.
pub fn group_fixed<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
    table: &CategoryTable,
) -> Vec<GroupSummary> {
    let mut grouper = FixedGrouper::new(table);
    for record in records {
        grouper.add(record.field(field));
    }
    grouper.finish()
}

/// Open-set grouping of `field` over `records`, in first-seen order.
pub fn group_open<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
    markers: &[String],
) -> Vec<GroupSummary> {
    let mut grouper = OpenGrouper::new(markers);
    for record in records {
        grouper.add(record.field(field));
    }
    grouper.finish()
}

/// Occurrences of each distinct trimmed value, sorted alphabetically.
pub fn tally_claims<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
) -> Vec<ClaimCount> {
    claim_counts(&group_open(records, field, &[]))
}

/// Collapse an open-set grouping into alphabetical claim counts.
pub fn claim_counts(groups: &[GroupSummary]) -> Vec<ClaimCount> {
    let mut claims: Vec<ClaimCount> = groups
        .iter()
        .map(|g| ClaimCount {
            claim: g.category.clone(),
            count: g.total,
        })
        .collect();
    claims.sort_by(|a, b| alphabetical(&a.claim, &b.claim));
    claims
}

pub fn split_totals(summaries: &[GroupSummary]) -> SplitTotals {
    summaries
        .iter()
        .fold(SplitTotals::default(), |acc, s| SplitTotals {
            militia: acc.militia + s.militia_count,
            civilian: acc.civilian + s.civilian_count,
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Presentation Options
// ─────────────────────────────────────────────────────────────────────────────

/// How a consuming view wants a finished summary list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedGroupOptions {
    /// Labels dropped from the output
    pub exclude: Vec<String>,
    pub order: SummaryOrder,
}

impl FixedGroupOptions {
    pub fn ordered(order: SummaryOrder) -> Self {
        Self {
            exclude: Vec::new(),
            order,
        }
    }

    pub fn excluding(mut self, labels: &[String]) -> Self {
        self.exclude.extend(labels.iter().cloned());
        self
    }
}

/// Apply exclusion and ordering to a summary list.
pub fn arrange(summaries: &[GroupSummary], options: &FixedGroupOptions) -> Vec<GroupSummary> {
    let mut arranged: Vec<GroupSummary> = summaries
        .iter()
        .filter(|s| !options.exclude.contains(&s.category))
        .cloned()
        .collect();

    match options.order {
        SummaryOrder::Input => {}
        SummaryOrder::MilitiaAscending => arranged.sort_by_key(|s| s.militia_count),
        SummaryOrder::Alphabetical => arranged.sort_by(|a, b| alphabetical(&a.category, &b.category)),
    }
    arranged
}

/// Case-insensitive comparison, falling back to byte order for ties.
fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
