//! Record filtering by category and verdict.
//!
//! Each active dimension of a [`FilterSelection`] must match the record's
//! field exactly. An empty selection value disables that dimension.

use hashbrown::HashSet;

use casualty_types::FilterSelection;

use crate::dataset::{Dataset, DatasetKind, Record};

/// True when `record` satisfies every active dimension of `selection`.
pub fn matches(record: &Record, kind: DatasetKind, selection: &FilterSelection) -> bool {
    if let Some(category) = selection.category()
        && record.field(kind.category_field()) != category
    {
        return false;
    }
    if let Some(verdict) = selection.verdict()
        && record.field(kind.verdict_field()) != verdict
    {
        return false;
    }
    true
}

/// Records of `dataset` matching `selection`, in original order.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    dataset
        .records
        .iter()
        .filter(|r| matches(r, dataset.kind, selection))
        .collect()
}

/// Distinct non-blank values of `field` in `dataset`, in first-seen order.
pub fn options(dataset: &Dataset, field: &str) -> Vec<String> {
    distinct_values(&dataset.records, field)
}

/// Distinct non-blank raw values of `field`, in first-seen order.
pub fn distinct_values<'a>(records: impl IntoIterator<Item = &'a Record>, field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = record.field(field);
        if value.trim().is_empty() {
            continue;
        }
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Values offered by the category and verdict selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub verdicts: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            categories: options(dataset, dataset.kind.category_field()),
            verdicts: options(dataset, dataset.kind.verdict_field()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.verdicts.is_empty()
    }
}
