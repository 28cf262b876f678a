//! Date-binned tallies for the grouped time chart.

use chrono::NaiveDate;
use hashbrown::HashMap;

use casualty_types::{CategoryCount, TimeBucket};

use crate::dataset::Record;

/// Parse a date field under a fixed format. Surrounding whitespace is
/// ignored; anything else that does not fit the format is rejected.
pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, format).ok()
}

/// Groups records by (parsed date, raw category value).
#[derive(Debug, Clone)]
pub struct DateBinner<'f> {
    format: &'f str,
    buckets: Vec<TimeBucket>,
    index: HashMap<NaiveDate, usize>,
    unparsed: usize,
}

impl<'f> DateBinner<'f> {
    pub fn new(format: &'f str) -> Self {
        Self {
            format,
            buckets: Vec::new(),
            index: HashMap::new(),
            unparsed: 0,
        }
    }

    /// Count one record. The category key is the raw field value; records
    /// with a blank category or an unparseable date are left out.
    pub fn add(&mut self, raw_date: &str, raw_category: &str) {
        if raw_category.trim().is_empty() {
            return;
        }
        let Some(date) = parse_date(raw_date, self.format) else {
            self.unparsed += 1;
            return;
        };

        let slot = match self.index.get(&date) {
            Some(&slot) => slot,
            None => {
                self.buckets.push(TimeBucket::new(date));
                self.index.insert(date, self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };
        let bucket = &mut self.buckets[slot];
        match bucket.counts.iter_mut().find(|c| c.category == raw_category) {
            Some(entry) => entry.count += 1,
            None => bucket.counts.push(CategoryCount {
                category: raw_category.to_string(),
                count: 1,
            }),
        }
    }

    /// Records dropped because their date did not parse
    pub fn unparsed(&self) -> usize {
        self.unparsed
    }

    /// Buckets in chronological order
    pub fn finish(mut self) -> Vec<TimeBucket> {
        self.buckets.sort_by_key(|b| b.date);
        self.buckets
    }
}

pub fn bin_by_date<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    date_field: &str,
    category_field: &str,
    format: &str,
) -> Vec<TimeBucket> {
    let mut binner = DateBinner::new(format);
    for record in records {
        binner.add(record.field(date_field), record.field(category_field));
    }
    binner.finish()
}
