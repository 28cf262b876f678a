use hashbrown::HashMap;

use casualty_types::VerdictSummary;

use crate::dataset::Record;

/// Counts per distinct trimmed verdict; blank verdicts are skipped.
#[derive(Debug, Clone, Default)]
pub struct VerdictTally {
    verdicts: Vec<VerdictSummary>,
    index: HashMap<String, usize>,
}

impl VerdictTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, raw: &str) {
        let verdict = raw.trim();
        if verdict.is_empty() {
            return;
        }
        match self.index.get(verdict) {
            Some(&slot) => self.verdicts[slot].count += 1,
            None => {
                self.index.insert(verdict.to_string(), self.verdicts.len());
                self.verdicts.push(VerdictSummary {
                    verdict: verdict.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Summaries in first-seen order
    pub fn finish(self) -> Vec<VerdictSummary> {
        self.verdicts
    }
}

pub fn tally_verdicts<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
) -> Vec<VerdictSummary> {
    let mut tally = VerdictTally::new();
    for record in records {
        tally.add(record.field(field));
    }
    tally.finish()
}
