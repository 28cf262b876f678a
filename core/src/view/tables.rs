//! Tables shown by each page.

use casualty_types::{GroupSummary, SummaryOrder};

use super::{Page, PageData};
use crate::aggregate::{FixedGroupOptions, arrange};
use crate::dataset::fields::claims;
use crate::layout::{SPLIT_CIVILIAN, SPLIT_MILITIA, percent};
use crate::render::Table;

/// Column order of the records table
const RECORD_COLUMNS: [&str; 8] = [
    claims::NAME,
    claims::ARABIC_NAME,
    claims::DATE_OF_DEATH,
    claims::ORIENT_AFFILIATION,
    claims::ORIENT_ADDITIONAL_INFO,
    claims::PROFILE,
    claims::VERDICT,
    claims::ADDITIONAL_INFO,
];

pub fn page_tables(page: Page, data: &PageData<'_>) -> Vec<Table> {
    match page {
        Page::Records => vec![records_table(data)],
        Page::Organizations => vec![claims_table(data), loss_table(data)],
        Page::AffiliationLosses => vec![militia_share_table(data)],
        Page::CivilianLosses => vec![split_table(data)],
        Page::Verdicts => vec![verdict_table(data)],
        Page::Timeline => vec![timeline_table(data)],
    }
}

fn records_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new("Claims", RECORD_COLUMNS);
    for record in data.records {
        table.push_row(RECORD_COLUMNS.iter().map(|c| record.field(c).to_string()).collect());
    }
    table
}

fn claims_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new("Orient Claims", [data.kind.category_field(), "Count"]);
    for claim in &data.summary.claims {
        table.push_row(vec![claim.claim.clone(), claim.count.to_string()]);
    }
    table
}

fn loss_rows(table: &mut Table, summaries: &[GroupSummary]) {
    for s in summaries {
        table.push_row(vec![
            s.category.clone(),
            s.militia_count.to_string(),
            s.civilian_count.to_string(),
            s.total.to_string(),
        ]);
    }
}

fn loss_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new(
        "Loss Summary",
        [data.kind.category_field(), "Militia", "Civilian", "Total"],
    );
    if data.summary.record_count > 0 {
        let losses = arrange(
            &data.summary.losses,
            &FixedGroupOptions::ordered(SummaryOrder::Alphabetical),
        );
        loss_rows(&mut table, &losses);
    }
    table
}

fn militia_share_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new(
        "Militia Losses",
        [data.kind.category_field(), "Militia", "Share"],
    );
    if data.summary.record_count == 0 {
        return table;
    }
    let losses = data
        .summary
        .chart_losses(data.aggregate, SummaryOrder::MilitiaAscending);
    let total: u64 = losses.iter().map(|s| s.militia_count).sum();
    for s in &losses {
        table.push_row(vec![
            s.category.clone(),
            s.militia_count.to_string(),
            format!("{:.1}%", percent(s.militia_count, total)),
        ]);
    }
    table
}

fn split_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new("Casualty Split", ["Side", "Deaths", "Share"]);
    let split = data.summary.open_split();
    if split.total() == 0 {
        return table;
    }
    for (side, count) in [(SPLIT_MILITIA, split.militia), (SPLIT_CIVILIAN, split.civilian)] {
        table.push_row(vec![
            side.to_string(),
            count.to_string(),
            format!("{:.1}%", percent(count, split.total())),
        ]);
    }
    table
}

fn verdict_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new("Verdicts", ["Verdict", "Count"]);
    for v in &data.summary.verdicts {
        table.push_row(vec![v.verdict.clone(), v.count.to_string()]);
    }
    table
}

fn timeline_table(data: &PageData<'_>) -> Table {
    let mut table = Table::new("Deaths by Date", ["Date", data.kind.category_field(), "Deaths"]);
    for bucket in &data.summary.timeline {
        let date = bucket.date.to_string();
        for entry in &bucket.counts {
            table.push_row(vec![date.clone(), entry.category.clone(), entry.count.to_string()]);
        }
    }
    table
}
