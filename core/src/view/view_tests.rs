//! Tests for page views: load tickets, filtering and page documents

use std::sync::Arc;

use casualty_types::{DashboardConfig, FilterSelection};

use super::*;
use crate::dataset::fields::claims;
use crate::render::ChartBody;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn claims_dataset(rows: &[(&str, &str, &str)]) -> Dataset {
    let headers: Arc<[String]> = DatasetKind::Claims
        .expected_headers()
        .iter()
        .map(|h| h.to_string())
        .collect();
    let records = rows
        .iter()
        .map(|(name, affiliation, verdict)| {
            let values = headers
                .iter()
                .map(|h| match h.as_str() {
                    claims::NAME => name.to_string(),
                    claims::DATE_OF_DEATH => "27/12/2008".to_string(),
                    claims::ORIENT_AFFILIATION => affiliation.to_string(),
                    claims::VERDICT => verdict.to_string(),
                    _ => String::new(),
                })
                .collect();
            Record::new(headers.clone(), values)
        })
        .collect();
    Dataset {
        kind: DatasetKind::Claims,
        source: "claims.csv".to_string(),
        headers,
        records,
    }
}

fn sample() -> Dataset {
    claims_dataset(&[
        ("Ahmad", "Hamas", "Combatant"),
        ("Basel", "Hamas (Civilian)", "Civilian"),
        ("Fadi", "Fatah", "Combatant"),
        ("Hani", "PIJ", "Combatant"),
        ("Jamal", "Unaffiliated", "Civilian"),
        ("Karim", "Hamas", "Combatant"),
        ("Omar", "Fatah", "Civilian"),
    ])
}

fn ready(page: Page, dataset: Dataset) -> PageView {
    let mut view = PageView::new(page, &DashboardConfig::default());
    let ticket = view.begin_load();
    assert!(view.complete(ticket, Ok(dataset)));
    view
}

fn table<'a>(doc: &'a PageDocument, title: &str) -> &'a crate::render::Table {
    doc.tables
        .iter()
        .find(|t| t.title == title)
        .unwrap_or_else(|| panic!("no table titled {title}"))
}

fn first_column(table: &crate::render::Table) -> Vec<&str> {
    table.rows.iter().map(|r| r[0].as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Pages
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_page_from_str_accepts_slug_variants() {
    assert_eq!("records".parse::<Page>(), Ok(Page::Records));
    assert_eq!("Affiliation-Losses".parse::<Page>(), Ok(Page::AffiliationLosses));
    assert_eq!(" civilian_losses ".parse::<Page>(), Ok(Page::CivilianLosses));

    let err = "casualties".parse::<Page>().unwrap_err();
    assert!(err.contains("casualties"));
    assert!(err.contains("timeline"));
}

#[test]
fn test_page_slug_round_trips_and_kinds() {
    for page in Page::ALL {
        assert_eq!(page.to_string().parse::<Page>(), Ok(page));
    }
    assert_eq!(Page::Verdicts.dataset_kind(), DatasetKind::Timeline);
    assert_eq!(Page::Timeline.dataset_kind(), DatasetKind::Timeline);
    assert_eq!(Page::Organizations.dataset_kind(), DatasetKind::Claims);
    assert!(Page::Records.is_filterable());
    assert!(!Page::Verdicts.is_filterable());
}

// ═══════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_new_view_is_loading_with_loading_status() {
    let view = PageView::new(Page::Organizations, &DashboardConfig::default());
    assert!(view.is_loading());
    assert!(view.dataset().is_none());

    let doc = view.document();
    assert_eq!(doc.title, "Orient Claims Summary");
    assert_eq!(doc.status.as_deref(), Some(LOADING));
    assert!(doc.tables.is_empty());
    assert!(doc.charts.is_empty());
}

#[test]
fn test_stale_ticket_is_discarded() {
    let mut view = PageView::new(Page::Records, &DashboardConfig::default());
    let first = view.begin_load();
    let second = view.begin_load();
    assert_ne!(first, second);

    assert!(!view.complete(first, Ok(sample())));
    assert!(view.is_loading());
    assert_eq!(view.pending(), Some(second));

    assert!(view.complete(second, Ok(claims_dataset(&[("Ahmad", "Hamas", "")]))));
    assert_eq!(view.dataset().map(Dataset::len), Some(1));
    assert_eq!(view.pending(), None);

    // A late result for an already settled ticket is ignored too
    assert!(!view.complete(second, Ok(sample())));
    assert_eq!(view.dataset().map(Dataset::len), Some(1));
}

#[test]
fn test_failed_load_renders_empty_page() {
    let mut view = PageView::new(Page::Organizations, &DashboardConfig::default());
    let ticket = view.begin_load();
    assert!(view.complete(ticket, Err(LoadError::Status {
        url: "https://example.org/claims.csv".to_string(),
        status: 404,
    })));

    assert!(matches!(view.state(), ViewState::Failed(msg) if msg.contains("404")));
    let doc = view.document();
    assert!(doc.status.is_none());
    assert!(doc.filter.is_none());
    assert!(doc.tables.iter().all(|t| t.is_empty()));
    assert!(doc.charts.iter().all(|c| matches!(c.body, ChartBody::Empty)));
}

// ═══════════════════════════════════════════════════════════════════════════
// Filtering
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_set_filter_recomputes_summary() {
    let mut view = ready(Page::Records, sample());
    assert_eq!(view.summary().record_count, 7);

    view.set_filter(FilterSelection {
        category: "Hamas".to_string(),
        verdict: String::new(),
    });
    assert_eq!(view.summary().record_count, 2);
    let names: Vec<&str> = view
        .visible_records()
        .iter()
        .map(|r| r.field(claims::NAME))
        .collect();
    assert_eq!(names, vec!["Ahmad", "Karim"]);

    view.set_filter(FilterSelection::default());
    assert_eq!(view.visible_records().len(), 7);
}

#[test]
fn test_new_load_keeps_filter() {
    let mut view = ready(Page::Records, sample());
    view.set_filter(FilterSelection {
        category: "Fatah".to_string(),
        verdict: "Civilian".to_string(),
    });
    assert_eq!(view.visible_records().len(), 1);

    let ticket = view.begin_load();
    assert!(view.visible_records().is_empty());
    view.complete(ticket, Ok(sample()));
    assert_eq!(view.visible_records().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Documents
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_records_document_has_filter_controls_and_columns() {
    let doc = ready(Page::Records, sample()).document();

    let filter = doc.filter.as_ref().expect("records page shows filter controls");
    assert_eq!(filter.category_label, claims::ORIENT_AFFILIATION);
    assert_eq!(filter.options.verdicts, vec!["Combatant", "Civilian"]);

    let claims_table = table(&doc, "Claims");
    assert_eq!(claims_table.columns[0], "Name");
    assert_eq!(claims_table.columns[1], "Arabic Name");
    assert_eq!(claims_table.rows.len(), 7);
    assert!(doc.charts.is_empty());
}

#[test]
fn test_summary_page_hides_filter_unless_active() {
    let mut view = ready(Page::Organizations, sample());
    assert!(view.document().filter.is_none());

    view.set_filter(FilterSelection {
        category: String::new(),
        verdict: "Combatant".to_string(),
    });
    assert!(view.document().filter.is_some());
}

#[test]
fn test_organizations_document() {
    let doc = ready(Page::Organizations, sample()).document();

    let losses = table(&doc, "Loss Summary");
    assert_eq!(
        first_column(losses),
        vec!["Army of Islam", "Fatah", "Hamas", "PIJ", "PRC", "Unaffiliated", "Warrior"]
    );
    let hamas = &losses.rows[2];
    // "Hamas (Civilian)" matches Hamas first and counts as civilian
    assert_eq!(hamas[1..], ["2", "1", "3"]);

    let titles: Vec<&str> = doc.charts.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Deaths by Orient Affiliation",
            "Militia Losses by Orient Affiliation",
            "Militant vs Civilian Casualties",
        ]
    );
    let ChartBody::Bar(bars) = &doc.charts[0].body else {
        panic!("expected a bar chart");
    };
    assert_eq!(bars.bars.len(), 7);
    let ChartBody::Pie(split) = &doc.charts[2].body else {
        panic!("expected a pie chart");
    };
    assert_eq!(split.layout.total(), 7);
    assert_eq!(split.layout.slices[0].value, 5);
    assert_eq!(split.layout.slices[1].value, 2);
}

#[test]
fn test_affiliation_losses_exclude_unaffiliated_in_militia_order() {
    let doc = ready(Page::AffiliationLosses, sample()).document();

    let shares = table(&doc, "Militia Losses");
    let labels = first_column(shares);
    assert!(!labels.contains(&"Unaffiliated"));
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[labels.len() - 1], "Hamas");

    let militia: Vec<u64> = shares.rows.iter().map(|r| r[1].parse().unwrap()).collect();
    assert!(militia.windows(2).all(|w| w[0] <= w[1]));

    let ChartBody::Pie(pie) = &doc.charts[0].body else {
        panic!("expected a pie chart");
    };
    assert!(pie.layout.labels.iter().all(|l| l.leader.is_some()));
}

#[test]
fn test_empty_dataset_charts_are_empty() {
    for page in [Page::Organizations, Page::CivilianLosses, Page::AffiliationLosses] {
        let doc = ready(page, claims_dataset(&[])).document();
        assert!(
            doc.charts.iter().all(|c| matches!(c.body, ChartBody::Empty)),
            "{page} should render placeholders"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Mounting
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_load_mounts_page_from_configured_source() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        "Date,Name,Date of death,Orient claim,Orient note,al-Qassam entry,Verdict,Additional notes\n\
         x,A,27/12/2008,Hamas,,,Combatant,\n\
         x,B,27/12/2008,Hamas,,,Civilian,\n\
         x,C,28/12/2008,PIJ,,,Combatant,\n"
            .as_bytes(),
    )
    .unwrap();

    let config = DashboardConfig {
        timeline_source: file.path().display().to_string(),
        ..Default::default()
    };
    let view = PageView::load(Page::Verdicts, &config).await;

    assert_eq!(view.dataset().map(Dataset::len), Some(3));
    let doc = view.document();
    let verdicts = table(&doc, "Verdicts");
    assert_eq!(first_column(verdicts), vec!["Combatant", "Civilian"]);
    assert!(matches!(doc.charts[0].body, ChartBody::Bar(_)));
}

#[tokio::test]
async fn test_load_failure_leaves_page_failed() {
    let config = DashboardConfig {
        claims_source: "/definitely/not/here.csv".to_string(),
        ..Default::default()
    };
    let view = PageView::load(Page::Organizations, &config).await;
    assert!(matches!(view.state(), ViewState::Failed(_)));
    assert!(view.pending().is_none());
}
