//! Tests for CSV parsing and dataset loading

use std::io::Write;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use super::fields::{claims, timeline};
use super::*;

const CLAIMS_CSV: &str = "\
Name,Arabic Name,Date of death,Orient Affiliation,Orient additional info,Al-Qassam profile,Additional Info,Verdict
Ahmad,أحمد,27/12/2008,Hamas,Police officer,,,Combatant
Khalil,خليل,27/12/2008,Fatah (Civilian),,,,Civilian
";

#[test]
fn test_parse_claims_headers_and_fields() {
    let dataset = parse_csv(CLAIMS_CSV, DatasetKind::Claims, "claims.csv").unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.headers.len(), 8);
    assert!(dataset.schema_report().is_ok());

    let first = &dataset.records[0];
    assert_eq!(first.get(claims::NAME), Some("Ahmad"));
    assert_eq!(first.get(claims::ORIENT_AFFILIATION), Some("Hamas"));
    assert_eq!(first.get(claims::PROFILE), Some(""));
    assert_eq!(first.get("Not A Column"), None);
    assert_eq!(first.field("Not A Column"), "");
}

#[test]
fn test_parse_ragged_rows_are_padded_and_truncated() {
    let text = "Name,Orient claim,Verdict\nShort,Hamas\nLong,PIJ,Combatant,extra,values\n";
    let dataset = parse_csv(text, DatasetKind::Timeline, "ragged.csv").unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].get(timeline::VERDICT), Some(""));
    assert_eq!(dataset.records[1].get(timeline::VERDICT), Some("Combatant"));
    assert_eq!(dataset.records[1].iter().count(), 3);
}

#[test]
fn test_parse_skips_blank_rows_and_bom() {
    let text = "\u{feff}Name,Verdict\n\n , \nSami,Civilian\n";
    let dataset = parse_csv(text, DatasetKind::Timeline, "bom.csv").unwrap();

    assert_eq!(dataset.headers[0], "Name");
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records[0].field("Name"), "Sami");
}

#[test]
fn test_schema_report_lists_missing_columns() {
    let text = "Name,Orient claim,Surprise\nA,Hamas,x\n";
    let dataset = parse_csv(text, DatasetKind::Timeline, "partial.csv").unwrap();
    let report = dataset.schema_report();

    assert!(!report.is_ok());
    assert!(report.missing.contains(&"Date of death".to_string()));
    assert!(!report.missing.contains(&"Name".to_string()));
    assert_eq!(report.unexpected, vec!["Surprise".to_string()]);
}

#[test]
fn test_source_parse() {
    assert_eq!(
        Source::parse("https://example.org/data.csv"),
        Source::Url("https://example.org/data.csv".to_string())
    );
    assert_eq!(
        Source::parse(" data/claims.csv "),
        Source::Path(PathBuf::from("data/claims.csv"))
    );
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLAIMS_CSV.as_bytes()).unwrap();

    let source = Source::Path(file.path().to_path_buf());
    let dataset = load(&source, DatasetKind::Claims, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(dataset.kind, DatasetKind::Claims);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.source, file.path().display().to_string());
}

#[tokio::test]
async fn test_load_missing_file_is_read_error() {
    let source = Source::Path(PathBuf::from("/definitely/not/here.csv"));
    let err = load(&source, DatasetKind::Claims, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::ReadFile { .. }));
}

#[tokio::test]
async fn test_load_with_cancelled_token_never_delivers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLAIMS_CSV.as_bytes()).unwrap();

    let token = CancellationToken::new();
    token.cancel();

    let source = Source::Path(file.path().to_path_buf());
    let err = load(&source, DatasetKind::Claims, &token).await.unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_spawned_load_joins_with_dataset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLAIMS_CSV.as_bytes()).unwrap();

    let handle = spawn_load(Source::Path(file.path().to_path_buf()), DatasetKind::Claims);
    let dataset = handle.join().await.unwrap();
    assert_eq!(dataset.len(), 2);
}

#[tokio::test]
async fn test_dropping_handle_cancels_token() {
    let handle = spawn_load(
        Source::Path(PathBuf::from("/definitely/not/here.csv")),
        DatasetKind::Timeline,
    );
    let token = handle.cancel_token();
    drop(handle);
    assert!(token.is_cancelled());
}
