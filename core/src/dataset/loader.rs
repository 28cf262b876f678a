//! Fetching and parsing of CSV resources.
//!
//! A load is a one-shot fetch of the whole resource followed by a lenient
//! parse. Loads race a [`CancellationToken`] so that a view torn down while
//! its fetch is in flight never receives the result.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{Dataset, DatasetKind, LoadError, Record};

/// Where a CSV resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` strings are URLs, anything else a path.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Read the full text of a resource.
pub async fn fetch_text(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::ReadFile {
                    path: path.clone(),
                    source,
                })
        }
        Source::Url(url) => {
            let response = reqwest::get(url).await.map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })
        }
    }
}

/// Parse CSV text whose first row names the fields.
///
/// Parsing is flexible: short rows are padded with blanks, long rows are
/// truncated to the header width, and rows with only blank values are
/// skipped.
pub fn parse_csv(text: &str, kind: DatasetKind, source_name: &str) -> Result<Dataset, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let csv_error = |source| LoadError::Csv {
        source_name: source_name.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Arc<[String]> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    let mut ragged = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        if row.len() != headers.len() {
            ragged += 1;
        }
        let record = Record::new(Arc::clone(&headers), row.iter().map(str::to_string).collect());
        if !record.is_blank() {
            records.push(record);
        }
    }

    if ragged > 0 {
        tracing::debug!(source = source_name, ragged, "rows with unexpected field count");
    }

    let dataset = Dataset {
        kind,
        source: source_name.to_string(),
        headers,
        records,
    };

    let schema = dataset.schema_report();
    if !schema.is_ok() {
        tracing::warn!(
            source = source_name,
            missing = ?schema.missing,
            "dataset is missing expected columns"
        );
    }

    Ok(dataset)
}

/// Fetch and parse a resource unless `cancel` fires first.
pub async fn load(
    source: &Source,
    kind: DatasetKind,
    cancel: &CancellationToken,
) -> Result<Dataset, LoadError> {
    let fetch = async {
        let text = fetch_text(source).await?;
        parse_csv(&text, kind, &source.to_string())
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoadError::Cancelled),
        result = fetch => result,
    }
}

/// A load running on the runtime. Dropping the handle cancels the load.
pub struct LoadHandle {
    token: CancellationToken,
    task: JoinHandle<Result<Dataset, LoadError>>,
}

/// Start loading `source` in the background.
pub fn spawn_load(source: Source, kind: DatasetKind) -> LoadHandle {
    let token = CancellationToken::new();
    let task_token = token.clone();
    let task = tokio::spawn(async move {
        let result = load(&source, kind, &task_token).await;
        match &result {
            Ok(dataset) => tracing::info!(
                source = %source,
                kind = kind.name(),
                records = dataset.len(),
                "dataset loaded"
            ),
            Err(LoadError::Cancelled) => {
                tracing::debug!(source = %source, "dataset load cancelled")
            }
            Err(e) => tracing::error!(source = %source, error = %e, "error loading CSV"),
        }
        result
    });
    LoadHandle { token, task }
}

impl LoadHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token that cancels this load when triggered
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the load to finish.
    pub async fn join(mut self) -> Result<Dataset, LoadError> {
        match (&mut self.task).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(LoadError::Cancelled),
            Err(e) => Err(LoadError::Task(e.to_string())),
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
