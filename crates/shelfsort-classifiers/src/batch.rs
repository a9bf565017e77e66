//! Concurrent batch classification
//!
//! Rows are classified on the blocking pool with bounded concurrency and
//! come back in input order. A row that times out keeps its slot until its
//! blocking task actually finishes. A row whose classification fails (lemmatizer
//! error, timeout, panicked task) is reported as failed and never aborts the
//! batch; a failed row is distinct from an uncertain one.

use crate::classifier::KeywordClassifier;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use shelfsort_core::{ClassificationRecord, Error, UNCERTAIN};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Batch execution settings
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum rows classified at once
    pub concurrency: usize,

    /// Per-row time limit
    pub row_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            row_timeout: None,
        }
    }
}

/// One input row; any non-string response is treated as absent text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub response: serde_json::Value,
}

impl InputRow {
    pub fn new(id: impl Into<String>, response: impl Into<serde_json::Value>) -> Self {
        Self {
            id: Some(id.into()),
            response: response.into(),
        }
    }

    /// Response text, `None` for null or non-string values
    pub fn text(&self) -> Option<&str> {
        self.response.as_str()
    }
}

/// Outcome of one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowOutcome {
    Classified(ClassificationRecord),
    Failed { error: String },
}

impl RowOutcome {
    fn failed(error: Error) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn record(&self) -> Option<&ClassificationRecord> {
        match self {
            Self::Classified(record) => Some(record),
            Self::Failed { .. } => None,
        }
    }
}

/// Row identifier paired with its outcome
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub id: Option<String>,

    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// Aggregate counts over a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub classified: usize,
    pub failed: usize,
    pub uncertain: usize,

    /// Rows per best category, in dictionary order
    pub distribution: Vec<(String, usize)>,

    pub latency_us: u64,
}

impl BatchSummary {
    fn from_rows(categories: &[&str], rows: &[RowResult], latency_us: u64) -> Self {
        let mut distribution: Vec<(String, usize)> =
            categories.iter().map(|c| (c.to_string(), 0)).collect();
        let mut failed = 0;
        let mut uncertain = 0;

        for row in rows {
            match &row.outcome {
                RowOutcome::Failed { .. } => failed += 1,
                RowOutcome::Classified(record) if record.classified_category == UNCERTAIN => {
                    uncertain += 1
                }
                RowOutcome::Classified(record) => {
                    if let Some(slot) = distribution
                        .iter_mut()
                        .find(|(name, _)| *name == record.classified_category)
                    {
                        slot.1 += 1;
                    }
                }
            }
        }

        Self {
            total: rows.len(),
            classified: rows.len() - failed,
            failed,
            uncertain,
            distribution,
            latency_us,
        }
    }

    /// Share of uncertain rows among classified rows, in percent
    pub fn uncertain_pct(&self) -> f64 {
        if self.classified == 0 {
            0.0
        } else {
            self.uncertain as f64 * 100.0 / self.classified as f64
        }
    }
}

/// Complete batch output
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub rows: Vec<RowResult>,
    pub summary: BatchSummary,
}

/// Runs a shared classifier over many rows
#[derive(Clone)]
pub struct BatchClassifier {
    classifier: Arc<KeywordClassifier>,
    config: BatchConfig,
    /// One permit per row allowed on the blocking pool
    slots: Arc<Semaphore>,
}

impl BatchClassifier {
    pub fn new(classifier: Arc<KeywordClassifier>, config: BatchConfig) -> Self {
        let slots = Arc::new(Semaphore::new(config.concurrency.max(1)));
        Self {
            classifier,
            config,
            slots,
        }
    }

    /// Classify every row, preserving input order
    pub async fn classify_rows(&self, rows: Vec<InputRow>) -> BatchReport {
        let start = Instant::now();
        let concurrency = self.config.concurrency.max(1);

        info!("Classifying {} rows (concurrency {})", rows.len(), concurrency);

        let (ids, texts): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|row| {
                let text = row.text().map(str::to_owned);
                (row.id, text)
            })
            .unzip();

        let outcomes: Vec<RowOutcome> = stream::iter(texts)
            .map(|text| self.classify_one(text))
            .buffered(concurrency)
            .collect()
            .await;

        let results: Vec<RowResult> = ids
            .into_iter()
            .zip(outcomes)
            .map(|(id, outcome)| {
                if let RowOutcome::Failed { error } = &outcome {
                    warn!("Row {} failed: {}", id.as_deref().unwrap_or("<unnamed>"), error);
                    metrics::counter!("shelfsort_rows_total", "outcome" => "failed").increment(1);
                } else {
                    metrics::counter!("shelfsort_rows_total", "outcome" => "classified")
                        .increment(1);
                }
                RowResult { id, outcome }
            })
            .collect();

        let categories = self.classifier.dictionary().all_categories();
        let summary = BatchSummary::from_rows(
            &categories,
            &results,
            start.elapsed().as_micros() as u64,
        );

        info!(
            "Batch complete: {} rows, {} failed, {} uncertain ({:.1}%)",
            summary.total,
            summary.failed,
            summary.uncertain,
            summary.uncertain_pct()
        );

        BatchReport {
            rows: results,
            summary,
        }
    }

    async fn classify_one(&self, text: Option<String>) -> RowOutcome {
        let permit = match Arc::clone(&self.slots).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => return RowOutcome::failed(Error::internal(format!("batch closed: {}", e))),
        };

        let classifier = Arc::clone(&self.classifier);
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            classifier.classify_record(text.as_deref())
        });

        let joined = match self.config.row_timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => return RowOutcome::failed(Error::Timeout),
            },
            None => task.await,
        };

        match joined {
            Ok(Ok(record)) => RowOutcome::Classified(record),
            Ok(Err(e)) => RowOutcome::failed(e),
            Err(e) => RowOutcome::failed(Error::internal(format!(
                "classification task failed: {}",
                e
            ))),
        }
    }
}
