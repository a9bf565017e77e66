//! Mock lemmatizers for testing
//!
//! Provides configurable implementations of the Lemmatizer trait for
//! testing call counts, error propagation, timeouts and batch isolation.

use shelfsort_classifiers::batch::{BatchClassifier, BatchConfig, InputRow, RowOutcome};
use shelfsort_classifiers::prelude::*;
use shelfsort_core::{Error, Result};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identity lemmatizer that counts its calls
#[derive(Default)]
pub struct CountingLemmatizer {
    call_count: AtomicU32,
}

impl CountingLemmatizer {
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Lemmatizer for CountingLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(token.to_string())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// A lemmatizer that fails on one token - for testing error paths
pub struct FailingLemmatizer {
    poison: String,
}

impl FailingLemmatizer {
    pub fn new(poison: &str) -> Self {
        Self {
            poison: poison.to_string(),
        }
    }
}

impl Lemmatizer for FailingLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        if token == self.poison {
            Err(Error::lemmatization(format!("no lemma for '{}'", token)))
        } else {
            Ok(token.to_string())
        }
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// A lemmatizer that blocks on one token - for testing timeouts
pub struct SlowLemmatizer {
    slow_token: String,
    delay: Duration,
}

impl Lemmatizer for SlowLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        if token == self.slow_token {
            std::thread::sleep(self.delay);
        }
        Ok(token.to_string())
    }
}

/// A slow lemmatizer that records how many calls overlap
pub struct OverlapLemmatizer {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl OverlapLemmatizer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Lemmatizer for OverlapLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(token.to_string())
    }
}

fn dictionary() -> Arc<KeywordDictionary> {
    Arc::new(
        KeywordDictionary::builder()
            .category("Not in stock", ["out of stock", "sold out"])
            .category("Damaged", ["damaged", "torn"])
            .build()
            .unwrap(),
    )
}

#[test]
fn test_lemmatizer_called_once_per_token() {
    let lemmatizer = Arc::new(CountingLemmatizer::default());
    let classifier = KeywordClassifier::new(dictionary(), lemmatizer.clone()).unwrap();

    classifier.classify("the box is torn").unwrap();
    assert_eq!(lemmatizer.call_count(), 4);

    classifier.classify(None).unwrap();
    classifier.classify("").unwrap();
    assert_eq!(lemmatizer.call_count(), 4);
}

#[test]
fn test_lemmatizer_failure_propagates() {
    let classifier =
        KeywordClassifier::new(dictionary(), Arc::new(FailingLemmatizer::new("poison"))).unwrap();

    let err = classifier.classify("sold out poison").unwrap_err();
    assert!(matches!(err, Error::Lemmatization(_)));
    assert_eq!(err.to_string(), "lemmatization error: no lemma for 'poison'");

    assert!(classifier.classify("sold out").is_ok());
}

#[tokio::test]
async fn test_batch_isolates_failed_rows() {
    let classifier =
        KeywordClassifier::new(dictionary(), Arc::new(FailingLemmatizer::new("poison"))).unwrap();
    let batch = BatchClassifier::new(
        Arc::new(classifier),
        BatchConfig {
            concurrency: 2,
            row_timeout: None,
        },
    );

    let report = batch
        .classify_rows(vec![
            InputRow::new("1", "sold out"),
            InputRow::new("2", "poison pill"),
            InputRow::new("3", "nothing"),
        ])
        .await;

    assert_eq!(report.rows.len(), 3);
    assert!(!report.rows[0].outcome.is_failed());
    assert!(report.rows[1].outcome.is_failed());
    assert_eq!(
        report.rows[2].outcome.record().unwrap().classified_category,
        "Uncertain"
    );

    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.uncertain, 1);
    assert_eq!(report.summary.classified, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_batch_row_timeout() {
    let lemmatizer = SlowLemmatizer {
        slow_token: "stuck".to_string(),
        delay: Duration::from_millis(500),
    };
    let classifier = KeywordClassifier::new(dictionary(), Arc::new(lemmatizer)).unwrap();
    let batch = BatchClassifier::new(
        Arc::new(classifier),
        BatchConfig {
            concurrency: 2,
            row_timeout: Some(Duration::from_millis(50)),
        },
    );

    let report = batch
        .classify_rows(vec![
            InputRow::new("slow", "stuck row"),
            InputRow::new("fast", "torn"),
        ])
        .await;

    assert_eq!(
        report.rows[0].outcome,
        RowOutcome::Failed {
            error: "operation timed out".to_string()
        }
    );
    assert_eq!(
        report.rows[1].outcome.record().unwrap().classified_category,
        "Damaged"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_timed_out_rows_keep_their_slot() {
    let lemmatizer = Arc::new(OverlapLemmatizer::new(Duration::from_millis(100)));
    let classifier = KeywordClassifier::new(dictionary(), lemmatizer.clone()).unwrap();
    let batch = BatchClassifier::new(
        Arc::new(classifier),
        BatchConfig {
            concurrency: 1,
            row_timeout: Some(Duration::from_millis(20)),
        },
    );

    let rows = (0..4)
        .map(|i| InputRow::new(i.to_string(), "torn"))
        .collect();
    let report = batch.classify_rows(rows).await;

    assert_eq!(report.summary.failed, 4);
    assert!(report.rows.iter().all(|row| row.outcome.is_failed()));

    // let the last abandoned call drain before reading the peak
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(lemmatizer.peak(), 1);
}
