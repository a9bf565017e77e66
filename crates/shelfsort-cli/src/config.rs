//! Run configuration: classifier config file plus CLI overrides

use crate::Cli;
use anyhow::Context;
use shelfsort_classifiers::{BatchConfig, ClassifierConfig};
use std::path::Path;
use std::time::Duration;

/// Everything needed for one batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub classifier: ClassifierConfig,
    pub batch: BatchConfig,
}

impl RunConfig {
    /// Load the classifier configuration and apply CLI overrides
    pub fn load(config_path: &Path, cli: &Cli) -> anyhow::Result<Self> {
        let mut classifier = ClassifierConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?;

        if let Some(threshold) = cli.threshold {
            classifier.threshold = threshold;
        }

        let mut batch = BatchConfig::default();
        if let Some(concurrency) = cli.concurrency {
            batch.concurrency = concurrency;
        }
        batch.row_timeout = cli.row_timeout_ms.map(Duration::from_millis);

        Ok(Self { classifier, batch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const CONFIG: &str = r#"
threshold: 70
categories:
  - name: Not in stock
    keywords: [out of stock]
"#;

    #[test]
    fn test_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfsort.yaml");
        std::fs::write(&path, CONFIG).unwrap();

        let cli = Cli::parse_from([
            "shelfsort",
            "--threshold",
            "80",
            "--concurrency",
            "3",
            "--row-timeout-ms",
            "250",
        ]);
        let config = RunConfig::load(&path, &cli).unwrap();

        assert_eq!(config.classifier.threshold, 80);
        assert_eq!(config.batch.concurrency, 3);
        assert_eq!(config.batch.row_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfsort.yaml");
        std::fs::write(&path, CONFIG).unwrap();

        let cli = Cli::parse_from(["shelfsort"]);
        let config = RunConfig::load(&path, &cli).unwrap();

        assert_eq!(config.classifier.threshold, 70);
        assert_eq!(config.batch.row_timeout, None);
    }

    #[test]
    fn test_missing_file() {
        let cli = Cli::parse_from(["shelfsort"]);
        let err = RunConfig::load(Path::new("/nonexistent/shelfsort.yaml"), &cli).unwrap_err();
        assert!(err.to_string().contains("loading /nonexistent/shelfsort.yaml"));
    }
}
