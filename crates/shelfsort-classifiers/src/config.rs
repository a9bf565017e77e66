//! Configuration for the keyword dictionary and classifier

use crate::classifier::{KeywordClassifier, DEFAULT_THRESHOLD};
use crate::dictionary::KeywordDictionary;
use crate::lemmatizer::{IdentityLemmatizer, Lemmatizer, StemmerLanguage, StemmingLemmatizer};
use serde::{Deserialize, Serialize};
use shelfsort_core::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Classifier configuration, usually loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum fuzzy score for a token match
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Lemmatizer applied to every token
    #[serde(default)]
    pub lemmatizer: LemmatizerSpec,

    /// Categories in priority order
    pub categories: Vec<CategorySpec>,
}

/// A category and its raw keyword phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Lemmatizer specification (for config files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerSpec {
    /// Tokens are matched as-is
    #[default]
    Identity,

    /// Snowball stemming
    Stemmer {
        #[serde(default)]
        language: StemmerLanguage,
    },
}

impl LemmatizerSpec {
    /// Instantiate the configured lemmatizer
    pub fn build(&self) -> Arc<dyn Lemmatizer> {
        match self {
            Self::Identity => Arc::new(IdentityLemmatizer),
            Self::Stemmer { language } => Arc::new(StemmingLemmatizer::new(*language)),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse classifier config: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Build the keyword dictionary in declared order
    pub fn build_dictionary(&self) -> Result<KeywordDictionary> {
        KeywordDictionary::new(
            self.categories
                .iter()
                .map(|c| (c.name.as_str(), c.keywords.iter())),
        )
    }

    /// Build the configured lemmatizer
    pub fn build_lemmatizer(&self) -> Arc<dyn Lemmatizer> {
        self.lemmatizer.build()
    }

    /// Build a ready classifier
    pub fn build_classifier(&self) -> Result<KeywordClassifier> {
        let dictionary = Arc::new(self.build_dictionary()?);
        KeywordClassifier::new(dictionary, self.build_lemmatizer())?.with_threshold(self.threshold)
    }

    /// Get all category names
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}
