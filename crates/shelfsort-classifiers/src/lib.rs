//! Shelfsort Classifiers
//!
//! Rule-based classification of shelf-placement and inventory comments.
//!
//! A response is normalized, tokenized and lemmatized, then matched against
//! an ordered category -> keyword dictionary two ways:
//! - fuzzily, token by token, with an Indel similarity ratio and a threshold
//! - verbatim, searching every keyword inside the whole normalized response
//!
//! The result names a best category, every matched category and a
//! confidence label. Classification is deterministic and stateless per call,
//! so one classifier can be shared across threads; [`batch`] runs it over
//! many rows concurrently.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod dictionary;
pub mod lemmatizer;
pub mod normalize;
pub mod similarity;

pub use batch::{BatchClassifier, BatchConfig, BatchReport, BatchSummary, InputRow, RowOutcome, RowResult};
pub use classifier::{classify, KeywordClassifier, DEFAULT_THRESHOLD};
pub use config::{CategorySpec, ClassifierConfig, LemmatizerSpec};
pub use dictionary::{Category, DictionaryBuilder, KeywordDictionary};
pub use lemmatizer::{IdentityLemmatizer, Lemmatizer, StemmerLanguage, StemmingLemmatizer};
pub use normalize::{normalize, NormalizedText};
pub use similarity::{best_match_against, indel_distance, ratio, KeywordMatch};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::KeywordClassifier;
    pub use crate::dictionary::KeywordDictionary;
    pub use crate::lemmatizer::{IdentityLemmatizer, Lemmatizer, StemmingLemmatizer};
    pub use crate::normalize::normalize;
    pub use shelfsort_core::{ClassificationRecord, ClassificationResult, Confidence};
}
