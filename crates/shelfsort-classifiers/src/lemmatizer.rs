//! Lemmatizer capability injected into the classifier
//!
//! The classifier only depends on [`Lemmatizer`]. Closures implement it
//! directly, so callers can plug in any model (or the identity in tests).

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use shelfsort_core::Result;

/// Maps a token to its base form
pub trait Lemmatizer: Send + Sync {
    /// Return the base form of `token`
    fn lemmatize(&self, token: &str) -> Result<String>;

    /// Get the lemmatizer name
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Lemmatizer for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn lemmatize(&self, token: &str) -> Result<String> {
        self(token)
    }
}

/// Returns every token unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        Ok(token.to_string())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Languages supported by [`StemmingLemmatizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerLanguage {
    Danish,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Italian,
    Norwegian,
    Portuguese,
    Spanish,
    Swedish,
}

impl StemmerLanguage {
    fn algorithm(self) -> Algorithm {
        match self {
            Self::Danish => Algorithm::Danish,
            Self::Dutch => Algorithm::Dutch,
            Self::English => Algorithm::English,
            Self::Finnish => Algorithm::Finnish,
            Self::French => Algorithm::French,
            Self::German => Algorithm::German,
            Self::Italian => Algorithm::Italian,
            Self::Norwegian => Algorithm::Norwegian,
            Self::Portuguese => Algorithm::Portuguese,
            Self::Spanish => Algorithm::Spanish,
            Self::Swedish => Algorithm::Swedish,
        }
    }
}

/// Snowball stemmer used as a lightweight stand-in for a dictionary lemmatizer
pub struct StemmingLemmatizer {
    stemmer: Stemmer,
    name: String,
}

impl StemmingLemmatizer {
    /// Create a stemmer for the given language
    pub fn new(language: StemmerLanguage) -> Self {
        Self {
            stemmer: Stemmer::create(language.algorithm()),
            name: format!("snowball-{:?}", language).to_lowercase(),
        }
    }
}

impl Default for StemmingLemmatizer {
    fn default() -> Self {
        Self::new(StemmerLanguage::English)
    }
}

impl Lemmatizer for StemmingLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> {
        Ok(self.stemmer.stem(token).into_owned())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
