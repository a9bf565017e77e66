//! Fuzzy keyword classifier
//!
//! Each response is normalized, split into tokens and lemmatized. Two passes
//! then run against the dictionary:
//! - a token pass scoring every lemma against every category's keywords
//!   with the Indel ratio, where a score at or above the threshold matches
//! - a substring pass over the whole normalized response, where any keyword
//!   occurring verbatim matches and claims a score of 100
//!
//! The best category is the first one to reach the highest score, in
//! category declaration order then token order.

use crate::dictionary::KeywordDictionary;
use crate::lemmatizer::Lemmatizer;
use crate::normalize::{normalize, NormalizedText};
use crate::similarity::best_match_against;
use aho_corasick::{AhoCorasick, MatchKind};
use shelfsort_core::{ClassificationRecord, ClassificationResult, Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Default minimum token score for a fuzzy match
pub const DEFAULT_THRESHOLD: u8 = 65;

/// Lemmas shorter than this are never scored
const MIN_TOKEN_CHARS: usize = 2;

/// Finds which categories have a keyword occurring inside a response
struct SubstringIndex {
    automaton: Option<AhoCorasick>,
    pattern_categories: Vec<usize>,
    /// Categories holding an empty keyword, which occurs in every string
    always_matched: Vec<bool>,
}

impl SubstringIndex {
    fn build(dictionary: &KeywordDictionary) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_categories = Vec::new();
        let mut always_matched = vec![false; dictionary.len()];

        for (idx, category) in dictionary.iter().enumerate() {
            for keyword in category.keywords() {
                if keyword.is_empty() {
                    always_matched[idx] = true;
                } else {
                    patterns.push(keyword.as_str());
                    pattern_categories.push(idx);
                }
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| {
                    Error::internal(format!("Failed to build keyword matcher: {}", e))
                })?;
            Some(ac)
        };

        Ok(Self {
            automaton,
            pattern_categories,
            always_matched,
        })
    }

    /// One flag per category, in declaration order
    fn matching_categories(&self, haystack: &str) -> Vec<bool> {
        let mut found = self.always_matched.clone();

        if let Some(ac) = &self.automaton {
            for m in ac.find_overlapping_iter(haystack) {
                found[self.pattern_categories[m.pattern().as_usize()]] = true;
            }
        }

        found
    }
}

/// Rule-based classifier over a shared keyword dictionary
pub struct KeywordClassifier {
    dictionary: Arc<KeywordDictionary>,
    lemmatizer: Arc<dyn Lemmatizer>,
    threshold: u8,
    substrings: SubstringIndex,
}

impl KeywordClassifier {
    /// Create a classifier with the default threshold
    pub fn new(dictionary: Arc<KeywordDictionary>, lemmatizer: Arc<dyn Lemmatizer>) -> Result<Self> {
        if dictionary.is_empty() {
            return Err(Error::invalid_argument("keyword dictionary has no categories"));
        }

        let substrings = SubstringIndex::build(&dictionary)?;

        info!(
            "Keyword classifier ready: {} categories, lemmatizer '{}'",
            dictionary.len(),
            lemmatizer.name()
        );

        Ok(Self {
            dictionary,
            lemmatizer,
            threshold: DEFAULT_THRESHOLD,
            substrings,
        })
    }

    /// Set the minimum fuzzy score (0-100) for a token match
    pub fn with_threshold(mut self, threshold: u8) -> Result<Self> {
        if threshold > 100 {
            return Err(Error::invalid_argument(format!(
                "threshold must be within 0-100, got {}",
                threshold
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    pub fn lemmatizer_name(&self) -> &str {
        self.lemmatizer.name()
    }

    /// Classify one response.
    ///
    /// Absent or empty text is an uncertain result, not an error. Only a
    /// lemmatizer failure is returned as an error.
    pub fn classify<'a>(&self, text: impl Into<Option<&'a str>>) -> Result<ClassificationResult> {
        let text = match text.into() {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(ClassificationResult::uncertain()),
        };

        let normalized = normalize(text);
        let lemmas = self.lemmatize_tokens(&normalized)?;

        let mut matched = vec![false; self.dictionary.len()];
        let mut best_score = 0u8;
        let mut best_category: Option<usize> = None;

        for (idx, category) in self.dictionary.iter().enumerate() {
            for lemma in &lemmas {
                let found = best_match_against(lemma, category.keywords())?;
                if found.score >= self.threshold {
                    matched[idx] = true;
                    if found.score > best_score {
                        best_score = found.score;
                        best_category = Some(idx);
                    }
                }
            }
        }

        let verbatim = self.substrings.matching_categories(&normalized);
        for (idx, hit) in verbatim.into_iter().enumerate() {
            if !hit {
                continue;
            }
            matched[idx] = true;
            if best_score < 100 {
                best_score = 100;
                best_category = Some(idx);
            }
        }

        let names = self.dictionary.all_categories();
        let matched_categories: Vec<String> = matched
            .iter()
            .zip(&names)
            .filter(|(hit, _)| **hit)
            .map(|(_, name)| name.to_string())
            .collect();
        let best = best_category.map(|idx| (names[idx].to_string(), best_score));

        debug!(
            tokens = lemmas.len(),
            best = ?best,
            matched = matched_categories.len(),
            "Classified response"
        );

        Ok(ClassificationResult::new(best, matched_categories))
    }

    /// Classify and render into the persisted triple
    pub fn classify_record<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
    ) -> Result<ClassificationRecord> {
        self.classify(text).map(|result| result.to_record())
    }

    fn lemmatize_tokens(&self, normalized: &NormalizedText) -> Result<Vec<String>> {
        let mut lemmas = Vec::new();

        for token in normalized.tokens() {
            let lemma = self.lemmatizer.lemmatize(token)?;
            if lemma.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            lemmas.push(lemma);
        }

        Ok(lemmas)
    }
}

/// One-shot classification without keeping a classifier around.
///
/// Builds the substring index on every call; reuse a [`KeywordClassifier`]
/// when classifying more than a handful of responses.
pub fn classify<'a>(
    text: impl Into<Option<&'a str>>,
    dictionary: Arc<KeywordDictionary>,
    lemmatizer: Arc<dyn Lemmatizer>,
    threshold: u8,
) -> Result<ClassificationResult> {
    KeywordClassifier::new(dictionary, lemmatizer)?
        .with_threshold(threshold)?
        .classify(text)
}
