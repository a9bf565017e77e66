//! Ordered category -> keyword dictionary
//!
//! Declaration order of categories and of keywords inside a category drives
//! tie-breaking in the classifier, so the dictionary is an ordered sequence
//! and never a hash map.

use crate::normalize::{normalize, NormalizedText};
use shelfsort_core::{Error, Result};
use std::collections::HashSet;
use tracing::info;

/// A category and its normalized keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    keywords: Vec<NormalizedText>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized keywords in declaration order
    pub fn keywords(&self) -> &[NormalizedText] {
        &self.keywords
    }
}

/// Immutable dictionary shared read-only by every classification call
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    categories: Vec<Category>,
}

impl KeywordDictionary {
    /// Build a dictionary from `(category, keywords)` pairs.
    ///
    /// Every keyword is normalized; blank results are kept as empty keywords.
    /// Fails with [`Error::InvalidArgument`] on an empty dictionary, a
    /// category without keywords, or a repeated category name.
    pub fn new<I, N, K, S>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, K)>,
        N: Into<String>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut built = Vec::new();

        for (name, keywords) in categories {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(Error::invalid_argument(format!(
                    "category '{}' is declared more than once",
                    name
                )));
            }

            let keywords: Vec<NormalizedText> =
                keywords.into_iter().map(|k| normalize(k.as_ref())).collect();
            if keywords.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "category '{}' has no keywords",
                    name
                )));
            }

            built.push(Category { name, keywords });
        }

        if built.is_empty() {
            return Err(Error::invalid_argument("keyword dictionary has no categories"));
        }

        let dictionary = Self { categories: built };
        info!(
            "Built keyword dictionary with {} categories and {} keywords",
            dictionary.len(),
            dictionary.keyword_count()
        );

        Ok(dictionary)
    }

    /// Start an incremental builder
    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    /// Categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category names in declaration order
    pub fn all_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a category by name
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of keywords across all categories
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

impl<'a> IntoIterator for &'a KeywordDictionary {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

/// Collects raw categories before validation
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder {
    categories: Vec<(String, Vec<String>)>,
}

impl DictionaryBuilder {
    /// Append a category with its raw keyword phrases
    pub fn category<K, S>(mut self, name: impl Into<String>, keywords: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .push((name.into(), keywords.into_iter().map(Into::into).collect()));
        self
    }

    /// Normalize and validate
    pub fn build(self) -> Result<KeywordDictionary> {
        KeywordDictionary::new(self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let dictionary = KeywordDictionary::builder()
            .category("Wrong shelf", ["wrong shelf", "misplaced"])
            .category("Damaged", ["Broken!", "crushed box"])
            .category("Not in stock", ["Out-of-Stock", "sold out"])
            .build()
            .unwrap();

        assert_eq!(
            dictionary.all_categories(),
            vec!["Wrong shelf", "Damaged", "Not in stock"]
        );

        let not_in_stock = dictionary.get("Not in stock").unwrap();
        assert_eq!(not_in_stock.keywords()[0], "out of stock");
        assert_eq!(not_in_stock.keywords()[1], "sold out");

        assert_eq!(dictionary.get("Damaged").unwrap().keywords()[0], "broken");
        assert_eq!(dictionary.keyword_count(), 6);
    }

    #[test]
    fn test_blank_keyword_kept() {
        let dictionary = KeywordDictionary::new(vec![("Other", vec!["!!!", "misc"])]).unwrap();
        let other = dictionary.get("Other").unwrap();
        assert_eq!(other.keywords().len(), 2);
        assert_eq!(other.keywords()[0], "");
    }

    #[test]
    fn test_empty_dictionary_rejected() {
        let err = KeywordDictionary::builder().build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_category_without_keywords_rejected() {
        let err = KeywordDictionary::builder()
            .category("Empty", Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = KeywordDictionary::builder()
            .category("Damaged", ["broken"])
            .category("Damaged", ["torn"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
