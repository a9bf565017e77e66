//! Text normalization applied to responses and keywords alike

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"))
}

/// Text that is lowercase ASCII words separated by single spaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whitespace-separated tokens
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonicalize raw text for matching.
///
/// Absent text normalizes to the empty string. Otherwise the text is
/// lowercased, every character that is neither a word character nor
/// whitespace becomes a space, the result is NFKD-decomposed with every
/// non-ASCII character dropped, and whitespace runs collapse to one space
/// with the ends trimmed.
///
/// ```
/// use shelfsort_classifiers::normalize;
///
/// assert_eq!(normalize("  Café -- SOLD-out! "), "cafe sold out");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> NormalizedText {
    let Some(text) = text.into() else {
        return NormalizedText::default();
    };
    if text.is_empty() {
        return NormalizedText::default();
    }

    let lowered = text.to_lowercase();
    let spaced = non_word().replace_all(&lowered, " ");

    // Decomposition can surface uppercase or punctuation (e.g. U+210C -> 'H'),
    // so the folded ASCII is cleaned once more to keep the output idempotent.
    let folded: String = spaced
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    NormalizedText(folded.split_whitespace().collect::<Vec<_>>().join(" "))
}
