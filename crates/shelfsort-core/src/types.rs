//! Classification result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label rendered when no category could be assigned
pub const UNCERTAIN: &str = "Uncertain";

/// Confidence attached to a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// At least one category matched, by fuzzy score or exact substring
    High,
    /// Nothing matched
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category, `None` when uncertain
    pub best_category: Option<String>,

    /// Running best score (0-100) after both matching passes
    pub best_score: u8,

    /// Distinct matched categories in dictionary declaration order
    pub matched_categories: Vec<String>,

    /// Derived confidence
    pub confidence: Confidence,
}

impl ClassificationResult {
    /// The result for absent or unmatched text
    pub fn uncertain() -> Self {
        Self {
            best_category: None,
            best_score: 0,
            matched_categories: Vec::new(),
            confidence: Confidence::Low,
        }
    }

    /// Build a result, deriving confidence from the best category
    pub fn new(best: Option<(String, u8)>, matched_categories: Vec<String>) -> Self {
        match best {
            Some((category, score)) => Self {
                best_category: Some(category),
                best_score: score,
                matched_categories,
                confidence: Confidence::High,
            },
            None => Self {
                matched_categories,
                ..Self::uncertain()
            },
        }
    }

    /// Whether no category was assigned
    pub fn is_uncertain(&self) -> bool {
        self.best_category.is_none()
    }

    /// Best category, or `"Uncertain"`
    pub fn best_category_label(&self) -> &str {
        self.best_category.as_deref().unwrap_or(UNCERTAIN)
    }

    /// Matched categories joined with `", "`, or `"Uncertain"` when empty
    pub fn matched_categories_label(&self) -> String {
        if self.matched_categories.is_empty() {
            UNCERTAIN.to_string()
        } else {
            self.matched_categories.join(", ")
        }
    }

    /// Render into the persisted triple
    pub fn to_record(&self) -> ClassificationRecord {
        ClassificationRecord {
            classified_category: self.best_category_label().to_string(),
            all_categories: self.matched_categories_label(),
            classification_confidence: self.confidence,
        }
    }
}

/// Rendered classification stored alongside an input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub classified_category: String,
    pub all_categories: String,
    pub classification_confidence: Confidence,
}

impl From<ClassificationResult> for ClassificationRecord {
    fn from(result: ClassificationResult) -> Self {
        result.to_record()
    }
}
