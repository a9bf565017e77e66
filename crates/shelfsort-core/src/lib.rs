//! Shelfsort Core
//!
//! Types shared across the shelfsort components.
//!
//! This crate provides:
//! - The error type and result alias used by the classification engine
//! - Classification results and their rendered, persistable form
//! - The confidence label derived from a result

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassificationRecord, ClassificationResult, Confidence, UNCERTAIN};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationRecord, ClassificationResult, Confidence, UNCERTAIN};
}
