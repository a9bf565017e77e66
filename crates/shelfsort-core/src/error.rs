//! Error types for shelfsort

/// Result type alias using shelfsort's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for shelfsort operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed dictionary, empty candidate list or out-of-range parameter
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure raised by the injected lemmatizer
    #[error("lemmatization error: {0}")]
    Lemmatization(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new lemmatization error
    pub fn lemmatization(msg: impl Into<String>) -> Self {
        Self::Lemmatization(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
