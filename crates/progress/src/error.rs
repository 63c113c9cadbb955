//! Engine errors.

/// Errors raised while computing progress or status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// The key result's type has no progress formula
    #[error("Unsupported key result type: {0}")]
    UnsupportedKeyResultType(String),
}

/// Errors raised while loading or validating a [`StatusPolicy`](crate::StatusPolicy).
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A threshold is out of its allowed range
    #[error("Invalid policy value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
