//! Error types for the record crate.

/// Errors from typed access to meta information.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// No meta value is stored under the key.
    #[error("meta value not found: {0}")]
    MissingMeta(String),

    /// The stored meta value has a different kind than requested.
    #[error("meta value {key:?} is {found}, expected {expected}")]
    MetaTypeMismatch {
        /// The key that was looked up.
        key: String,
        /// The kind the caller asked for.
        expected: &'static str,
        /// The kind actually stored.
        found: &'static str,
    },
}

/// Convenience alias for record results.
pub type RecordResult<T> = Result<T, RecordError>;
