//! Error types for pronunciation-core.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by a progress store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record for the (user, lesson) key already exists.
    #[error("progress record already exists")]
    Conflict,

    #[error("progress record not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(StoreError::Conflict.to_string(), "progress record already exists");
        assert_eq!(
            StoreError::Unavailable("pool timed out".to_string()).to_string(),
            "store unavailable: pool timed out"
        );
    }
}
