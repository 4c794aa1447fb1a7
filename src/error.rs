//! Error types for memory-cue.

use thiserror::Error;

/// Errors produced by memory-cue library code.
///
/// Parsers never return these; they degrade to defaults instead. Errors only
/// come from configuration, storage and the command layer.
#[derive(Debug, Error)]
pub enum MemoryCueError {
    /// Configuration could not be located, read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A reminder, note or folder does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input was rejected before reaching storage.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for MemoryCueError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MemoryCueError::NotFound("reminder 7".to_string()).to_string(),
            "not found: reminder 7"
        );
        assert_eq!(
            MemoryCueError::InvalidInput("empty title".to_string()).to_string(),
            "invalid input: empty title"
        );
    }

    #[test]
    fn test_from_rusqlite() {
        let err: MemoryCueError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, MemoryCueError::Database(_)));
    }
}
