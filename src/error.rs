use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// An error reported by the database itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseError {
    pub message: String,
    #[serde(default)]
    pub code: String,
}

impl DatabaseError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} ({})", self.message, self.code)
        }
    }
}

impl std::error::Error for DatabaseError {}

/// Error type for dialect operations
#[derive(Debug, Error)]
pub enum DialectError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No transaction to {action}")]
    NoActiveTransaction { action: &'static str },

    #[error("PlanetScale Serverless Driver does not support streaming")]
    StreamingUnsupported,

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type alias for dialect operations
pub type Result<T> = std::result::Result<T, DialectError>;
