//! Error types for the reflection library.

use thiserror::Error;

/// Main error type for catalog reflection.
///
/// Objects that do not exist are never reported through this type: the
/// extractors return an empty collection, `None`, or `false` instead.
#[derive(Error, Debug)]
pub enum ReflectError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog query or procedure call failed in the driver
    #[error("Catalog unavailable: {message}\n  Query: {query}")]
    CatalogUnavailable { query: String, message: String },

    /// A catalog procedure returned a row narrower than the layout expects
    #[error("Malformed row from {procedure}: {detail}")]
    MalformedRow { procedure: String, detail: String },

    /// Identifier rejected before it reached any query text
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReflectError {
    /// Create a CatalogUnavailable error for a failed query.
    pub fn catalog(query: impl Into<String>, message: impl Into<String>) -> Self {
        ReflectError::CatalogUnavailable {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a MalformedRow error.
    pub fn malformed(procedure: impl Into<String>, detail: impl Into<String>) -> Self {
        ReflectError::MalformedRow {
            procedure: procedure.into(),
            detail: detail.into(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReflectError::Config(_) | ReflectError::Yaml(_) | ReflectError::Json(_) => 1,
            ReflectError::CatalogUnavailable { .. } => 2,
            ReflectError::MalformedRow { .. } => 3,
            ReflectError::InvalidIdentifier(_) => 4,
            ReflectError::Io(_) => 7,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for reflection operations.
pub type Result<T> = std::result::Result<T, ReflectError>;
