//! Error types for `apiview-spec-tools`.

use thiserror::Error;

/// Main error type for spec-document tooling.
#[derive(Error, Debug)]
pub enum SpecToolsError {
    #[error("spec error: invalid document location '{location}': {message}")]
    Location { location: String, message: String },

    #[error("spec error: failed to fetch document from '{url}': {message}")]
    Fetch { url: String, message: String },

    #[error("spec error: failed to read document body from '{url}': {message}")]
    ReadBody { url: String, message: String },

    #[error("spec error: failed to read document file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("spec error: failed to parse OpenAPI document from '{location}': {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("spec error: digest mismatch for '{location}'. Expected: {expected}, Got: {actual}")]
    DigestMismatch {
        location: String,
        expected: String,
        actual: String,
    },

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for spec-document operations.
pub type Result<T> = std::result::Result<T, SpecToolsError>;
