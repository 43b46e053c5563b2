//! Shared error taxonomy for pipeline assembly and invocation.
//!
//! Every failure in this crate is a [`RagError`]. Errors propagate
//! synchronously to the immediate caller via `?`; there is no retry policy and
//! no partial-failure degradation. A misconfigured pipeline fails loudly at
//! construction time.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while assembling or invoking a retrieval chain.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RagError {
    /// Missing or invalid configuration: bad config keys, dimensionality
    /// mismatch, or invalid splitter/retriever parameters.
    ///
    /// Fatal to pipeline construction.
    #[error("configuration error: {reason}")]
    Config {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A corpus document could not be read from disk.
    #[error("failed to load document from {path}: {source}")]
    DocumentLoad {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A similarity query was issued against an index with no entries.
    #[error("similarity query issued against an empty vector index")]
    EmptyIndex,

    /// The prompt template is malformed (a required placeholder is absent).
    ///
    /// Surfaced at template compile time, before any model call.
    #[error("prompt template error: {reason}")]
    Template {
        /// What is wrong with the template.
        reason: String,
    },

    /// The model response does not satisfy the expected shape.
    #[error("malformed model response: {reason}")]
    ModelResponse {
        /// What is wrong with the response.
        reason: String,
    },

    /// An embedding provider failed to produce a vector.
    #[error("embedding provider failure: {0}")]
    Embedding(String),
}

impl RagError {
    /// Shorthand for a [`RagError::Config`] with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`RagError::Template`] with the given reason.
    pub fn template(reason: impl Into<String>) -> Self {
        Self::Template {
            reason: reason.into(),
        }
    }
}
