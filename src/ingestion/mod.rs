//! Document loading and positional splitting.
//!
//! A [`Document`] is a source identifier plus its full text, loaded in one
//! read. The [`CharacterSplitter`] turns a document into ordered [`Segment`]s
//! bounded by a maximum character length, with a configurable overlap between
//! neighbours. Documents are discarded after splitting; segments carry
//! everything downstream stages need.

pub mod splitter;

pub use splitter::CharacterSplitter;

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::types::RagError;

/// A logical document: a source identifier plus its full text content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from (typically a file path).
    pub source: String,
    /// The full text content.
    pub content: String,
}

impl Document {
    /// Create a document from in-memory text.
    #[must_use]
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// Load a plain-text file in full as one document.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DocumentLoad`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| RagError::DocumentLoad {
                    path: path.to_path_buf(),
                    source,
                })?;
        Ok(Self {
            source: path.display().to_string(),
            content,
        })
    }
}

/// A contiguous text segment of a document, produced by splitting.
///
/// Segments carry their zero-based position within the source so downstream
/// consumers can reconstruct document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier for this segment.
    pub id: Uuid,
    /// Source identifier of the originating document.
    pub source: String,
    /// Zero-based index of this segment within the source.
    pub index: usize,
    /// The segment text.
    pub content: String,
}

impl Segment {
    /// Create a new segment with a fresh identifier.
    #[must_use]
    pub fn new(source: impl Into<String>, index: usize, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            index,
            content: content.into(),
        }
    }
}
