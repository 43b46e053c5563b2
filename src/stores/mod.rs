//! In-memory vector index: write-once bulk build, cosine top-k search.
//!
//! The [`VectorIndex`] trait abstracts over index implementations so the
//! retriever is not tied to a specific store. [`MemoryVectorIndex`] is the
//! only implementation this crate ships: entries are supplied in one bulk
//! build and never mutated afterwards, which makes the structure safe for
//! concurrent read access without further synchronisation.

use async_trait::async_trait;
use std::cmp::Ordering;

use crate::ingestion::Segment;
use crate::types::RagError;

/// A segment paired with its embedding, owned by the index.
#[derive(Clone, Debug)]
pub struct IndexEntry {
    /// The stored segment.
    pub segment: Segment,
    /// The segment's embedding vector.
    pub embedding: Vec<f32>,
}

/// Nearest-neighbour lookup over stored (segment, vector) pairs.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` segments most similar to the query embedding,
    /// most similar first. Ties preserve original insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyIndex`] when the index holds no entries, and
    /// [`RagError::Config`] when the query dimensionality does not match the
    /// stored vectors.
    async fn search_similar(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(Segment, f32)>, RagError>;

    /// Total number of entries in the index.
    fn count(&self) -> usize;
}

/// Write-once, in-memory vector index using cosine similarity.
#[derive(Debug, Clone)]
pub struct MemoryVectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl MemoryVectorIndex {
    /// Construct the index from the full entry set in one bulk operation.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if entries disagree on embedding
    /// dimensionality. An empty entry set builds successfully; querying it
    /// fails with [`RagError::EmptyIndex`].
    pub fn build(entries: Vec<IndexEntry>) -> Result<Self, RagError> {
        let dimensions = entries.first().map_or(0, |entry| entry.embedding.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.embedding.len() != dimensions {
                return Err(RagError::config(format!(
                    "index entry {position} has {} dimensions, expected {dimensions}",
                    entry.embedding.len()
                )));
            }
        }
        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Dimensionality of the stored vectors (0 for an empty index).
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns `true` when the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn search_similar(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(Segment, f32)>, RagError> {
        if self.entries.is_empty() {
            return Err(RagError::EmptyIndex);
        }
        if query_embedding.len() != self.dimensions {
            return Err(RagError::config(format!(
                "query embedding has {} dimensions but the index stores {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                (position, cosine_similarity(query_embedding, &entry.embedding))
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| (self.entries[position].segment.clone(), score))
            .collect())
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}
