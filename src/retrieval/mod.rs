//! Query-time retrieval over a built vector index.
//!
//! [`index_segments`] is the one-pass build step: embed every segment and
//! bulk-build a [`MemoryVectorIndex`]. [`Retriever`] is the query-time half:
//! it embeds the query with the same provider used at build time and returns
//! the top-matching segments in similarity-descending order.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::embeddings::EmbeddingProvider;
use crate::ingestion::Segment;
use crate::stores::{IndexEntry, MemoryVectorIndex, VectorIndex};
use crate::types::RagError;

/// Embed all segments and bulk-build an in-memory vector index.
///
/// # Errors
///
/// Propagates embedding failures and index-build validation errors.
pub async fn index_segments(
    embedder: &dyn EmbeddingProvider,
    segments: Vec<Segment>,
) -> Result<MemoryVectorIndex, RagError> {
    let texts: Vec<String> = segments
        .iter()
        .map(|segment| segment.content.clone())
        .collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let entries: Vec<IndexEntry> = segments
        .into_iter()
        .zip(embeddings)
        .map(|(segment, embedding)| IndexEntry { segment, embedding })
        .collect();

    debug!(
        entries = entries.len(),
        dimensions = embedder.dimensions(),
        "built in-memory vector index"
    );
    MemoryVectorIndex::build(entries)
}

/// Answers "which stored segments are most relevant to this query".
///
/// Wraps a [`VectorIndex`] and the [`EmbeddingProvider`] that populated it
/// behind a uniform query-string interface. Read-only after construction.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl fmt::Debug for Retriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    /// Bind an embedder and an index, returning `top_k` segments per query.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `top_k` is zero.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        top_k: usize,
    ) -> Result<Self, RagError> {
        if top_k == 0 {
            return Err(RagError::config("top_k must be at least 1"));
        }
        Ok(Self {
            embedder,
            index,
            top_k,
        })
    }

    /// Number of segments returned per query.
    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieve the segments most similar to the query string.
    ///
    /// # Errors
    ///
    /// Propagates embedding and index errors, including
    /// [`RagError::EmptyIndex`] for an unpopulated index.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Segment>, RagError> {
        let query_embedding = self.embedder.embed(query).await?;
        let hits = self
            .index
            .search_similar(&query_embedding, self.top_k)
            .await?;
        debug!(hits = hits.len(), "retrieved context segments");
        Ok(hits.into_iter().map(|(segment, _)| segment).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::FakeEmbeddings;
    use crate::ingestion::{CharacterSplitter, Document};

    fn segments_from(text: &str, chunk_size: usize) -> Vec<Segment> {
        let splitter = CharacterSplitter::new(chunk_size, 0).unwrap();
        splitter.split(&Document::new("doc", text))
    }

    #[test]
    fn zero_top_k_rejected() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(FakeEmbeddings::new(3));
        let index = Arc::new(MemoryVectorIndex::build(Vec::new()).unwrap());
        let err = Retriever::new(embedder, index, 0).unwrap_err();
        assert!(matches!(err, RagError::Config { .. }));
    }

    #[tokio::test]
    async fn retrieval_is_deterministic_for_fixed_index_and_query() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(FakeEmbeddings::new(6));
        let segments = segments_from("alpha beta gamma delta epsilon zeta eta theta", 10);
        let index = Arc::new(index_segments(embedder.as_ref(), segments).await.unwrap());
        let retriever = Retriever::new(embedder, index, 3).unwrap();

        let first = retriever.retrieve("some fixed query").await.unwrap();
        let second = retriever.retrieve("some fixed query").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn retrieve_with_k_equal_to_count_returns_all_segments_once() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(FakeEmbeddings::new(4));
        let segments = segments_from("abcdefghijklmnopqrst", 5);
        let count = segments.len();
        assert_eq!(count, 4);

        let index = Arc::new(index_segments(embedder.as_ref(), segments).await.unwrap());
        let retriever = Retriever::new(embedder, index, count).unwrap();

        let retrieved = retriever.retrieve("anything").await.unwrap();
        assert_eq!(retrieved.len(), count);

        let mut ids: Vec<_> = retrieved.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count, "each segment appears exactly once");
    }

    #[tokio::test]
    async fn retrieve_against_empty_index_fails() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(FakeEmbeddings::new(3));
        let index = Arc::new(index_segments(embedder.as_ref(), Vec::new()).await.unwrap());
        let retriever = Retriever::new(embedder, index, 2).unwrap();

        let err = retriever.retrieve("query").await.unwrap_err();
        assert!(matches!(err, RagError::EmptyIndex), "got: {err}");
    }
}
