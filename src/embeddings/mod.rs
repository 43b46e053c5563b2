//! Embedding providers: the capability seam between text and vectors.
//!
//! [`EmbeddingProvider`] is the substitution point between a real embedding
//! model and the deterministic [`FakeEmbeddings`] used for test wiring. Every
//! vector a provider produces has exactly [`dimensions`](EmbeddingProvider::dimensions)
//! entries; callers may depend on the shape and on determinism, never on the
//! numeric content.

use async_trait::async_trait;

use crate::types::RagError;

/// Maps text to a fixed-dimensionality vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// The dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;

    /// Embed one piece of text.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] if the provider fails. The fake
    /// provider never fails.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError>;

    /// Embed a batch of texts, preserving input order.
    ///
    /// The default implementation embeds sequentially.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RagError::Embedding`] encountered.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Check this provider's dimensionality against a configured expectation.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] on mismatch. Callers run this before any
    /// document is processed.
    fn ensure_dimensions(&self, expected: usize) -> Result<(), RagError> {
        let actual = self.dimensions();
        if actual != expected {
            return Err(RagError::config(format!(
                "embedding dimensionality mismatch: provider produces {actual} dimensions \
                 but configuration expects {expected}"
            )));
        }
        Ok(())
    }
}

/// Deterministic embedding provider for tests and offline wiring.
///
/// Vectors are derived from a stable hash of the input text, so identical
/// text always maps to the identical vector across calls and instances. The
/// numeric content carries no semantic meaning.
#[derive(Debug, Clone)]
pub struct FakeEmbeddings {
    size: usize,
}

impl FakeEmbeddings {
    /// Create a fake provider producing vectors of the given dimensionality.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

// FNV-1a; stable across platforms, unlike DefaultHasher.
fn fnv1a(text: &str) -> u64 {
    let mut state: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        state ^= u64::from(byte);
        state = state.wrapping_mul(0x0100_0000_01b3);
    }
    state
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddings {
    fn dimensions(&self) -> usize {
        self.size
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let seed = fnv1a(text);
        let mut vector = Vec::with_capacity(self.size);
        for position in 0..self.size {
            let mixed = seed
                .wrapping_add(position as u64)
                .wrapping_mul(0x9e37_79b9_7f4a_7c15);
            // Top 24 bits, scaled into [0, 1).
            vector.push(((mixed >> 40) as f32) / (1u32 << 24) as f32);
        }
        Ok(vector)
    }
}
