//! Chain composition: query → retrieval → prompt → model → parsed answer.
//!
//! [`RetrievalChain`] binds one retriever, one model, and one compiled
//! template at construction time and sequences them per invocation. The
//! question passes through unchanged into both the retriever and the prompt.
//!
//! [`assemble`] is the end-to-end wiring routine: it loads the corpus, splits
//! and embeds it, bulk-builds the index, and returns the composed chain to the
//! caller. The caller decides where the chain goes next — typically into a
//! [`ChainSink`] provided by a host harness. There is no process-wide
//! registration slot.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::RagConfig;
use crate::embeddings::EmbeddingProvider;
use crate::ingestion::{CharacterSplitter, Document};
use crate::llm::{ChatModel, FakeChatModel};
use crate::prompt::PromptTemplate;
use crate::retrieval::{index_segments, Retriever};
use crate::types::RagError;

/// The composed pipeline: a single callable from query to parsed answer.
///
/// Created once at assembly; holds no mutable state, so a host may invoke it
/// concurrently if it chooses to.
pub struct RetrievalChain {
    retriever: Retriever,
    model: Arc<dyn ChatModel>,
    template: PromptTemplate,
}

impl fmt::Debug for RetrievalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalChain")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl RetrievalChain {
    /// Start building a chain.
    #[must_use]
    pub fn builder() -> RetrievalChainBuilder {
        RetrievalChainBuilder::default()
    }

    /// Run the full pipeline for one query.
    ///
    /// Strictly sequential: retrieve context, render the prompt, invoke the
    /// model, parse the first candidate. Any stage failure propagates to the
    /// caller unmodified; there is no local recovery.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError`]s from every stage.
    pub async fn invoke(&self, query: &str) -> Result<String, RagError> {
        let context = self.retriever.retrieve(query).await?;
        let prompt = self.template.render(&context, query);
        debug!(
            context_segments = context.len(),
            prompt_len = prompt.len(),
            "rendered prompt"
        );
        let response = self.model.complete(&prompt, &[]).await?;
        let answer = response.first_content()?;
        debug!(answer_len = answer.len(), "parsed model answer");
        Ok(answer.to_owned())
    }
}

/// Builder for [`RetrievalChain`] instances.
#[derive(Default)]
#[must_use]
pub struct RetrievalChainBuilder {
    retriever: Option<Retriever>,
    model: Option<Arc<dyn ChatModel>>,
    template: Option<PromptTemplate>,
}

impl RetrievalChainBuilder {
    /// Set the retriever the chain queries for context.
    pub fn retriever(mut self, retriever: Retriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the model the chain invokes.
    pub fn model(mut self, model: impl ChatModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Set the model from an existing `Arc`, to share across chains.
    pub fn model_arc(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the compiled prompt template.
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Build the chain.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any component is missing.
    pub fn build(self) -> Result<RetrievalChain, RagError> {
        Ok(RetrievalChain {
            retriever: self
                .retriever
                .ok_or_else(|| RagError::config("chain requires a retriever"))?,
            model: self
                .model
                .ok_or_else(|| RagError::config("chain requires a model"))?,
            template: self
                .template
                .ok_or_else(|| RagError::config("chain requires a prompt template"))?,
        })
    }
}

/// Receives a composed chain for later invocation or serialization.
///
/// Hosts hand an implementation into their harness code; assembly itself
/// never touches shared process state.
pub trait ChainSink {
    /// Take ownership of a composed chain. No return value is consumed.
    fn register(&mut self, chain: RetrievalChain);
}

/// A [`ChainSink`] that keeps registered chains in memory.
#[derive(Default)]
pub struct RecordingSink {
    chains: Vec<RetrievalChain>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chains registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Borrow the most recently registered chain.
    #[must_use]
    pub fn last(&self) -> Option<&RetrievalChain> {
        self.chains.last()
    }
}

impl ChainSink for RecordingSink {
    fn register(&mut self, chain: RetrievalChain) {
        self.chains.push(chain);
    }
}

/// Assemble the full pipeline from a validated config and a corpus file.
///
/// Build-time pass: load the document, split it with the configured chunk
/// size and overlap, embed every segment with `embedder`, and bulk-build the
/// in-memory index. The embedder's dimensionality is checked against
/// `embedding_size` before any document is processed.
///
/// The composed chain is returned to the caller rather than written into any
/// global slot; pass it to a [`ChainSink`] if a host expects a hand-off.
///
/// # Errors
///
/// Returns [`RagError::Config`] for invalid configuration or a
/// dimensionality mismatch, [`RagError::Template`] for a malformed template,
/// and [`RagError::DocumentLoad`] for an unreadable corpus file.
pub async fn assemble(
    config: &RagConfig,
    document_path: impl AsRef<Path>,
    embedder: Arc<dyn EmbeddingProvider>,
    model: Arc<dyn ChatModel>,
) -> Result<RetrievalChain, RagError> {
    config.validate()?;
    let template = PromptTemplate::compile(&config.llm_prompt_template)?;
    embedder.ensure_dimensions(config.embedding_size)?;

    let document = Document::from_path(document_path).await?;
    let splitter = CharacterSplitter::new(config.chunk_size, config.chunk_overlap)?;
    let segments = splitter.split(&document);
    info!(
        source = %document.source,
        segments = segments.len(),
        chunk_size = config.chunk_size,
        overlap = config.chunk_overlap,
        "split corpus document"
    );

    let index = index_segments(embedder.as_ref(), segments).await?;
    let retriever = Retriever::new(embedder, Arc::new(index), config.top_k)?;

    RetrievalChain::builder()
        .retriever(retriever)
        .model_arc(model)
        .template(template)
        .build()
}

/// [`assemble`] wired with the deterministic fakes, answering `answer`.
///
/// This is the test-validation variant: no live embedding or model backend is
/// touched, and the returned chain answers every query with the given literal.
///
/// # Errors
///
/// Same failure modes as [`assemble`].
pub async fn assemble_with_fakes(
    config: &RagConfig,
    document_path: impl AsRef<Path>,
    answer: &str,
) -> Result<RetrievalChain, RagError> {
    let embedder = Arc::new(crate::embeddings::FakeEmbeddings::new(config.embedding_size));
    let model = Arc::new(FakeChatModel::new(answer));
    assemble(config, document_path, embedder, model).await
}
