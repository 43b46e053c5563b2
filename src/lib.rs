//! Minimal deterministic retrieval-augmented generation pipeline for test
//! harnesses.
//!
//! ```text
//! Corpus file ──► ingestion::Document ──► CharacterSplitter ──► Segments
//!                                                                 │
//!                               embeddings::EmbeddingProvider ◄───┤
//!                                                                 ▼
//!                              stores::MemoryVectorIndex (bulk build, once)
//!
//! Query ──► retrieval::Retriever ──► prompt::PromptTemplate ──► llm::ChatModel
//!                                                                 │
//!                        parsed answer ◄── ChatResponse::first_content
//! ```
//!
//! Assembly happens once, via [`chain::assemble`]; the composed
//! [`RetrievalChain`] is returned to the caller for hand-off to a
//! [`ChainSink`]. Both the embedder and the model are capability traits with
//! deterministic fakes ([`FakeEmbeddings`], [`FakeChatModel`]) so the whole
//! pipeline is testable without live backends.

pub mod chain;
pub mod config;
pub mod embeddings;
pub mod ingestion;
pub mod llm;
pub mod prompt;
pub mod retrieval;
pub mod stores;
pub mod types;

pub use chain::{
    assemble, assemble_with_fakes, ChainSink, RecordingSink, RetrievalChain,
    RetrievalChainBuilder,
};
pub use config::RagConfig;
pub use embeddings::{EmbeddingProvider, FakeEmbeddings};
pub use ingestion::{CharacterSplitter, Document, Segment};
pub use llm::{ChatChoice, ChatMessage, ChatModel, ChatResponse, FakeChatModel};
pub use prompt::PromptTemplate;
pub use retrieval::{index_segments, Retriever};
pub use stores::{IndexEntry, MemoryVectorIndex, VectorIndex};
pub use types::RagError;
