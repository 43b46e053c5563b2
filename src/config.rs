//! YAML configuration consumed during pipeline assembly.
//!
//! The configuration is a small key/value document. Two keys are required and
//! mirror what the host harness provides: `embedding_size` (the expected
//! embedding dimensionality) and `llm_prompt_template` (a template containing
//! `{context}` and `{question}` placeholders). The remaining keys default to
//! the values the pipeline was originally validated with.
//!
//! ```yaml
//! embedding_size: 5
//! llm_prompt_template: "Context: {context}\nQuestion: {question}"
//! chunk_size: 1000
//! chunk_overlap: 0
//! top_k: 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::RagError;

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    0
}

fn default_top_k() -> usize {
    4
}

/// Assembly-time configuration for a retrieval chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Expected embedding dimensionality. Must match the wired
    /// [`EmbeddingProvider`](crate::embeddings::EmbeddingProvider).
    pub embedding_size: usize,

    /// Prompt template with `{context}` and `{question}` placeholders.
    pub llm_prompt_template: String,

    /// Maximum segment length in characters. Defaults to 1000.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between neighbouring segments in characters. Defaults to 0.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of segments the retriever returns per query. Defaults to 4.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl RagConfig {
    /// Parse and validate a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the YAML is malformed, a required key
    /// is missing, or a value is out of range.
    pub fn from_yaml_str(raw: &str) -> Result<Self, RagError> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|err| RagError::config(format!("failed to parse YAML config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the file cannot be read or fails
    /// validation.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            RagError::config(format!(
                "failed to read config file {}: {err}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Validate value ranges.
    ///
    /// Template placeholder validation happens separately, when the template
    /// is compiled by [`PromptTemplate`](crate::prompt::PromptTemplate).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] for any out-of-range value.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.embedding_size == 0 {
            return Err(RagError::config("embedding_size must be at least 1"));
        }
        if self.chunk_size == 0 {
            return Err(RagError::config("chunk_size must be at least 1"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::config("top_k must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config = RagConfig::from_yaml_str(
            "embedding_size: 5\nllm_prompt_template: \"Context: {context}\\nQuestion: {question}\"\n",
        )
        .unwrap();
        assert_eq!(config.embedding_size, 5);
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 0);
        assert_eq!(config.top_k, 4);
        assert!(config.llm_prompt_template.contains("{context}"));
    }

    #[test]
    fn parses_explicit_overrides() {
        let config = RagConfig::from_yaml_str(
            "embedding_size: 3\nllm_prompt_template: \"{context} {question}\"\nchunk_size: 64\nchunk_overlap: 16\ntop_k: 2\n",
        )
        .unwrap();
        assert_eq!(config.chunk_size, 64);
        assert_eq!(config.chunk_overlap, 16);
        assert_eq!(config.top_k, 2);
    }

    #[test]
    fn missing_required_key_is_config_error() {
        let err = RagConfig::from_yaml_str("embedding_size: 5\n").unwrap_err();
        assert!(matches!(err, RagError::Config { .. }), "got: {err}");
    }

    #[test]
    fn zero_embedding_size_rejected() {
        let err = RagConfig::from_yaml_str(
            "embedding_size: 0\nllm_prompt_template: \"{context} {question}\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, RagError::Config { .. }));
    }

    #[test]
    fn overlap_not_smaller_than_chunk_size_rejected() {
        let err = RagConfig::from_yaml_str(
            "embedding_size: 5\nllm_prompt_template: \"{context} {question}\"\nchunk_size: 10\nchunk_overlap: 10\n",
        )
        .unwrap_err();
        assert!(matches!(err, RagError::Config { .. }));
    }

    #[test]
    fn zero_top_k_rejected() {
        let err = RagConfig::from_yaml_str(
            "embedding_size: 5\nllm_prompt_template: \"{context} {question}\"\ntop_k: 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, RagError::Config { .. }));
    }

    #[tokio::test]
    async fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rag.yaml");
        std::fs::write(
            &path,
            "embedding_size: 5\nllm_prompt_template: \"Context: {context}\\nQuestion: {question}\"\n",
        )
        .unwrap();

        let config = RagConfig::from_path(&path).await.unwrap();
        assert_eq!(config.embedding_size, 5);
    }

    #[tokio::test]
    async fn from_path_missing_file_is_config_error() {
        let err = RagConfig::from_path("/definitely/not/here.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Config { .. }));
    }
}
