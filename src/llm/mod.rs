//! Chat model seam: response shape, fake model, and output parsing.
//!
//! [`ChatModel`] is the substitution point between a real remote model and the
//! deterministic [`FakeChatModel`] used in test wiring. Both variants satisfy
//! the same response-shape contract — one or more [`ChatChoice`]s, each with a
//! role marker and text — so output parsing is uniform across variants.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::RagError;

/// A message in a conversation: a role marker plus text content.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender (e.g. "user", "assistant", "system").
    pub role: String,
    /// The text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// User input message role.
    pub const USER: &'static str = "user";
    /// Model response message role.
    pub const ASSISTANT: &'static str = "assistant";
    /// System prompt or instruction message role.
    pub const SYSTEM: &'static str = "system";

    /// Creates a new message with the specified role and content.
    #[must_use]
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self::new(Self::USER, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: &str) -> Self {
        Self::new(Self::ASSISTANT, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: &str) -> Self {
        Self::new(Self::SYSTEM, content)
    }
}

/// One candidate answer inside a [`ChatResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Zero-based position of this candidate.
    pub index: usize,
    /// The candidate message.
    pub message: ChatMessage,
    /// Why generation stopped, when the backend reports it.
    pub finish_reason: Option<String>,
}

/// Structured result of a model invocation.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Candidate answers, best first.
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Build a response holding exactly one candidate.
    #[must_use]
    pub fn single(message: ChatMessage) -> Self {
        Self {
            choices: vec![ChatChoice {
                index: 0,
                message,
                finish_reason: None,
            }],
        }
    }

    /// Extract the text of the first candidate — the output-parsing stage.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ModelResponse`] when the response contains zero
    /// candidates.
    pub fn first_content(&self) -> Result<&str, RagError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| RagError::ModelResponse {
                reason: "response contains no choices".to_string(),
            })
    }
}

/// Sends a rendered prompt to a language model.
///
/// Stateless per call. `history` carries prior conversation messages; the
/// fake variant ignores it.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Invoke the model with a rendered prompt.
    ///
    /// # Errors
    ///
    /// Implementations return [`RagError::ModelResponse`] (or a transport
    /// error of their own) on failure. The fake variant never fails.
    async fn complete(
        &self,
        prompt: &str,
        history: &[ChatMessage],
    ) -> Result<ChatResponse, RagError>;
}

/// Deterministic model for testing pipeline assembly without a live backend.
///
/// Returns exactly one candidate with the `"assistant"` role and a fixed,
/// predetermined answer, regardless of prompt content.
#[derive(Debug, Clone)]
pub struct FakeChatModel {
    answer: String,
}

impl FakeChatModel {
    /// Create a fake model that always answers with the given text.
    #[must_use]
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl ChatModel for FakeChatModel {
    async fn complete(
        &self,
        _prompt: &str,
        _history: &[ChatMessage],
    ) -> Result<ChatResponse, RagError> {
        Ok(ChatResponse::single(ChatMessage::assistant(&self.answer)))
    }
}
