//! Prompt template with `{context}` and `{question}` placeholders.
//!
//! A [`PromptTemplate`] is compiled once at assembly time; a template missing
//! either placeholder is a hard error surfaced before any model call ever
//! happens. Rendering joins the retrieved segments with a fixed separator and
//! substitutes both placeholders.

use crate::ingestion::Segment;
use crate::types::RagError;

/// Placeholder substituted with the joined retrieved context.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// Placeholder substituted with the user query.
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Separator between segments in the rendered context block.
const SEGMENT_SEPARATOR: &str = "\n\n";

/// A compiled prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Compile a template string, checking that both placeholders are present.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Template`] if `{context}` or `{question}` is
    /// missing.
    pub fn compile(template: &str) -> Result<Self, RagError> {
        for placeholder in [CONTEXT_PLACEHOLDER, QUESTION_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(RagError::template(format!(
                    "template is missing required placeholder '{placeholder}'"
                )));
            }
        }
        Ok(Self {
            template: template.to_owned(),
        })
    }

    /// The raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Render the template with retrieved context and the query string.
    ///
    /// Segment contents are joined in retrieval order with a blank line
    /// between them, so rendering is deterministic for a fixed input.
    #[must_use]
    pub fn render(&self, context: &[Segment], question: &str) -> String {
        let joined = context
            .iter()
            .map(|segment| segment.content.as_str())
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);
        self.template
            .replace(CONTEXT_PLACEHOLDER, &joined)
            .replace(QUESTION_PLACEHOLDER, question)
    }
}

impl TryFrom<&str> for PromptTemplate {
    type Error = RagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::compile(value)
    }
}
