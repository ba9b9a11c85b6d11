//! Generative AI client for topic content and diagram images.
//!
//! The orchestrator only sees the [`ContentGenerator`] trait; [`GeminiClient`]
//! is the production implementation over the Gemini REST API.

mod error;
mod gemini;
mod prompts;
mod wire;

use async_trait::async_trait;

use crate::content::ContentBundle;

pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use prompts::{content_schema, image_prompt, topic_prompt, SYSTEM_INSTRUCTION};
pub use wire::TopicContentPayload;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate the full study bundle for a topic.
    ///
    /// `Ok(None)` means the provider answered without usable content.
    async fn generate_topic_content(
        &self,
        unit_name: &str,
        topic_name: &str,
    ) -> Result<Option<ContentBundle>, GenerationError>;

    /// Generate a diagram for a visual prompt, returning its URL (usually a data URI).
    ///
    /// Never retried by the caller; a failure only drops the image.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GenerationError>;
}
