//! Generative-AI collaborator.
//!
//! The collaborator is a transport: it turns a prompt into text (optionally
//! constrained to a JSON schema), an image, or a chat reply. Prompt wording
//! lives in [`prompts`], response shapes in [`schema`], and everything that
//! interprets responses lives in the orchestrator.

mod error;
mod gemini;
pub mod prompts;
pub mod schema;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::AiError;
pub use gemini::{GeminiClient, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GEMINI_API_KEY_ENV};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[async_trait]
pub trait AiCollaborator: Send + Sync {
    /// Generates text that is expected to parse as JSON matching `schema`.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AiError>;

    /// Generates one image and returns it as a `data:` URL, or `None` when the
    /// service returned no image.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, AiError>;

    /// Continues a conversation. `history` ends with the newest user turn.
    async fn chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, AiError>;
}
