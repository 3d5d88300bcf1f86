//! Conversational assistant.
//!
//! A [`ChatSession`] lives as long as one open conversation and owns its
//! history. Dropping the session forgets the conversation.

use tracing::error;

use crate::ai::{prompts::CHAT_SYSTEM_INSTRUCTION, AiCollaborator, ChatMessage};

/// Reply shown when the collaborator fails.
pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone)]
pub struct ChatSession {
    system_instruction: String,
    history: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_instruction(CHAT_SYSTEM_INSTRUCTION)
    }

    pub fn with_instruction(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends one user message and returns the reply.
    ///
    /// Never fails: a collaborator error yields [`CHAT_ERROR_REPLY`] and the
    /// exchange is left out of the history.
    pub async fn send(&mut self, ai: &dyn AiCollaborator, message: &str) -> String {
        self.history.push(ChatMessage::user(message));

        match ai.chat(&self.system_instruction, &self.history).await {
            Ok(reply) => {
                self.history.push(ChatMessage::model(reply.clone()));
                reply
            }
            Err(e) => {
                error!(error = %e, "chat request failed");
                self.history.pop();
                CHAT_ERROR_REPLY.to_string()
            }
        }
    }
}
