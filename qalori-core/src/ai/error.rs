use thiserror::Error;

/// Errors returned by the AI collaborator.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("No API key configured. Set GEMINI_API_KEY or ai.api_key in the config file.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode AI service response: {0}")]
    Decode(String),

    #[error("AI service returned no content")]
    EmptyResponse,
}
