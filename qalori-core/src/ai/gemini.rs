//! Google Gemini implementation of [`AiCollaborator`].
//!
//! Text and chat go through `generateContent` on the text model; images go
//! through `predict` on the Imagen model. The API key is sent in the
//! `x-goog-api-key` header and never appears in a request URL.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::{AiCollaborator, AiError, ChatMessage, ChatRole};

/// Environment variable holding the API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

const IMAGE_MIME_TYPE: &str = "image/jpeg";

const IMAGE_ASPECT_RATIO: &str = "16:9";

// generateContent

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![Part {
                text: Some(text.to_owned()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// predict (Imagen)

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini client for plan generation, meal images, and chat.
pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
        }
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// POSTs `body` and returns the raw response text of a successful call.
    async fn post<B: Serialize + ?Sized>(
        &self,
        model: &str,
        method: &str,
        body: &B,
    ) -> Result<String, AiError> {
        let url = self.build_url(model, method);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, model, method, "Gemini API error");
            return Err(map_api_error(status.as_u16(), &text));
        }

        Ok(text)
    }

    async fn generate_content(&self, request: &GenerateRequest<'_>) -> Result<String, AiError> {
        let body = self
            .post(&self.text_model, "generateContent", request)
            .await?;
        extract_text(&body)
    }
}

#[async_trait]
impl AiCollaborator for GeminiClient {
    #[instrument(skip_all, fields(model = %self.text_model))]
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        debug!("requesting structured content");
        self.generate_content(&request).await
    }

    #[instrument(skip_all, fields(model = %self.image_model))]
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, AiError> {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };

        debug!("requesting image");
        let body = self.post(&self.image_model, "predict", &request).await?;
        extract_image(&body)
    }

    #[instrument(skip_all, fields(model = %self.text_model, turns = history.len()))]
    async fn chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: history.iter().map(to_content).collect(),
            system_instruction: Some(Content::text(None, system_instruction)),
            generation_config: None,
        };

        debug!("sending chat turn");
        self.generate_content(&request).await
    }
}

fn to_content(message: &ChatMessage) -> Content {
    let role = match message.role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    };
    Content::text(Some(role), &message.text)
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, AiError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AiError::Decode(e.to_string()))?;

    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

/// First prediction as a `data:` URL. `None` when there is no image bytes.
fn extract_image(body: &str) -> Result<Option<String>, AiError> {
    let response: PredictResponse =
        serde_json::from_str(body).map_err(|e| AiError::Decode(e.to_string()))?;

    Ok(response.predictions.into_iter().next().and_then(|p| {
        let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
        let mime = p.mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_owned());
        Some(format!("data:{mime};base64,{bytes}"))
    }))
}

fn map_api_error(status: u16, body: &str) -> AiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_owned());
    AiError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_url() {
        let client = GeminiClient::new("secret").with_base_url("http://localhost:9000/");
        assert_eq!(
            client.build_url("gemini-2.5-flash", "generateContent"),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_key() {
        let client = GeminiClient::new("TOPSECRETKEY").with_base_url("http://127.0.0.1:1");
        let err = client
            .generate_json("plan please", &json!({"type": "OBJECT"}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::Http(_)));
        assert!(!err.to_string().contains("TOPSECRETKEY"));
        assert!(!format!("{:?}", err).contains("TOPSECRETKEY"));
    }

    #[test]
    fn test_defaults_and_builders() {
        let client = GeminiClient::new("k");
        assert_eq!(client.text_model(), DEFAULT_TEXT_MODEL);
        assert_eq!(client.image_model(), DEFAULT_IMAGE_MODEL);

        let client = client.with_text_model("t").with_image_model("i");
        assert_eq!(client.text_model(), "t");
        assert_eq!(client.image_model(), "i");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GeminiClient::new("very-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_json_request_shape() {
        let schema = json!({"type": "OBJECT"});
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), "plan please")],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "plan please");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"], schema);
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_chat_request_maps_roles() {
        let history = vec![
            ChatMessage::user("hi"),
            ChatMessage::model("hello!"),
            ChatMessage::user("protein ideas?"),
        ];
        let request = GenerateRequest {
            contents: history.iter().map(to_content).collect(),
            system_instruction: Some(Content::text(None, "be nice")),
            generation_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "protein ideas?");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be nice");
        assert!(value["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_image_request_shape() {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt: "soup" }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["instances"][0]["prompt"], "soup");
        assert_eq!(value["parameters"]["sampleCount"], 1);
        assert_eq!(value["parameters"]["aspectRatio"], "16:9");
        assert_eq!(
            value["parameters"]["outputOptions"]["mimeType"],
            "image/jpeg"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_empty() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(extract_text("{}"), Err(AiError::EmptyResponse)));
        assert!(matches!(extract_text("not json"), Err(AiError::Decode(_))));
    }

    #[test]
    fn test_extract_image() {
        let body = r#"{"predictions":[{"bytesBase64Encoded":"QUJD","mimeType":"image/jpeg"}]}"#;
        assert_eq!(
            extract_image(body).unwrap().as_deref(),
            Some("data:image/jpeg;base64,QUJD")
        );

        let body = r#"{"predictions":[{"bytesBase64Encoded":"QUJD"}]}"#;
        assert_eq!(
            extract_image(body).unwrap().as_deref(),
            Some("data:image/jpeg;base64,QUJD")
        );
    }

    #[test]
    fn test_extract_image_missing() {
        assert_eq!(extract_image("{}").unwrap(), None);
        assert_eq!(
            extract_image(r#"{"predictions":[{"bytesBase64Encoded":""}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_map_api_error() {
        let err = map_api_error(400, r#"{"error":{"code":400,"message":"API key not valid"}}"#);
        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected {:?}", other),
        }

        let err = map_api_error(503, "upstream down");
        assert!(matches!(err, AiError::Api { status: 503, ref message } if message == "upstream down"));
    }
}
