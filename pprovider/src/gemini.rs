//! Gemini text generation over the Generative Language HTTP API.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{Generation, GeneratorFuture, ProviderError, SecretString, TextGenerator};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GeminiPart {
    text: String,
}

impl GenerateContentRequest {
    /// Wraps an already-flattened prompt as the single user content block.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

pub trait GeminiTransport: Send + Sync {
    /// Sends one generateContent request and returns the raw response body.
    fn generate<'a>(
        &'a self,
        model: &'a str,
        request: GenerateContentRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
    api_key: Arc<SecretString>,
}

impl GeminiHttpTransport {
    pub fn new(client: Client, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: Arc::new(api_key),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = format!("http {status}: {}", truncate(&body, 4096));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::NOT_FOUND => ProviderError::not_found(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate<'a>(
        &'a self,
        model: &'a str,
        request: GenerateContentRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let url = self.endpoint(model);
            let response = self
                .client
                .post(url)
                .query(&[("key", self.api_key.expose())])
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .text()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }
}

/// Single-shot Gemini gateway. Exactly one provider call per `generate`;
/// retry policy, if any, belongs to the caller.
#[derive(Clone)]
pub struct GeminiGenerator {
    transport: Arc<dyn GeminiTransport>,
    model: String,
}

impl GeminiGenerator {
    pub fn new(transport: Arc<dyn GeminiTransport>) -> Self {
        Self {
            transport,
            model: GEMINI_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_str()
    }

    pub fn default_http_transport(client: Client, api_key: SecretString) -> GeminiHttpTransport {
        GeminiHttpTransport::new(client, api_key)
    }
}

impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate<'a>(
        &'a self,
        prompt: String,
    ) -> GeneratorFuture<'a, Result<Generation, ProviderError>> {
        Box::pin(async move {
            let request = GenerateContentRequest::from_prompt(prompt);

            let started = Instant::now();
            let body = self.transport.generate(&self.model, request).await?;
            let elapsed = started.elapsed();

            // Prefer the candidate text; a response with no extractable text
            // still yields its raw body rather than an empty reply.
            let text = extract_reply_text(&body).unwrap_or_else(|| body.clone());

            tracing::debug!(
                provider = self.name(),
                model = %self.model,
                elapsed_ms = elapsed.as_millis() as u64,
                reply_chars = text.len(),
                "generation complete"
            );

            Ok(Generation { text, elapsed })
        })
    }
}

fn extract_reply_text(body: &str) -> Option<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).ok()?;
    let candidate = parsed.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;

    let mut text = String::new();
    for part in parts {
        if let Some(value) = part.text {
            text.push_str(&value);
        }
    }

    if text.is_empty() { None } else { Some(text) }
}

fn truncate(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }

    let mut output = input[..max].to_string();
    output.push_str("...");
    output
}

#[cfg(test)]
mod tests {
    use super::{GenerateContentRequest, extract_reply_text, truncate};

    #[test]
    fn request_wire_format_wraps_prompt_in_parts() {
        let request = GenerateContentRequest::from_prompt("System: hi\nAssistant:");
        let encoded = serde_json::to_value(&request).expect("request should encode");

        assert_eq!(
            encoded["contents"][0]["parts"][0]["text"],
            "System: hi\nAssistant:"
        );
    }

    #[test]
    fn extraction_concatenates_candidate_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello"},{"text":" there"}]}}]}"#;
        assert_eq!(extract_reply_text(body), Some("Hello there".to_string()));
    }

    #[test]
    fn extraction_returns_none_for_unexpected_shapes() {
        assert_eq!(extract_reply_text("{}"), None);
        assert_eq!(extract_reply_text(r#"{"candidates":[]}"#), None);
        assert_eq!(
            extract_reply_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            None
        );
        assert_eq!(extract_reply_text("not json"), None);
    }

    #[test]
    fn truncate_limits_long_bodies() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abc", 10), "0123456789...");
    }
}
