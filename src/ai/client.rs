use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::ai::error::AnalysisError;

/// One part of a completion request: prompt text or inline image bytes.
#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    InlineImage { mime_type: String, data_b64: String },
}

/// A schema-constrained completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub parts: Vec<Part>,
    pub schema: Value,
}

impl CompletionRequest {
    pub fn text(prompt: String, schema: Value) -> Self {
        Self {
            parts: vec![Part::Text(prompt)],
            schema,
        }
    }
}

/// Seam between the orchestration layer and the hosted model. Returns the
/// raw JSON text of the completion.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn generate(&self, request: CompletionRequest) -> Result<String, AnalysisError>;
}

/// REST client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: CompletionRequest) -> Result<String, AnalysisError> {
        let parts: Vec<Value> = request
            .parts
            .iter()
            .map(|p| match p {
                Part::Text(text) => json!({ "text": text }),
                Part::InlineImage { mime_type, data_b64 } => json!({
                    "inline_data": { "mime_type": mime_type, "data": data_b64 }
                }),
            })
            .collect();

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "role": "user", "parts": parts }],
                "generationConfig": {
                    // Deterministic output keeps repeated queries cacheable.
                    "temperature": 0,
                    "responseMimeType": "application/json",
                    "responseSchema": request.schema,
                }
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let text = extract_completion_text(&body)
            .ok_or_else(|| AnalysisError::InvalidResponse("no completion text".into()))?;
        debug!(bytes = text.len(), "completion received");
        Ok(text)
    }
}

/// Pulls the completion text out of a generateContent response body.
pub(crate) fn extract_completion_text(body: &Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_candidates() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"name\":\"Oats\"}" }] }
            }]
        });
        assert_eq!(
            extract_completion_text(&body).as_deref(),
            Some("{\"name\":\"Oats\"}")
        );
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert!(extract_completion_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_completion_text(&json!({})).is_none());
    }
}
