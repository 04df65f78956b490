//! HTTP client for the generative-model API
//!
//! A thin wrapper around the `generateContent` endpoint with structured
//! output: the response schema rides in the generation config and the
//! model's JSON text is parsed back out of the first candidate. Timeouts
//! are classified separately so callers can surface a retry suggestion.

use std::time::Duration;

use serde_json::{Value, json};
use thiserror::Error;

/// Generative-model client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Client for structured filter extraction
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GenerativeClient {
    /// Create a client with the given endpoint, model and timeout
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Request a schema-constrained JSON object for the given prompt
    ///
    /// # Arguments
    /// * `api_key` - API key sent as a query parameter
    /// * `system_instruction` - Fixed behavioral instruction
    /// * `prompt` - The per-call user prompt
    /// * `response_schema` - JSON schema constraining the output
    ///
    /// # Returns
    /// The parsed JSON object the model produced
    pub async fn generate_structured(
        &self,
        api_key: &str,
        system_instruction: &str,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<Value, ClientError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "system_instruction": {"parts": [{"text": system_instruction}]},
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": 0.0,
                "responseMimeType": "application/json",
                "responseJsonSchema": response_schema,
                "thinkingConfig": {"thinkingLevel": "low"},
            },
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(status.as_u16(), truncate(&detail, 300)));
        }

        let envelope: Value = response.json().await.map_err(classify)?;
        let text = envelope
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Parse("empty structured response".to_string()))?;

        serde_json::from_str(text).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

fn classify(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(error.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
