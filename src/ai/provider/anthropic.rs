//! Anthropic Messages API Provider
//!
//! Completion provider using the Messages API.
//! Returns the concatenated text blocks with token usage metrics.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    CompletionProvider, CompletionReply, CompletionRequest, ResponseMetadata, ResponseTiming,
    TokenUsage,
};
use crate::config::LlmConfig;
use crate::constants::{llm, network};
use crate::types::{ErrorCategory, ErrorClassifier, ProviderError, QualError, Result};

const PROVIDER_NAME: &str = "anthropic";

/// Anthropic provider with secure API key handling
pub struct AnthropicProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(llm::API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                QualError::Config(format!(
                    "Anthropic API key not found. Set {} or llm.api_key in config",
                    llm::API_KEY_ENV
                ))
            })?;

        // The request bound itself is enforced by the pipeline; this only
        // limits connection setup.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(network::CONNECTION_TIMEOUT_SECS))
            .build()
            .map_err(|e| QualError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            client,
        })
    }

    fn build_request<'a>(&self, request: &'a CompletionRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &request.model_id,
            max_tokens: request.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt_text,
            }],
        }
    }

    fn error(&self, category: ErrorCategory, message: impl Into<String>) -> ProviderError {
        ProviderError::with_provider(category, message, PROVIDER_NAME)
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionReply, ProviderError> {
        info!(
            "Requesting summary from Anthropic (model: {}, max_tokens: {})",
            request.model_id, request.max_tokens
        );

        let start_time = Instant::now();
        let url = format!("{}/v1/messages", self.api_base);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", llm::ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.error(ErrorCategory::Timeout, e.to_string())
                } else if e.is_connect() {
                    self.error(ErrorCategory::Network, e.to_string())
                } else {
                    ErrorClassifier::classify(&e.to_string(), PROVIDER_NAME)
                }
            })?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("{} ({})", message, status),
                PROVIDER_NAME,
            ));
        }

        let body: MessagesResponse = response.json().await.map_err(|e| {
            self.error(
                ErrorCategory::InvalidResponse,
                format!("Failed to parse Anthropic response: {}", e),
            )
        })?;

        let text = body
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(self.error(
                ErrorCategory::InvalidResponse,
                "No text content in Anthropic response",
            ));
        }

        let truncated = body.stop_reason.as_deref() == Some("max_tokens");
        if truncated {
            warn!(
                "Reply hit the {}-token cap; the summary block may be incomplete",
                request.max_tokens
            );
        }

        let usage = body
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            })
            .unwrap_or_default();

        debug!(
            "Anthropic replied in {}ms ({} input / {} output tokens)",
            elapsed.as_millis(),
            usage.input_tokens,
            usage.output_tokens
        );

        Ok(CompletionReply {
            text,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: body.model.unwrap_or_else(|| request.model_id.clone()),
                provider: PROVIDER_NAME.to_string(),
            },
            truncated,
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: Option<String>,
    stop_reason: Option<String>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
