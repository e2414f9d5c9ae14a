// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use super::{AttemptOutcome, ContentGenerator, NO_RESPONSE_PLACEHOLDER};
use crate::config::{ApiKey, GeminiConfig, LoggingConfig};
use crate::error::{ProxyError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key. Keeps the key out of URLs, and so out of
/// transport error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the public Gemini `generateContent` API.
pub struct GeminiClient {
    http_client: Client,
    api_base_url: String,
    api_key: Option<ApiKey>,
    sanitize_secrets: bool,
}

impl GeminiClient {
    /// Create a new Gemini client with a pooled HTTP client.
    ///
    /// A missing API key is not an error here: the server still starts and
    /// answers requests with a configuration error.
    pub fn new(config: &GeminiConfig, logging: &LoggingConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.usable_api_key(),
            sanitize_secrets: logging.sanitize_secrets,
        })
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    /// `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url,
            urlencoding::encode(model)
        )
    }

    fn scrub(&self, text: String) -> String {
        if self.sanitize_secrets {
            sanitize(&text)
        } else {
            text
        }
    }

    async fn read_success(&self, response: reqwest::Response) -> AttemptOutcome {
        let response_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return AttemptOutcome::Transport(
                    self.scrub(format!("Failed to read response body: {}", e)),
                )
            }
        };

        let parsed: GenerateContentResponse = match serde_json::from_str(&response_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                return AttemptOutcome::Transport(format!("Response parsing error: {}", e));
            }
        };

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Token usage: prompt={:?}, candidates={:?}, total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let text = parsed.first_text().unwrap_or(NO_RESPONSE_PLACEHOLDER);
        AttemptOutcome::Success(text.to_string())
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn submit(&self, model: &str, payload: &GenerateContentRequest) -> AttemptOutcome {
        let Some(api_key) = &self.api_key else {
            return AttemptOutcome::Transport("API key not configured".to_string());
        };

        let url = self.endpoint(model);
        debug!("Calling generateContent API for model: {}", model);

        let response = match self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::Transport(self.scrub(e.to_string())),
        };

        let status = response.status();
        if status.is_success() {
            return self.read_success(response).await;
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return AttemptOutcome::RateLimited;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return AttemptOutcome::Transport(
                    self.scrub(format!("Failed to read error body: {}", e)),
                )
            }
        };
        AttemptOutcome::Rejected {
            status: status.as_u16(),
            body: self.scrub(body),
        }
    }
}
