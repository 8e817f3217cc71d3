//! Generative inference provider client
//!
//! **[SA-INF-010]** One structured-prompt request against one named model
//! variant, returning raw text output or a typed failure. HTTP status mapping:
//! 429 and 5xx and timeouts are retryable; 401/403 and other 4xx are fatal.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::types::{InferenceError, InferenceProvider, InferenceRequest};

const USER_AGENT: &str = "Nestling/0.1.0 (analysis service)";

/// Cap on error-body bytes carried into failure details
const ERROR_DETAIL_MAX: usize = 300;

/// Rate limiter enforcing a minimum interval between outbound requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the configured interval
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Provider rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

// Wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// HTTP client for the generative multimodal inference provider
pub struct InferenceClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
    api_key: String,
}

impl InferenceClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout_ms: u64,
        min_request_interval_ms: u64,
    ) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(request_timeout_ms))
            .build()
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(min_request_interval_ms)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Issue one generateContent call against one model variant
    ///
    /// **[SA-INF-010]** Returns the concatenated candidate text or a typed failure.
    async fn generate_text(
        &self,
        variant: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<String, InferenceError> {
        // Rate limit
        self.rate_limiter.wait().await;

        let url = format!("{}/models/{}:generateContent", self.base_url, variant);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        text: Some(request.prompt.to_string()),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: request.mime_type.to_string(),
                            data: STANDARD.encode(request.media),
                        }),
                    },
                ],
            }],
        };

        tracing::debug!(
            variant = %variant,
            mime_type = %request.mime_type,
            media_bytes = request.media.len(),
            "Querying inference provider"
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout
                } else {
                    InferenceError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), detail));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Network(format!("response decode failed: {}", e)))?;

        let text = collect_text(&parsed);
        if text.trim().is_empty() {
            return Err(InferenceError::EmptyCompletion);
        }

        tracing::debug!(variant = %variant, chars = text.len(), "Provider completion received");
        Ok(text)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for InferenceClient {
    async fn generate(
        &self,
        variant: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<String, InferenceError> {
        self.generate_text(variant, request).await
    }
}

/// Map a non-2xx provider status to a typed failure
///
/// **[SA-INF-030]** 429 and 5xx are transient; 401/403 means the credentials
/// are wrong everywhere; any other 4xx means the request shape is wrong and
/// no other variant will accept it either.
fn classify_status(status: u16, detail: String) -> InferenceError {
    let mut detail = detail;
    detail.truncate(ERROR_DETAIL_MAX);

    match status {
        429 => InferenceError::RateLimited,
        401 | 403 => InferenceError::AuthRejected(status),
        500..=599 => InferenceError::ServerError(status),
        _ => InferenceError::BadRequest { status, detail },
    }
}

/// Concatenate the text parts of every candidate
fn collect_text(response: &GenerateResponse) -> String {
    let mut out = String::new();
    for candidate in &response.candidates {
        if let Some(content) = &candidate.content {
            for part in &content.parts {
                if let Some(text) = &part.text {
                    out.push_str(text);
                }
            }
        }
    }
    out
}
