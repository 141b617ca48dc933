//! Video generation HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use relief_models::{Blob, GenerationRequest, Prompt};

use crate::cancel::CancelToken;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::metrics::record_request;

/// Anything that turns a prompt into video bytes.
///
/// Implementations must return promptly with `GenerationError::Cancelled`
/// once `cancel` fires.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt, cancel: CancelToken) -> GenerationResult<Blob>;
}

/// Generator backed by a single POST endpoint.
pub struct HttpVideoGenerator {
    http: Client,
    endpoint: Url,
}

impl HttpVideoGenerator {
    /// Create a new generator. Fails on an unparseable or non-HTTP endpoint.
    pub fn new(config: GeneratorConfig) -> GenerationResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| GenerationError::config(format!("{}: {}", config.endpoint, e)))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GenerationError::config(format!(
                "unsupported scheme '{}' in {}",
                endpoint.scheme(),
                config.endpoint
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(GenerationError::Network)?;

        Ok(Self { http, endpoint })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenerationResult<Self> {
        Self::new(GeneratorConfig::from_env())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute(&self, prompt: &Prompt) -> GenerationResult<Blob> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GenerationRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;

        let mut blob = Blob::new(bytes.to_vec());
        if let Some(ct) = content_type {
            blob = blob.with_content_type(ct);
        }
        Ok(blob)
    }
}

#[async_trait]
impl VideoGenerator for HttpVideoGenerator {
    async fn generate(&self, prompt: &Prompt, cancel: CancelToken) -> GenerationResult<Blob> {
        debug!(endpoint = %self.endpoint, "Sending generation request");
        let started = Instant::now();

        // Dropping the losing branch aborts the transfer.
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GenerationError::Cancelled),
            result = self.execute(prompt) => result,
        };

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(blob) => {
                record_request("200", latency_ms);
                info!(
                    bytes = blob.len(),
                    latency_ms = latency_ms as u64,
                    "Generation request succeeded"
                );
            }
            Err(GenerationError::Cancelled) => {
                record_request("cancelled", latency_ms);
                debug!("Generation request cancelled");
            }
            Err(e) => {
                let status = e
                    .status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "network".to_string());
                record_request(&status, latency_ms);
                warn!(status = %status, "Generation request failed: {}", e);
            }
        }

        result
    }
}

async fn classify_failure(response: Response) -> GenerationError {
    let status = response.status();
    let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after)
    } else {
        None
    };

    let body = response.text().await.unwrap_or_default();
    GenerationError::from_http_status(status.as_u16(), &body, retry_after)
}

/// Parse a delay-seconds `Retry-After` value. HTTP-date values are ignored.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
