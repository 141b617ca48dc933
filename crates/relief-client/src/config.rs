//! Generation client configuration.

use std::time::Duration;

/// Default endpoint of the local generation service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/sendmoney";

/// Configuration for the HTTP generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Endpoint that accepts the prompt and answers with video bytes
    pub endpoint: String,
    /// Whole-request timeout (generation is slow)
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(600), // 10 minutes for video generation
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl GeneratorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("RELIEF_GENERATE_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(
                std::env::var("RELIEF_GENERATE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("RELIEF_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }

    /// Point the config at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
