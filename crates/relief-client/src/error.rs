//! Generation client error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Longest response body kept in a failure message.
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limited by generation endpoint")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Generation endpoint returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Generation request cancelled")]
    Cancelled,

    #[error("Invalid generator configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GenerationError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify a non-success HTTP status.
    pub fn from_http_status(status: u16, body: &str, retry_after: Option<Duration>) -> Self {
        if status == 429 {
            return Self::RateLimited { retry_after };
        }

        let body = if body.len() > MAX_ERROR_BODY {
            let mut end = MAX_ERROR_BODY;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &body[..end])
        } else {
            body.to_string()
        };

        Self::RequestFailed { status, body }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerationError::Cancelled)
    }

    /// HTTP status that caused the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenerationError::RateLimited { .. } => Some(429),
            GenerationError::RequestFailed { status, .. } => Some(*status),
            GenerationError::Network(e) => e.status().map(|s| s.as_u16()),
            GenerationError::Cancelled | GenerationError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status_429() {
        let err = GenerationError::from_http_status(429, "slow down", Some(Duration::from_secs(3)));
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));
        match err {
            GenerationError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(3)))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_http_status_500() {
        let err = GenerationError::from_http_status(500, "operation failed to load.", None);
        assert!(!err.is_rate_limited());
        assert!(matches!(err, GenerationError::RequestFailed { status: 500, .. }));
    }

    #[test]
    fn test_long_bodies_truncated() {
        let body = "é".repeat(600);
        let err = GenerationError::from_http_status(502, &body, None);
        match err {
            GenerationError::RequestFailed { body, .. } => {
                assert!(body.ends_with("..."));
                assert!(body.len() <= MAX_ERROR_BODY + 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_cancelled_has_no_status() {
        assert!(GenerationError::Cancelled.is_cancelled());
        assert_eq!(GenerationError::Cancelled.status(), None);
    }
}
