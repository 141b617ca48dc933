//! Results the controller hands back to the presentation layer.

use std::fmt;
use std::time::Duration;

use relief_client::GenerationError;
use relief_models::VideoSource;

/// Why a call was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Prompt blank after trimming (or nothing to regenerate)
    EmptyPrompt,
    /// The same prompt is already being generated
    AlreadyInFlight,
    /// Controller was disposed
    Disposed,
}

/// Immediate answer to `generate` / `regenerate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    /// Request issued; any earlier in-flight request was superseded
    Started { request_id: u64 },
    Ignored(IgnoreReason),
}

impl GenerateStatus {
    pub fn is_started(&self) -> bool {
        matches!(self, GenerateStatus::Started { .. })
    }
}

/// User-visible failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Endpoint answered 429; not retried automatically
    RateLimited { retry_after: Option<Duration> },
    /// Any other non-2xx or transport failure
    RequestFailed { detail: String },
}

impl Notice {
    /// Classify a generation error. Cancellation produces no notice.
    pub fn from_error(err: &GenerationError) -> Option<Self> {
        match err {
            GenerationError::Cancelled => None,
            GenerationError::RateLimited { retry_after } => Some(Notice::RateLimited {
                retry_after: *retry_after,
            }),
            other => Some(Notice::RequestFailed {
                detail: other.to_string(),
            }),
        }
    }

    /// Short text suitable for a toast or alert.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::RateLimited { .. } => "Cooling down; try again in a bit.",
            Notice::RequestFailed { .. } => "Video generation failed. Please try again.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// How a settled generation request affected the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Result applied; carries the new source
    Ready(VideoSource),
    /// Source left unchanged
    Failed(Notice),
    /// Silently dropped
    Cancelled,
}

impl GenerationOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            GenerationOutcome::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_has_no_notice() {
        assert_eq!(Notice::from_error(&GenerationError::Cancelled), None);
    }

    #[test]
    fn test_rate_limit_notice() {
        let err = GenerationError::RateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(
            Notice::from_error(&err),
            Some(Notice::RateLimited {
                retry_after: Some(Duration::from_secs(5))
            })
        );
    }

    #[test]
    fn test_other_errors_are_request_failed() {
        let err = GenerationError::from_http_status(503, "busy", None);
        let notice = Notice::from_error(&err).unwrap();
        assert!(matches!(notice, Notice::RequestFailed { .. }));
        assert_eq!(notice.message(), "Video generation failed. Please try again.");
    }
}
