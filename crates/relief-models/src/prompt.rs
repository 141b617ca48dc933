//! Prompt text and the generation request body.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trimmed, non-empty prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Validate raw input. Returns `None` for blank text.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON body of a generation call.
///
/// The endpoint expects the prompt under the `response` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub response: String,
}

impl GenerationRequest {
    pub fn new(prompt: &Prompt) -> Self {
        Self {
            response: prompt.as_str().to_string(),
        }
    }
}
