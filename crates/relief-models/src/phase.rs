//! Controller lifecycle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of a video source controller.
///
/// `Idle -> Loading` on an accepted generation, `Loading -> Ready` when it
/// settles, `Ready` after any local pick. `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A generation request is in flight
    Loading,
    /// Last transition completed (source set or left unchanged)
    Ready,
    /// Handles released; the controller must not be reused
    Disposed,
}

impl ControllerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerPhase::Idle => "idle",
            ControllerPhase::Loading => "loading",
            ControllerPhase::Ready => "ready",
            ControllerPhase::Disposed => "disposed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerPhase::Disposed)
    }
}

impl fmt::Display for ControllerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
