//! Shared value types for the Relief video preview.
//!
//! This crate provides:
//! - Blobs and the revocable object URLs that expose them
//! - The tagged `VideoSource` the preview pane renders
//! - Validated prompt text and the generation request body
//! - Controller lifecycle phases

pub mod blob;
pub mod phase;
pub mod prompt;
pub mod source;

pub use blob::{Blob, ObjectUrl, OBJECT_URL_SCHEME};
pub use phase::ControllerPhase;
pub use prompt::{GenerationRequest, Prompt};
pub use source::{SourceKind, VideoSource};
