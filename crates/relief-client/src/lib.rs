//! Client for the remote video generation endpoint.
//!
//! This crate provides:
//! - The `VideoGenerator` seam consumed by the preview controller
//! - An HTTP implementation that POSTs a prompt and receives video bytes
//! - Status classification (rate limited vs. generic failure)
//! - Cooperative cancellation tokens
//! - Request metrics

pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;

pub use cancel::{CancelHandle, CancelToken};
pub use client::{HttpVideoGenerator, VideoGenerator};
pub use config::GeneratorConfig;
pub use error::{GenerationError, GenerationResult};
