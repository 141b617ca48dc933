//! Video source lifecycle controller.
//!
//! Owns the single video the preview pane displays and guarantees that
//! switching between a locally picked file and a generated result never
//! leaks an object URL or applies a stale generation response.
//!
//! Owners must call [`VideoSourceController::dispose`] on shutdown.

pub mod controller;
pub mod error;
pub mod export;
pub mod local;
pub mod outcome;
pub mod registry;


pub use controller::VideoSourceController;
pub use error::{ControllerError, ControllerResult};
pub use export::DEFAULT_DOWNLOAD_NAME;
pub use local::load_local_file;
pub use outcome::{GenerateStatus, GenerationOutcome, IgnoreReason, Notice};
pub use registry::{BlobRegistry, ObjectUrlRegistry};
