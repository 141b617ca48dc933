//! Controller error types.

use thiserror::Error;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("No video to download yet")]
    NoVideo,

    #[error("Object URL no longer resolves: {0}")]
    Revoked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
