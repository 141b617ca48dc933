//! Saving the displayed video to disk.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use relief_models::Blob;

/// File name used when the target is a directory.
pub const DEFAULT_DOWNLOAD_NAME: &str = "video.mp4";

/// Write a blob to `target`, returning the final path.
///
/// An existing directory target receives `video.mp4`; missing parent
/// directories are created.
pub async fn write_video(blob: &Blob, target: &Path) -> io::Result<PathBuf> {
    let path = if tokio::fs::metadata(target)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        target.join(DEFAULT_DOWNLOAD_NAME)
    } else {
        target.to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&path, blob.data()).await?;
    info!("Saved {} bytes to {}", blob.len(), path.display());
    Ok(path)
}
