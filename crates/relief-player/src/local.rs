//! Loading user-picked files.

use std::io;
use std::path::Path;

use tracing::debug;

use relief_models::Blob;

/// Read a local video file into a blob.
///
/// The content type is guessed from the extension; unknown extensions are
/// left untyped.
pub async fn load_local_file(path: impl AsRef<Path>) -> io::Result<Blob> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", data.len(), path.display());

    let mut blob = Blob::new(data);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        blob = blob.with_name(name);
    }
    if let Some(ct) = guess_video_type(path) {
        blob = blob.with_content_type(ct);
    }
    Ok(blob)
}

fn guess_video_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        "mkv" => Some("video/x-matroska"),
        "ogv" => Some("video/ogg"),
        _ => None,
    }
}
