//! What the preview pane is currently able to play.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blob::ObjectUrl;

/// Origin of a playable source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// File picked by the user
    Local,
    /// Bytes returned by a generation call
    Remote,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Local => "local",
            SourceKind::Remote => "remote",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The currently displayed video.
///
/// `None` renders a placeholder; the blob variants bind their URL to the
/// player with transport controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum VideoSource {
    #[default]
    None,
    LocalBlob(ObjectUrl),
    RemoteBlob(ObjectUrl),
}

impl VideoSource {
    /// Build a source of the given kind.
    pub fn from_kind(kind: SourceKind, url: ObjectUrl) -> Self {
        match kind {
            SourceKind::Local => VideoSource::LocalBlob(url),
            SourceKind::Remote => VideoSource::RemoteBlob(url),
        }
    }

    /// The playable URL, if any.
    pub fn url(&self) -> Option<&ObjectUrl> {
        match self {
            VideoSource::None => None,
            VideoSource::LocalBlob(url) | VideoSource::RemoteBlob(url) => Some(url),
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            VideoSource::None => None,
            VideoSource::LocalBlob(_) => Some(SourceKind::Local),
            VideoSource::RemoteBlob(_) => Some(SourceKind::Remote),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, VideoSource::None)
    }
}
