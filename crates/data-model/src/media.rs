//! Media descriptors and the media status taxonomy.
//!
//! Decoding is owned by whatever player backs a session. This module only
//! describes the file handed to it and classifies what can go wrong, so
//! media failures can be reported without touching data-side state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracksync_common::error::{TracksyncError, TracksyncResult};

/// How likely a player is to decode a container, in the spirit of
/// `canPlayType`: a guess made from the container alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playability {
    Probably,
    Maybe,
    No,
}

impl fmt::Display for Playability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probably => write!(f, "probably"),
            Self::Maybe => write!(f, "maybe"),
            Self::No => write!(f, "no"),
        }
    }
}

/// Description of a video file selected for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// MIME type guessed from the extension, `None` when unknown.
    pub mime: Option<String>,
    pub playability: Playability,
}

impl MediaInfo {
    /// Inspect a file on disk without decoding it.
    pub fn probe(path: &Path) -> TracksyncResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| TracksyncError::from_io_at(e, path))?;
        if !metadata.is_file() {
            return Err(TracksyncError::media(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        Ok(Self::describe(path, metadata.len()))
    }

    /// Describe a file from its name and size alone.
    pub fn describe(path: &Path, size_bytes: u64) -> Self {
        let (mime, playability) = guess_container(path);
        Self {
            path: path.to_path_buf(),
            size_bytes,
            mime: mime.map(String::from),
            playability,
        }
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn guess_container(path: &Path) -> (Option<&'static str>, Playability) {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => (Some("video/mp4"), Playability::Probably),
        "webm" => (Some("video/webm"), Playability::Probably),
        "ogv" => (Some("video/ogg"), Playability::Maybe),
        "mov" => (Some("video/quicktime"), Playability::Maybe),
        "mkv" => (Some("video/x-matroska"), Playability::Maybe),
        "avi" => (Some("video/x-msvideo"), Playability::No),
        _ => (None, Playability::No),
    }
}

/// Playback failure categories reported by a media player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaErrorKind {
    /// Loading was aborted by the user or the player.
    Aborted,
    /// The byte stream could not be read.
    Network,
    /// The stream was read but could not be decoded.
    Decode,
    /// The container or codec is not supported.
    SrcNotSupported,
    Unknown,
}

impl MediaErrorKind {
    /// Map a numeric player error code (1-4) to a category.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SrcNotSupported,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for MediaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted => write!(f, "MEDIA_ERR_ABORTED"),
            Self::Network => write!(f, "NETWORK"),
            Self::Decode => write!(f, "DECODE"),
            Self::SrcNotSupported => write!(f, "SRC_NOT_SUPPORTED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
