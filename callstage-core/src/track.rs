//! Track handles and kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying a single media track.
///
/// The tracker never inspects the handle; it only moves it between slots and
/// hands it back to the renderer for attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackHandle(String);

impl TrackHandle {
    /// Create a track handle from any string-like value
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Get the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl From<&str> for TrackHandle {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

/// Track kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Audio track
    Audio,
    /// Video track
    Video,
}

impl TrackKind {
    /// Both kinds, in the order slot updates are emitted
    pub const ALL: [TrackKind; 2] = [TrackKind::Video, TrackKind::Audio];
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Video => write!(f, "video"),
        }
    }
}
