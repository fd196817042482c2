//! Participant identity and registry records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::track::{TrackHandle, TrackKind};

/// Stable session identifier assigned to a participant by the media provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A participant registered with the tracker.
///
/// Holds at most one current track per kind; starting a new track of a kind
/// the participant already publishes replaces the previous handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Stable session id
    session_id: SessionId,
    /// Display name, when the provider reported one
    user_name: Option<String>,
    /// Whether this is the local participant
    is_local: bool,
    /// Current video track, if publishing
    video_track: Option<TrackHandle>,
    /// Current audio track, if publishing
    audio_track: Option<TrackHandle>,
}

impl Participant {
    /// Create a participant record with no tracks yet
    pub fn new(session_id: SessionId, user_name: Option<String>, is_local: bool) -> Self {
        Self {
            session_id,
            user_name,
            is_local,
            video_track: None,
            audio_track: None,
        }
    }

    /// Get the session id
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Get the display name, if known
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Check whether this is the local participant
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// Get the current track of the given kind
    pub fn track(&self, kind: TrackKind) -> Option<&TrackHandle> {
        match kind {
            TrackKind::Audio => self.audio_track.as_ref(),
            TrackKind::Video => self.video_track.as_ref(),
        }
    }

    /// Check whether the participant currently publishes any track
    pub fn has_tracks(&self) -> bool {
        self.video_track.is_some() || self.audio_track.is_some()
    }

    /// Replace the current track of the given kind, returning the previous
    /// handle if one was set
    pub(crate) fn set_track(&mut self, kind: TrackKind, track: TrackHandle) -> Option<TrackHandle> {
        match kind {
            TrackKind::Audio => self.audio_track.replace(track),
            TrackKind::Video => self.video_track.replace(track),
        }
    }

    /// Clear the current track of the given kind, returning the removed
    /// handle if one was set
    pub(crate) fn clear_track(&mut self, kind: TrackKind) -> Option<TrackHandle> {
        match kind {
            TrackKind::Audio => self.audio_track.take(),
            TrackKind::Video => self.video_track.take(),
        }
    }
}
