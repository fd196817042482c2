//! On-screen rendering slots

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::participant::SessionId;
use crate::track::{TrackHandle, TrackKind};

/// Identifier of a rendering slot.
///
/// There is exactly one `Main` slot (the large view) and one thumbnail slot
/// per participant. Thumbnail slots are created when the first track of a
/// participant is attached and removed when the participant leaves or stops
/// publishing entirely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    /// The single large view
    Main,
    /// Per-participant thumbnail, keyed by session id
    Thumbnail(SessionId),
}

impl SlotId {
    /// Thumbnail slot for the given participant
    pub fn thumbnail(session_id: impl Into<SessionId>) -> Self {
        SlotId::Thumbnail(session_id.into())
    }

    /// Check whether this is the main slot
    pub fn is_main(&self) -> bool {
        matches!(self, SlotId::Main)
    }

    /// Session id of the thumbnail owner, if this is a thumbnail slot
    pub fn thumbnail_of(&self) -> Option<&SessionId> {
        match self {
            SlotId::Main => None,
            SlotId::Thumbnail(session_id) => Some(session_id),
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Main => write!(f, "main"),
            SlotId::Thumbnail(session_id) => write!(f, "thumbnail:{}", session_id),
        }
    }
}

/// Current contents of a slot: at most one track per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContents {
    /// Video track shown in the slot, if any
    video: Option<TrackHandle>,
    /// Audio track played from the slot, if any
    audio: Option<TrackHandle>,
}

impl SlotContents {
    /// Get the track of the given kind currently in the slot
    pub fn track(&self, kind: TrackKind) -> Option<&TrackHandle> {
        match kind {
            TrackKind::Audio => self.audio.as_ref(),
            TrackKind::Video => self.video.as_ref(),
        }
    }

    /// Check whether the slot holds no tracks at all
    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }

    /// Set or clear the track of the given kind, returning the previous one
    pub(crate) fn set_track(
        &mut self,
        kind: TrackKind,
        track: Option<TrackHandle>,
    ) -> Option<TrackHandle> {
        match kind {
            TrackKind::Audio => std::mem::replace(&mut self.audio, track),
            TrackKind::Video => std::mem::replace(&mut self.video, track),
        }
    }

    /// Build contents holding a single video track
    pub(crate) fn with_video(track: Option<TrackHandle>) -> Self {
        Self {
            video: track,
            audio: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_display() {
        assert_eq!(SlotId::Main.to_string(), "main");
        assert_eq!(SlotId::thumbnail("abc").to_string(), "thumbnail:abc");
    }

    #[test]
    fn test_thumbnail_owner_access() {
        let slot = SlotId::thumbnail("p1");
        assert!(!slot.is_main());
        assert_eq!(slot.thumbnail_of(), Some(&SessionId::from("p1")));
        assert_eq!(SlotId::Main.thumbnail_of(), None);
    }

    #[test]
    fn test_slot_contents_one_track_per_kind() {
        let mut contents = SlotContents::default();
        assert!(contents.is_empty());

        contents.set_track(TrackKind::Video, Some(TrackHandle::from("v1")));
        let previous = contents.set_track(TrackKind::Video, Some(TrackHandle::from("v2")));
        assert_eq!(previous, Some(TrackHandle::from("v1")));
        assert_eq!(
            contents.track(TrackKind::Video),
            Some(&TrackHandle::from("v2"))
        );

        contents.set_track(TrackKind::Video, None);
        assert!(contents.is_empty());
    }
}
