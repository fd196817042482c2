//! Room and track lifecycle events consumed by the tracker.
//!
//! The variants mirror the media provider's wire events one for one, so a
//! JSON payload from the provider boundary deserializes directly into
//! [`RoomEvent`]. Events are delivered on a single logical timeline and must
//! be handed to the tracker strictly in arrival order.

use serde::{Deserialize, Serialize};

use crate::participant::SessionId;
use crate::track::{TrackHandle, TrackKind};

/// A single room or track lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum RoomEvent {
    /// A participant joined the session (also emitted for the local
    /// participant when the session itself joins)
    ParticipantJoined {
        /// Stable session id of the participant
        session_id: SessionId,
        /// Display name, if the provider reported one
        user_name: Option<String>,
        /// Whether this is the local participant
        is_local: bool,
    },

    /// A participant left the session
    ParticipantLeft {
        /// Session id of the departed participant
        session_id: SessionId,
    },

    /// A participant started publishing a track
    TrackStarted {
        /// Session id of the owning participant
        session_id: SessionId,
        /// Kind of the started track
        kind: TrackKind,
        /// Handle of the started track
        track: TrackHandle,
    },

    /// A participant stopped publishing a track
    TrackStopped {
        /// Session id of the owning participant
        session_id: SessionId,
        /// Kind of the stopped track
        kind: TrackKind,
        /// Handle of the stopped track
        track: TrackHandle,
    },

    /// The provider reported a new dominant speaker
    #[serde(rename = "active-speaker-change")]
    ActiveSpeakerChanged {
        /// Session id of the new dominant speaker
        session_id: SessionId,
    },
}

impl RoomEvent {
    /// Get the event type as a string for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::ParticipantJoined { .. } => "participant-joined",
            RoomEvent::ParticipantLeft { .. } => "participant-left",
            RoomEvent::TrackStarted { .. } => "track-started",
            RoomEvent::TrackStopped { .. } => "track-stopped",
            RoomEvent::ActiveSpeakerChanged { .. } => "active-speaker-change",
        }
    }

    /// Session id the event refers to (every event names exactly one)
    pub fn session_id(&self) -> &SessionId {
        match self {
            RoomEvent::ParticipantJoined { session_id, .. }
            | RoomEvent::ParticipantLeft { session_id }
            | RoomEvent::TrackStarted { session_id, .. }
            | RoomEvent::TrackStopped { session_id, .. }
            | RoomEvent::ActiveSpeakerChanged { session_id } => session_id,
        }
    }

    /// Check if this is a membership event (join, leave, speaker change)
    pub fn is_participant_event(&self) -> bool {
        matches!(
            self,
            RoomEvent::ParticipantJoined { .. }
                | RoomEvent::ParticipantLeft { .. }
                | RoomEvent::ActiveSpeakerChanged { .. }
        )
    }

    /// Check if this is a track lifecycle event
    pub fn is_track_event(&self) -> bool {
        matches!(
            self,
            RoomEvent::TrackStarted { .. } | RoomEvent::TrackStopped { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_session_id() {
        let event = RoomEvent::TrackStarted {
            session_id: SessionId::from("p1"),
            kind: TrackKind::Video,
            track: TrackHandle::from("t1"),
        };
        assert_eq!(event.event_type(), "track-started");
        assert_eq!(event.session_id(), &SessionId::from("p1"));
        assert!(event.is_track_event());
        assert!(!event.is_participant_event());
    }

    #[test]
    fn test_event_serialization_tags() {
        let joined = RoomEvent::ParticipantJoined {
            session_id: SessionId::from("p1"),
            user_name: Some("Ada".to_string()),
            is_local: true,
        };
        let json = serde_json::to_string(&joined).unwrap();
        assert!(json.contains("\"event\":\"participant-joined\""));
        assert!(json.contains("\"is_local\":true"));

        let speaker = RoomEvent::ActiveSpeakerChanged {
            session_id: SessionId::from("p2"),
        };
        let json = serde_json::to_string(&speaker).unwrap();
        assert!(json.contains("\"event\":\"active-speaker-change\""));
    }

    #[test]
    fn test_event_deserialization_from_wire_payload() {
        let payload = r#"{
            "event": "track-started",
            "session_id": "p7",
            "kind": "video",
            "track": "t42"
        }"#;
        let event: RoomEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(
            event,
            RoomEvent::TrackStarted {
                session_id: SessionId::from("p7"),
                kind: TrackKind::Video,
                track: TrackHandle::from("t42"),
            }
        );
    }
}
