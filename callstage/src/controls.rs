//! Local media commands and mute-state notifications

use callstage_core::{RoomEvent, SessionId, TrackKind};
use tracing::debug;

use crate::session::{MediaSession, SessionError};

/// Disable the local microphone track
pub async fn mute_audio<M: MediaSession + ?Sized>(media: &M) -> Result<(), SessionError> {
    debug!("muting local audio");
    media.set_local_audio(false).await
}

/// Re-enable the local microphone track
pub async fn unmute_audio<M: MediaSession + ?Sized>(media: &M) -> Result<(), SessionError> {
    debug!("unmuting local audio");
    media.set_local_audio(true).await
}

/// Disable the local camera track
pub async fn mute_video<M: MediaSession + ?Sized>(media: &M) -> Result<(), SessionError> {
    debug!("muting local video");
    media.set_local_video(false).await
}

/// Re-enable the local camera track
pub async fn unmute_video<M: MediaSession + ?Sized>(media: &M) -> Result<(), SessionError> {
    debug!("unmuting local video");
    media.set_local_video(true).await
}

/// Mute-state change observed for a remote participant's track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteEvent {
    /// Participant whose track changed
    pub session_id: SessionId,
    /// Kind of track that changed
    pub kind: TrackKind,
    /// Whether the track is now muted
    pub muted: bool,
}

/// Map a room event to the mute-state notification it implies, if any.
///
/// Track starts read as unmuted, track stops as muted. Non-track events and
/// events for the local participant map to `None`; local mute state belongs
/// to the caller issuing the commands.
pub fn mute_transition(event: &RoomEvent, local: Option<&SessionId>) -> Option<MuteEvent> {
    let (session_id, kind, muted) = match event {
        RoomEvent::TrackStarted {
            session_id, kind, ..
        } => (session_id, *kind, false),
        RoomEvent::TrackStopped {
            session_id, kind, ..
        } => (session_id, *kind, true),
        _ => return None,
    };
    if local == Some(session_id) {
        return None;
    }
    Some(MuteEvent {
        session_id: session_id.clone(),
        kind,
        muted,
    })
}
