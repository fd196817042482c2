//! Error types for presentation state tracking

use thiserror::Error;

use crate::participant::SessionId;
use crate::track::TrackHandle;

/// Errors raised while processing room and track events.
///
/// `UnknownParticipant` and `UnknownTrack` are absorbed inside
/// [`PresentationTracker::handle`](crate::tracker::PresentationTracker::handle)
/// as no-ops because the external event source does not guarantee strictly
/// causal delivery. Only `InvalidPinTarget` surfaces to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Event referenced a session id with no registered participant
    #[error("Unknown participant: {session_id}")]
    UnknownParticipant {
        /// Session id the event referenced
        session_id: SessionId,
    },

    /// Event referenced a track that no registered participant currently owns
    #[error("Unknown track: {track}")]
    UnknownTrack {
        /// Handle of the unrecognized track
        track: TrackHandle,
    },

    /// Pin requested for a session id that is not registered
    #[error("Invalid pin target: {session_id}")]
    InvalidPinTarget {
        /// Session id that could not be pinned
        session_id: SessionId,
    },
}
