//! # Callstage Core
//!
//! Presentation state tracking for video-call front ends. This crate decides,
//! from a stream of room membership and track events, which participant is
//! active, which track occupies which on-screen slot, and what
//! receive-quality tier to request per participant. It performs no I/O: an
//! external event source (the media provider) drives it, and an external
//! renderer applies the effect descriptions it returns.
//!
//! ## Quick Start
//!
//! ```rust
//! use callstage_core::{PresentationTracker, RoomEvent, SessionId, TrackHandle, TrackKind};
//!
//! let mut tracker = PresentationTracker::new();
//!
//! // the local participant joins and becomes active
//! tracker.handle(RoomEvent::ParticipantJoined {
//!     session_id: SessionId::from("local"),
//!     user_name: Some("Ada".to_string()),
//!     is_local: true,
//! });
//!
//! // a remote participant starts publishing video
//! tracker.handle(RoomEvent::ParticipantJoined {
//!     session_id: SessionId::from("remote"),
//!     user_name: None,
//!     is_local: false,
//! });
//! let effects = tracker.handle(RoomEvent::TrackStarted {
//!     session_id: SessionId::from("remote"),
//!     kind: TrackKind::Video,
//!     track: TrackHandle::from("cam-1"),
//! });
//!
//! // effects describe the slot updates for the renderer to apply
//! assert_eq!(effects.len(), 1);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod effect;
pub mod error;
pub mod event;
pub mod participant;
pub mod slot;
pub mod track;
pub mod tracker;

// Re-export main types
pub use effect::{Effect, QualityCommand, ReceiveTier, SelectionUpdate, SlotUpdate};
pub use error::TrackerError;
pub use event::RoomEvent;
pub use participant::{Participant, SessionId};
pub use slot::{SlotContents, SlotId};
pub use track::{TrackHandle, TrackKind};
pub use tracker::{PresentationTracker, Selection};
