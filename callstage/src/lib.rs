//! # Callstage
//!
//! Callstage is a presentation-state toolkit for video-call front ends built
//! on a third-party real-time media SDK. It tracks participants, their
//! tracks, the active speaker, and pinning, and turns room events into
//! deterministic rendering and receive-quality instructions.
//!
//! ## Key Pieces
//!
//! - [`PresentationTracker`]: the synchronous state machine at the center
//! - [`Session`]: async glue that serializes tracker access and forwards
//!   effects to your [`Renderer`] and [`MediaSession`] implementations
//! - [`CredentialsClient`]: fetches room credentials from the companion
//!   provisioning service
//! - [`ConnectOptions`]: camera constraints and receive-quality settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use callstage::{
//!     CredentialsClient, MediaSession, ReceiveTier, Renderer, RoomEvent, SelectionUpdate,
//!     Session, SessionError, SessionId, SlotUpdate,
//! };
//!
//! struct Headless;
//!
//! #[async_trait]
//! impl Renderer for Headless {
//!     async fn apply_slot(&self, update: SlotUpdate) -> Result<(), SessionError> {
//!         println!("slot: {:?}", update);
//!         Ok(())
//!     }
//!
//!     async fn apply_selection(&self, update: SelectionUpdate) -> Result<(), SessionError> {
//!         println!("selection: {:?}", update);
//!         Ok(())
//!     }
//! }
//!
//! struct NoMedia;
//!
//! #[async_trait]
//! impl MediaSession for NoMedia {
//!     async fn set_receive_quality(
//!         &self,
//!         session_id: SessionId,
//!         tier: ReceiveTier,
//!     ) -> Result<(), SessionError> {
//!         println!("receive quality for {}: {}", session_id, tier);
//!         Ok(())
//!     }
//!
//!     async fn set_local_audio(&self, _enabled: bool) -> Result<(), SessionError> {
//!         Ok(())
//!     }
//!
//!     async fn set_local_video(&self, _enabled: bool) -> Result<(), SessionError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fetch a token and room from the provisioning service
//!     let credentials = CredentialsClient::new("http://localhost:3000")?
//!         .fetch(Some("Ada"), Some("demo"))
//!         .await?;
//!     println!("joining {}", credentials.room_url);
//!
//!     // Drive the presentation state from provider events
//!     let session = Session::new(Headless, NoMedia);
//!     session
//!         .process(RoomEvent::ParticipantJoined {
//!             session_id: SessionId::from("local"),
//!             user_name: Some("Ada".to_string()),
//!             is_local: true,
//!         })
//!         .await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export the core state machine and its types
pub use callstage_core::{
    Effect, Participant, PresentationTracker, QualityCommand, ReceiveTier, RoomEvent, Selection,
    SelectionUpdate, SessionId, SlotContents, SlotId, SlotUpdate, TrackHandle, TrackKind,
    TrackerError,
};

// Public API modules
pub mod config;
pub mod controls;
pub mod credentials;
pub mod session;

// Re-export main API types
pub use config::{ConnectOptions, ReceiveSettings, VideoConstraints};
pub use controls::MuteEvent;
pub use credentials::{random_identity, CredentialsClient, CredentialsError, RoomCredentials};
pub use session::{MediaSession, Renderer, Session, SessionError};
