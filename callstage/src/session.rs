//! Async session driver tying the tracker to its collaborators

use async_trait::async_trait;
use callstage_core::{
    Effect, PresentationTracker, ReceiveTier, RoomEvent, Selection, SelectionUpdate, SessionId,
    SlotUpdate, TrackerError,
};
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use crate::config::ConnectOptions;
use crate::controls;

/// Errors surfaced by [`Session`] operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The tracker rejected the operation
    #[error("tracker rejected the operation: {source}")]
    Tracker {
        /// Underlying tracker error
        #[from]
        source: TrackerError,
    },

    /// The renderer failed to apply an update
    #[error("renderer failed: {reason}")]
    Renderer {
        /// Collaborator-reported failure
        reason: String,
    },

    /// The media session rejected a command
    #[error("media session failed: {reason}")]
    Media {
        /// Collaborator-reported failure
        reason: String,
    },
}

/// Rendering half of a call UI.
///
/// Owns the actual element attach/detach work; the session feeds it the
/// slot and selection updates the tracker emits.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Attach a track to a slot, or detach when `update.track` is `None`
    async fn apply_slot(&self, update: SlotUpdate) -> Result<(), SessionError>;

    /// Reflect an active-participant or pin change
    async fn apply_selection(&self, update: SelectionUpdate) -> Result<(), SessionError>;
}

/// Provider connection that owns tracks and subscriptions
#[async_trait]
pub trait MediaSession: Send + Sync {
    /// Request a receive-quality tier for a remote participant's video
    async fn set_receive_quality(
        &self,
        session_id: SessionId,
        tier: ReceiveTier,
    ) -> Result<(), SessionError>;

    /// Enable or disable the local microphone track
    async fn set_local_audio(&self, enabled: bool) -> Result<(), SessionError>;

    /// Enable or disable the local camera track
    async fn set_local_video(&self, enabled: bool) -> Result<(), SessionError>;
}

/// Drives a [`PresentationTracker`] from provider events and forwards the
/// returned effects to the renderer and media session.
///
/// The tracker is synchronous and assumes exclusive access during each
/// transition; the session provides that serialization with a mutex, so all
/// event handling for one call must go through one `Session`.
pub struct Session<R, M> {
    tracker: Mutex<PresentationTracker>,
    renderer: R,
    media: M,
    options: ConnectOptions,
}

impl<R, M> Session<R, M>
where
    R: Renderer,
    M: MediaSession,
{
    /// Create a session with default connect options
    pub fn new(renderer: R, media: M) -> Self {
        Self::with_options(ConnectOptions::default(), renderer, media)
    }

    /// Create a session with explicit connect options
    pub fn with_options(options: ConnectOptions, renderer: R, media: M) -> Self {
        Self {
            tracker: Mutex::new(PresentationTracker::new()),
            renderer,
            media,
            options,
        }
    }

    /// Options the session was created with
    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Snapshot of the current selection state
    pub fn selection(&self) -> Selection {
        self.tracker.lock().selection().clone()
    }

    /// Receive-quality tier currently requested for a participant
    pub fn receive_quality_hint(&self, session_id: &SessionId) -> ReceiveTier {
        self.tracker.lock().receive_quality_hint(session_id)
    }

    /// Feed one provider event through the tracker and apply its effects
    pub async fn process(&self, event: RoomEvent) -> Result<(), SessionError> {
        let effects = self.tracker.lock().handle(event);
        self.apply(effects).await
    }

    /// Pin or unpin a participant and apply the resulting effects
    pub async fn toggle_pin(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let effects = self.tracker.lock().toggle_pin(session_id)?;
        self.apply(effects).await
    }

    /// Consume a provider event stream until it ends
    pub async fn drive<S>(&self, mut events: S) -> Result<(), SessionError>
    where
        S: Stream<Item = RoomEvent> + Unpin,
    {
        while let Some(event) = events.next().await {
            self.process(event).await?;
        }
        Ok(())
    }

    /// Disable the local microphone track
    pub async fn mute_audio(&self) -> Result<(), SessionError> {
        controls::mute_audio(&self.media).await
    }

    /// Re-enable the local microphone track
    pub async fn unmute_audio(&self) -> Result<(), SessionError> {
        controls::unmute_audio(&self.media).await
    }

    /// Disable the local camera track
    pub async fn mute_video(&self) -> Result<(), SessionError> {
        controls::mute_video(&self.media).await
    }

    /// Re-enable the local camera track
    pub async fn unmute_video(&self) -> Result<(), SessionError> {
        controls::unmute_video(&self.media).await
    }

    /// Leave the room: synthesize departures for every remote participant,
    /// then the local one, applying the detach effects of each
    pub async fn close(&self) -> Result<(), SessionError> {
        let (remotes, local) = {
            let tracker = self.tracker.lock();
            let mut remotes: Vec<SessionId> = tracker
                .participants()
                .filter(|participant| !participant.is_local())
                .map(|participant| participant.session_id().clone())
                .collect();
            remotes.sort();
            let local = tracker
                .local_participant()
                .map(|participant| participant.session_id().clone());
            (remotes, local)
        };

        for session_id in remotes {
            self.process(RoomEvent::ParticipantLeft { session_id }).await?;
        }
        if let Some(session_id) = local {
            self.process(RoomEvent::ParticipantLeft { session_id }).await?;
        }
        info!("session closed");
        Ok(())
    }

    async fn apply(&self, effects: Vec<Effect>) -> Result<(), SessionError> {
        for effect in effects {
            match effect {
                Effect::Slot(update) => self.renderer.apply_slot(update).await?,
                Effect::Selection(update) => self.renderer.apply_selection(update).await?,
                Effect::ReceiveQuality(command) => {
                    self.media
                        .set_receive_quality(command.session_id, command.tier)
                        .await?
                }
            }
        }
        Ok(())
    }
}
