//! Presentation state tracking.
//!
//! [`PresentationTracker`] is a synchronous state machine fed one
//! [`RoomEvent`] at a time. It owns the participant registry, the slot table
//! and the selection state, and every transition returns the list of
//! [`Effect`]s the caller must apply (renderer slot changes, selection
//! announcements, receive-quality requests). The tracker performs no I/O and
//! never suspends; callers are responsible for serializing access to it.

use std::collections::HashMap;
use tracing::debug;

use crate::effect::{Effect, QualityCommand, ReceiveTier, SelectionUpdate, SlotUpdate};
use crate::error::TrackerError;
use crate::event::RoomEvent;
use crate::participant::{Participant, SessionId};
use crate::slot::{SlotContents, SlotId};
use crate::track::{TrackHandle, TrackKind};

/// Active-participant selection state.
///
/// While pinned, the active participant stays fixed across speaker changes
/// until explicitly unpinned or until the pinned participant leaves. While
/// unpinned, the active participant follows the reported speaker, falling
/// back to the local participant when no speaker is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Participant currently shown in the main slot
    active: Option<SessionId>,
    /// Last speaker reported by the provider, independent of pinning
    speaker: Option<SessionId>,
    /// Whether the active participant is pinned
    pinned: bool,
}

impl Selection {
    /// Participant currently shown in the main slot, if any
    pub fn active_participant(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// Last speaker reported by the provider, if any.
    ///
    /// May reference a participant that has since left; every fallback that
    /// consults it checks registration first.
    pub fn active_speaker(&self) -> Option<&SessionId> {
        self.speaker.as_ref()
    }

    /// Whether the active participant is pinned
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// Tracks which participant is active, what is pinned, and which track
/// occupies which on-screen slot.
///
/// # Quick flow
///
/// ```
/// use callstage_core::{PresentationTracker, RoomEvent, SessionId};
///
/// let mut tracker = PresentationTracker::new();
/// let effects = tracker.handle(RoomEvent::ParticipantJoined {
///     session_id: SessionId::from("local"),
///     user_name: None,
///     is_local: true,
/// });
/// assert!(!effects.is_empty());
/// assert_eq!(
///     tracker.active_participant(),
///     Some(&SessionId::from("local"))
/// );
/// ```
#[derive(Debug, Default)]
pub struct PresentationTracker {
    /// Registered participants by session id
    participants: HashMap<SessionId, Participant>,
    /// Incrementally maintained slot table; always equal to
    /// [`derived_slots`](Self::derived_slots)
    slots: HashMap<SlotId, SlotContents>,
    /// Selection state
    selection: Selection,
    /// Session id of the local participant, once joined
    local: Option<SessionId>,
}

impl PresentationTracker {
    /// Create a tracker with an empty registry and an empty main slot
    pub fn new() -> Self {
        let mut slots = HashMap::new();
        slots.insert(SlotId::Main, SlotContents::default());
        Self {
            participants: HashMap::new(),
            slots,
            selection: Selection::default(),
            local: None,
        }
    }

    /// Process one lifecycle event and return the effects to apply.
    ///
    /// Events referencing unknown participants or tracks degrade to no-ops:
    /// delivery order from the provider is not guaranteed to be causal, so a
    /// stale event after a departure must not crash the state machine.
    pub fn handle(&mut self, event: RoomEvent) -> Vec<Effect> {
        let event_type = event.event_type();
        let result = match event {
            RoomEvent::ParticipantJoined {
                session_id,
                user_name,
                is_local,
            } => self.on_participant_joined(session_id, user_name, is_local),
            RoomEvent::ParticipantLeft { session_id } => self.on_participant_left(session_id),
            RoomEvent::TrackStarted {
                session_id,
                kind,
                track,
            } => self.on_track_started(session_id, kind, track),
            RoomEvent::TrackStopped {
                session_id,
                kind,
                track,
            } => self.on_track_stopped(session_id, kind, track),
            RoomEvent::ActiveSpeakerChanged { session_id } => {
                self.on_active_speaker_changed(session_id)
            }
        };
        match result {
            Ok(effects) => effects,
            Err(error) => {
                debug!("{} ignored: {}", event_type, error);
                Vec::new()
            }
        }
    }

    /// Pin the given participant, or unpin if it is already the pinned
    /// active participant.
    ///
    /// Pinning fixes the active participant across speaker changes and
    /// requests the high receive tier for it. Unpinning reselects from the
    /// last known speaker, falling back to the local participant, and
    /// releases the quality override. Fails with
    /// [`TrackerError::InvalidPinTarget`] for unregistered session ids,
    /// leaving state untouched.
    pub fn toggle_pin(&mut self, session_id: &SessionId) -> Result<Vec<Effect>, TrackerError> {
        if !self.participants.contains_key(session_id) {
            return Err(TrackerError::InvalidPinTarget {
                session_id: session_id.clone(),
            });
        }

        let mut effects = Vec::new();
        let before = self.selection_snapshot();
        let unpinning =
            self.selection.pinned && self.selection.active.as_ref() == Some(session_id);

        if unpinning {
            debug!("unpinning {}", session_id);
            self.selection.pinned = false;
            let next = self
                .fallback_active()
                .or_else(|| Some(session_id.clone()));
            self.set_active(next, &mut effects);
            self.push_selection_if_changed(before, &mut effects);
            effects.push(Effect::ReceiveQuality(QualityCommand {
                session_id: session_id.clone(),
                tier: ReceiveTier::Inherit,
            }));
        } else {
            debug!("pinning {}", session_id);
            // an explicit pin always wins over the last known speaker
            let displaced = if self.selection.pinned {
                self.selection
                    .active
                    .clone()
                    .filter(|previous| previous != session_id)
            } else {
                None
            };
            self.selection.pinned = true;
            self.set_active(Some(session_id.clone()), &mut effects);
            self.push_selection_if_changed(before, &mut effects);
            if let Some(previous) = displaced {
                effects.push(Effect::ReceiveQuality(QualityCommand {
                    session_id: previous,
                    tier: ReceiveTier::Inherit,
                }));
            }
            effects.push(Effect::ReceiveQuality(QualityCommand {
                session_id: session_id.clone(),
                tier: ReceiveTier::High,
            }));
        }

        Ok(effects)
    }

    /// Receive-quality tier to request for the given participant.
    ///
    /// Pure function of current state: `High` for the pinned active
    /// participant, `Inherit` for everyone else. Transitions that change
    /// the answer re-emit it as [`Effect::ReceiveQuality`].
    pub fn receive_quality_hint(&self, session_id: &SessionId) -> ReceiveTier {
        if self.selection.pinned && self.selection.active.as_ref() == Some(session_id) {
            ReceiveTier::High
        } else {
            ReceiveTier::Inherit
        }
    }

    /// Current selection state
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Participant currently shown in the main slot, if any
    pub fn active_participant(&self) -> Option<&SessionId> {
        self.selection.active.as_ref()
    }

    /// Last speaker reported by the provider, if any
    pub fn active_speaker(&self) -> Option<&SessionId> {
        self.selection.speaker.as_ref()
    }

    /// Whether the active participant is pinned
    pub fn is_pinned(&self) -> bool {
        self.selection.pinned
    }

    /// Look up a registered participant
    pub fn participant(&self, session_id: &SessionId) -> Option<&Participant> {
        self.participants.get(session_id)
    }

    /// Iterate over all registered participants, in no particular order
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Number of registered participants
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Check whether a session id is registered
    pub fn contains_participant(&self, session_id: &SessionId) -> bool {
        self.participants.contains_key(session_id)
    }

    /// The local participant, once it has joined
    pub fn local_participant(&self) -> Option<&Participant> {
        self.local.as_ref().and_then(|id| self.participants.get(id))
    }

    /// Current contents of a slot
    pub fn slot(&self, slot: &SlotId) -> Option<&SlotContents> {
        self.slots.get(slot)
    }

    /// The full slot table
    pub fn slots(&self) -> &HashMap<SlotId, SlotContents> {
        &self.slots
    }

    /// Video track currently in the main slot, if any
    pub fn main_video(&self) -> Option<&TrackHandle> {
        self.slots
            .get(&SlotId::Main)
            .and_then(|contents| contents.track(TrackKind::Video))
    }

    /// Recompute the slot table from scratch.
    ///
    /// This is the canonical definition of slot contents: thumbnails hold
    /// each participant's current tracks (minus ineligible local audio),
    /// main holds the active participant's video. The incrementally
    /// maintained table always equals this derivation; renderers can use it
    /// to resynchronize after losing their own state.
    pub fn derived_slots(&self) -> HashMap<SlotId, SlotContents> {
        let mut slots = HashMap::new();
        for (session_id, participant) in &self.participants {
            let mut contents = SlotContents::default();
            if let Some(video) = participant.track(TrackKind::Video) {
                contents.set_track(TrackKind::Video, Some(video.clone()));
            }
            if !participant.is_local() {
                if let Some(audio) = participant.track(TrackKind::Audio) {
                    contents.set_track(TrackKind::Audio, Some(audio.clone()));
                }
            }
            if !contents.is_empty() {
                slots.insert(SlotId::Thumbnail(session_id.clone()), contents);
            }
        }
        let main_video = self
            .selection
            .active
            .as_ref()
            .and_then(|id| self.participants.get(id))
            .and_then(|participant| participant.track(TrackKind::Video).cloned());
        slots.insert(SlotId::Main, SlotContents::with_video(main_video));
        slots
    }

    // Transitions

    fn on_participant_joined(
        &mut self,
        session_id: SessionId,
        user_name: Option<String>,
        is_local: bool,
    ) -> Result<Vec<Effect>, TrackerError> {
        if self.participants.contains_key(&session_id) {
            debug!("participant {} already registered, ignoring join", session_id);
            return Ok(Vec::new());
        }

        debug!("participant {} joined (local: {})", session_id, is_local);
        self.participants.insert(
            session_id.clone(),
            Participant::new(session_id.clone(), user_name, is_local),
        );
        if is_local {
            if let Some(previous) = &self.local {
                debug!("replacing local participant {} with {}", previous, session_id);
            }
            self.local = Some(session_id.clone());
        }

        let mut effects = Vec::new();
        let before = self.selection_snapshot();
        // the first participant seen becomes the initial speaker and,
        // unless something is pinned, the active participant
        if self.participants.len() == 1 && self.selection.active.is_none() {
            self.selection.speaker = Some(session_id.clone());
            if !self.selection.pinned {
                self.set_active(Some(session_id), &mut effects);
            }
        }
        self.push_selection_if_changed(before, &mut effects);
        Ok(effects)
    }

    fn on_participant_left(&mut self, session_id: SessionId) -> Result<Vec<Effect>, TrackerError> {
        if self.participants.remove(&session_id).is_none() {
            return Err(TrackerError::UnknownParticipant { session_id });
        }
        debug!("participant {} left", session_id);
        if self.local.as_ref() == Some(&session_id) {
            self.local = None;
        }

        let mut effects = Vec::new();
        let slot = SlotId::Thumbnail(session_id.clone());
        if let Some(contents) = self.slots.remove(&slot) {
            for kind in TrackKind::ALL {
                if contents.track(kind).is_some() {
                    effects.push(Effect::Slot(SlotUpdate::detach(slot.clone(), kind)));
                }
            }
        }

        let before = self.selection_snapshot();
        if self.selection.active.as_ref() == Some(&session_id) {
            // pin cannot outlive its target
            self.selection.pinned = false;
            let next = self.fallback_active();
            self.set_active(next, &mut effects);
        }
        self.push_selection_if_changed(before, &mut effects);
        Ok(effects)
    }

    fn on_track_started(
        &mut self,
        session_id: SessionId,
        kind: TrackKind,
        track: TrackHandle,
    ) -> Result<Vec<Effect>, TrackerError> {
        let Some(participant) = self.participants.get_mut(&session_id) else {
            return Err(TrackerError::UnknownParticipant { session_id });
        };
        let is_local = participant.is_local();

        if let Some(replaced) = participant.set_track(kind, track.clone()) {
            debug!(
                "participant {} replaced {} track {} with {}",
                session_id, kind, replaced, track
            );
        } else {
            debug!("participant {} started {} track {}", session_id, kind, track);
        }

        if is_local && kind == TrackKind::Audio {
            // never placed in a slot: playing back the local microphone echoes
            debug!("local audio track {} is not eligible for playback", track);
            return Ok(Vec::new());
        }

        let mut effects = Vec::new();
        self.set_thumbnail(&session_id, kind, Some(track.clone()), &mut effects);
        if kind == TrackKind::Video && self.selection.active.as_ref() == Some(&session_id) {
            self.set_main(Some(track), &mut effects);
        }
        Ok(effects)
    }

    fn on_track_stopped(
        &mut self,
        session_id: SessionId,
        kind: TrackKind,
        track: TrackHandle,
    ) -> Result<Vec<Effect>, TrackerError> {
        let Some(participant) = self.participants.get_mut(&session_id) else {
            return Err(TrackerError::UnknownParticipant { session_id });
        };
        if participant.track(kind) != Some(&track) {
            // a stop for an already-replaced or never-seen handle
            return Err(TrackerError::UnknownTrack { track });
        }
        participant.clear_track(kind);
        debug!("participant {} stopped {} track {}", session_id, kind, track);

        let mut effects = Vec::new();
        self.set_thumbnail(&session_id, kind, None, &mut effects);
        let in_main = self
            .slots
            .get(&SlotId::Main)
            .and_then(|contents| contents.track(TrackKind::Video))
            == Some(&track);
        if in_main {
            // no automatic replacement; main refills only through explicit
            // selection changes
            self.set_main(None, &mut effects);
        }
        Ok(effects)
    }

    fn on_active_speaker_changed(
        &mut self,
        session_id: SessionId,
    ) -> Result<Vec<Effect>, TrackerError> {
        debug!("active speaker is now {}", session_id);
        self.selection.speaker = Some(session_id.clone());

        if self.selection.pinned {
            // bookkeeping only while pinned
            return Ok(Vec::new());
        }
        if !self.participants.contains_key(&session_id) {
            debug!(
                "speaker {} is not registered, keeping current active participant",
                session_id
            );
            return Ok(Vec::new());
        }

        let mut effects = Vec::new();
        let before = self.selection_snapshot();
        self.set_active(Some(session_id), &mut effects);
        self.push_selection_if_changed(before, &mut effects);
        Ok(effects)
    }

    // Selection and slot maintenance

    /// Last known speaker if still registered, else the local participant
    fn fallback_active(&self) -> Option<SessionId> {
        self.selection
            .speaker
            .clone()
            .filter(|id| self.participants.contains_key(id))
            .or_else(|| self.local.clone())
    }

    fn selection_snapshot(&self) -> (Option<SessionId>, bool) {
        (self.selection.active.clone(), self.selection.pinned)
    }

    fn push_selection_if_changed(
        &self,
        before: (Option<SessionId>, bool),
        effects: &mut Vec<Effect>,
    ) {
        let after = self.selection_snapshot();
        if after != before {
            effects.push(Effect::Selection(SelectionUpdate {
                active: after.0,
                pinned: after.1,
            }));
        }
    }

    /// Change the active participant and re-derive the main slot from its
    /// current video track
    fn set_active(&mut self, next: Option<SessionId>, effects: &mut Vec<Effect>) {
        if self.selection.active == next {
            return;
        }
        self.selection.active = next;
        let main_video = self
            .selection
            .active
            .as_ref()
            .and_then(|id| self.participants.get(id))
            .and_then(|participant| participant.track(TrackKind::Video).cloned());
        self.set_main(main_video, effects);
    }

    fn set_main(&mut self, track: Option<TrackHandle>, effects: &mut Vec<Effect>) {
        let contents = self.slots.entry(SlotId::Main).or_default();
        if contents.track(TrackKind::Video) != track.as_ref() {
            contents.set_track(TrackKind::Video, track.clone());
            effects.push(Effect::Slot(SlotUpdate {
                slot: SlotId::Main,
                kind: TrackKind::Video,
                track,
            }));
        }
    }

    fn set_thumbnail(
        &mut self,
        session_id: &SessionId,
        kind: TrackKind,
        track: Option<TrackHandle>,
        effects: &mut Vec<Effect>,
    ) {
        let slot = SlotId::Thumbnail(session_id.clone());
        match track {
            Some(handle) => {
                let contents = self.slots.entry(slot.clone()).or_default();
                if contents.track(kind) != Some(&handle) {
                    contents.set_track(kind, Some(handle.clone()));
                    effects.push(Effect::Slot(SlotUpdate::attach(slot, kind, handle)));
                }
            }
            None => {
                let mut emptied = false;
                if let Some(contents) = self.slots.get_mut(&slot) {
                    if contents.set_track(kind, None).is_some() {
                        effects.push(Effect::Slot(SlotUpdate::detach(slot.clone(), kind)));
                    }
                    emptied = contents.is_empty();
                }
                if emptied {
                    self.slots.remove(&slot);
                }
            }
        }
    }
}
