//! Effect descriptions returned by tracker transitions.
//!
//! The tracker never touches rendering primitives or the media transport.
//! Every operation returns a list of [`Effect`]s describing what the outside
//! world should do: update a slot, reflect a selection change, or request a
//! different receive-quality tier. Applying them (or ignoring them) is the
//! caller's business.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::participant::SessionId;
use crate::slot::SlotId;
use crate::track::{TrackHandle, TrackKind};

/// Requested receive-quality tier for a remote participant's video
/// subscription
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiveTier {
    /// No per-participant override; the session's base receive settings apply
    #[default]
    Inherit,
    /// Lowest simulcast layer
    Low,
    /// Middle simulcast layer
    Standard,
    /// Highest simulcast layer
    High,
}

impl ReceiveTier {
    /// Check whether this tier overrides the session's base settings
    pub fn is_override(&self) -> bool {
        !matches!(self, ReceiveTier::Inherit)
    }
}

impl fmt::Display for ReceiveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiveTier::Inherit => write!(f, "inherit"),
            ReceiveTier::Low => write!(f, "low"),
            ReceiveTier::Standard => write!(f, "standard"),
            ReceiveTier::High => write!(f, "high"),
        }
    }
}

/// Instruction for the renderer: place `track` in `slot` for `kind`, or
/// detach whatever occupies that position when `track` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUpdate {
    /// Slot to update
    pub slot: SlotId,
    /// Which kind within the slot is affected
    pub kind: TrackKind,
    /// Track to attach, or `None` to detach
    pub track: Option<TrackHandle>,
}

impl SlotUpdate {
    /// Update placing a track in a slot
    pub fn attach(slot: SlotId, kind: TrackKind, track: TrackHandle) -> Self {
        Self {
            slot,
            kind,
            track: Some(track),
        }
    }

    /// Update clearing a slot position
    pub fn detach(slot: SlotId, kind: TrackKind) -> Self {
        Self {
            slot,
            kind,
            track: None,
        }
    }
}

/// Announcement that the active participant or pin state changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    /// The participant now shown in the main slot, if any
    pub active: Option<SessionId>,
    /// Whether the active participant is pinned
    pub pinned: bool,
}

/// Request to the media session: subscribe to this participant's video at
/// the given tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCommand {
    /// Participant whose subscription should change
    pub session_id: SessionId,
    /// Tier to request
    pub tier: ReceiveTier,
}

/// A single side effect produced by a tracker transition.
///
/// Within one transition the order is deterministic: slot updates first
/// (thumbnails before main), then the selection update, then quality
/// commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "effect")]
pub enum Effect {
    /// Renderer instruction
    Slot(SlotUpdate),
    /// Active-participant / pin transition
    Selection(SelectionUpdate),
    /// Receive-quality request to forward to the media session
    ReceiveQuality(QualityCommand),
}

impl Effect {
    /// View as a slot update, if that is what this effect is
    pub fn as_slot(&self) -> Option<&SlotUpdate> {
        match self {
            Effect::Slot(update) => Some(update),
            _ => None,
        }
    }

    /// View as a selection update, if that is what this effect is
    pub fn as_selection(&self) -> Option<&SelectionUpdate> {
        match self {
            Effect::Selection(update) => Some(update),
            _ => None,
        }
    }

    /// View as a quality command, if that is what this effect is
    pub fn as_quality(&self) -> Option<&QualityCommand> {
        match self {
            Effect::ReceiveQuality(command) => Some(command),
            _ => None,
        }
    }
}
