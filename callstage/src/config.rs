//! Connection options and receive-quality settings

use callstage_core::ReceiveTier;

/// Camera capture constraints requested from the media provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoConstraints {
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Capture frame rate in frames per second
    pub frame_rate: u32,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 24,
        }
    }
}

/// Baseline receive settings for remote video subscriptions.
///
/// Per-participant tier commands emitted by the tracker override
/// `base_video_tier`; `max_layer` caps the simulcast layer the session
/// subscribes to regardless of overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveSettings {
    /// Tier requested for participants without an override
    pub base_video_tier: ReceiveTier,
    /// Highest simulcast layer to subscribe to, uncapped when unset
    pub max_layer: Option<u8>,
}

impl Default for ReceiveSettings {
    fn default() -> Self {
        Self {
            base_video_tier: ReceiveTier::Inherit,
            max_layer: None,
        }
    }
}

/// Options for joining a room
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectOptions {
    /// Camera constraints for the local video track
    pub video: VideoConstraints,
    /// Baseline receive settings for remote subscriptions
    pub receive: ReceiveSettings,
    /// Camera device to capture from, provider default when unset
    pub camera_device: Option<String>,
    /// Microphone device to capture from, provider default when unset
    pub microphone_device: Option<String>,
}

impl ConnectOptions {
    /// Preset for small screens, capping subscriptions at the middle
    /// simulcast layer
    pub fn mobile() -> Self {
        Self {
            receive: ReceiveSettings {
                max_layer: Some(1),
                ..ReceiveSettings::default()
            },
            ..Self::default()
        }
    }
}
