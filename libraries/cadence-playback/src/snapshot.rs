//! Read-only views of engine state for the rendering layer

use crate::types::{PlaybackState, RepeatMode};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs, computed from engine state on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub current_track_id: Option<String>,
    pub is_playing: bool,

    /// Position in seconds
    pub current_time: f64,

    /// Current track duration in seconds, 0 when nothing is loaded
    pub duration: f64,

    /// Position as a percentage of duration, 0 when duration is 0
    pub progress_percent: f64,

    /// Slider position (0.0-1.0)
    pub volume: f64,
    pub is_muted: bool,

    /// Linear gain derived from `volume` (mute not applied)
    pub effective_gain: f64,

    pub queue_length: usize,
    pub current_index: Option<usize>,
    pub repeat_mode: RepeatMode,
    pub shuffle_enabled: bool,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

/// Whether a given track is the loaded one, and whether it is playing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStatus {
    pub is_current_track: bool,
    pub is_playing: bool,
}
