//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - Transport changes (play/pause/stop)
//! - Track changes (load, queue navigation, track end)
//! - Seeks and explicit position updates
//! - Volume, queue, repeat and shuffle changes
//!
//! The host drains them with [`crate::PlaybackEngine::drain_events`].
//! Nothing in the engine depends on events being consumed.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Transport switched between playing and paused
    StateChanged {
        /// Whether playback is now running
        is_playing: bool,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// The current track was rewound to its start
    ///
    /// Emitted by repeat-one and by `previous()` past the restart threshold.
    TrackRestarted {
        /// ID of the restarted track
        track_id: String,
    },

    /// Position moved by an explicit seek
    Seeked {
        /// New position in seconds
        position_secs: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New slider position (0.0-1.0)
        volume: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue contents or position changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// New current position
        current_index: Option<usize>,
    },

    /// Repeat mode changed
    RepeatModeChanged { mode: RepeatMode },

    /// Shuffle flag changed
    ShuffleChanged { enabled: bool },

    /// The last track finished with repeat off; playback stopped
    QueueEnded,

    /// Position snapshot, emitted on request
    PositionUpdate {
        /// Current playback position
        position_secs: f64,
        /// Total track duration
        duration_secs: f64,
    },
}
