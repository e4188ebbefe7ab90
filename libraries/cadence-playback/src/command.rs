//! Commands accepted by the playback engine
//!
//! The UI, keyboard dispatch and audio device layers talk to the engine
//! only through these commands (or the matching methods), never by
//! touching its state directly.

use crate::types::{RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// A single engine operation
///
/// Serialized with a `command` tag so a frontend can send plain JSON,
/// e.g. `{"command": "seek", "time": 42.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PlaybackCommand<T = Track> {
    /// Load a track and play it from the start
    Load { track: T },
    Pause,
    Resume,
    /// Play/pause button
    TogglePlayback,
    Stop,
    /// Absolute seek in seconds
    Seek { time: f64 },
    /// Relative seek in seconds (keyboard scrubbing)
    SeekBy { delta: f64 },
    /// Seek to a percentage of the duration (progress bar click)
    SeekPercent { percent: f64 },
    SetVolume { volume: f64 },
    ToggleMute,
    /// Replace the queue, selecting `start_index`
    #[serde(rename_all = "camelCase")]
    SetQueue {
        tracks: Vec<T>,
        #[serde(default)]
        start_index: usize,
    },
    ClearQueue,
    Next,
    Previous,
    ToggleRepeat,
    SetRepeat { mode: RepeatMode },
    ToggleShuffle,

    /// Position report from the audio device
    TimeUpdate { time: f64 },
    /// The audio device finished the current track
    TrackEnded,
}
