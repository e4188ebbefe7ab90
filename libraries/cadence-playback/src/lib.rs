//! Cadence - Playback Engine
//!
//! Client-side playback state for the Cadence desktop player.
//!
//! This crate provides:
//! - Transport control (load, play/pause, stop, seek)
//! - An ordered queue with a current position
//! - Repeat modes (Off, All, One) and a shuffle flag with a pluggable order
//! - Volume control (logarithmic, 0.0-1.0, mute/unmute)
//! - Derived values for rendering (progress, navigation, effective gain)
//! - Events for UI synchronization
//!
//! # Architecture
//!
//! `cadence-playback` owns no audio hardware and no UI:
//! - The audio device reports time with [`PlaybackEngine::update_time`] and
//!   track ends with [`PlaybackEngine::handle_track_end`]
//! - The UI and keyboard layers call operations or send [`PlaybackCommand`]s
//! - The renderer reads [`PlaybackEngine::snapshot`] and drains events
//!
//! The engine is a plain value owned by the host. It has no internal
//! locking; a multi-threaded host must serialize calls into it.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_playback::{PlaybackConfig, PlaybackEngine, Track};
//!
//! let mut engine: PlaybackEngine = PlaybackEngine::new(PlaybackConfig::default());
//!
//! engine.set_queue(
//!     vec![
//!         Track::new("1", "Intro", 95.0),
//!         Track::new("2", "Theme", 240.0),
//!     ],
//!     0,
//! );
//! engine.resume();
//!
//! // Audio device callbacks
//! engine.update_time(47.5);
//! assert_eq!(engine.progress_percent(), 50.0);
//!
//! engine.handle_track_end();
//! assert_eq!(engine.current_index(), Some(1));
//! assert!(engine.is_playing());
//! ```
//!
//! # Example: Commands and Repeat
//!
//! ```rust
//! use cadence_playback::{PlaybackCommand, PlaybackEngine, RepeatMode, Track};
//!
//! let mut engine: PlaybackEngine = PlaybackEngine::default();
//! engine.execute(PlaybackCommand::Load {
//!     track: Track::new("1", "Single", 180.0),
//! });
//! engine.execute(PlaybackCommand::ToggleRepeat);
//!
//! assert_eq!(engine.get_repeat(), RepeatMode::All);
//! assert!(engine.is_track_playing("1").is_playing);
//! ```

mod command;
mod config;
mod engine;
mod error;
pub mod events;
mod queue;
pub mod shuffle;
mod snapshot;
pub mod types;
mod volume;

// Public exports
pub use command::PlaybackCommand;
pub use crate::config::{PlaybackConfig, ENV_PREFIX};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::Queue;
pub use shuffle::{Sequential, ShuffleOrder};
pub use snapshot::{PlaybackSnapshot, TrackStatus};
pub use types::{Playable, PlaybackState, RepeatMode, Track};
pub use volume::Volume;
