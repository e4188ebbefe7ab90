//! Playback engine - core state machine
//!
//! Coordinates the loaded track, transport, queue, volume, repeat and shuffle.
//!
//! Every operation either succeeds or silently does nothing. Out-of-range
//! input is clamped, unusable input (NaN, no track loaded) is ignored.
//! Calls must be serialized by the host; the engine has no locking.

use crate::{
    command::PlaybackCommand,
    config::PlaybackConfig,
    events::PlaybackEvent,
    queue::Queue,
    shuffle::{Sequential, ShuffleOrder},
    snapshot::{PlaybackSnapshot, TrackStatus},
    types::{Playable, PlaybackState, RepeatMode, Track},
    volume::Volume,
};
use tracing::{debug, error, warn};

/// Central playback state
///
/// Owns:
/// - The loaded track and the play/pause transport
/// - Position within the loaded track (driven by the audio device)
/// - The ordered queue and its current position
/// - Volume (logarithmic, 0.0-1.0) and mute
/// - Repeat mode (Off, All, One) and the shuffle flag
///
/// Derived values (`duration`, `progress_percent`, `can_go_next`, ...) are
/// computed on every read and never stored.
pub struct PlaybackEngine<T: Playable = Track> {
    // Transport
    current_track: Option<T>,
    is_playing: bool,
    current_time: f64,

    // Queue
    queue: Queue<T>,

    // Settings
    volume: Volume,
    repeat: RepeatMode,
    shuffle_enabled: bool,
    shuffle_order: Box<dyn ShuffleOrder>,
    restart_threshold_secs: f64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<T: Playable + Clone> PlaybackEngine<T> {
    /// Create new playback engine with nothing loaded
    pub fn new(config: PlaybackConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        Self {
            current_track: None,
            is_playing: false,
            current_time: 0.0,
            queue: Queue::new(),
            volume,
            repeat: config.repeat,
            shuffle_enabled: config.shuffle,
            shuffle_order: Box::new(Sequential),
            restart_threshold_secs: config.restart_threshold_secs.max(0.0),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Load a track and start playing it from the beginning
    ///
    /// Does not touch the queue. Passing `None` does nothing.
    pub fn load(&mut self, track: impl Into<Option<T>>) {
        let Some(track) = track.into() else {
            debug!("Ignoring load without a track");
            return;
        };

        if !self.replace_current(track) {
            self.emit_track_restarted();
        }
        self.current_time = 0.0;
        self.set_playing(true);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Resume playback of the loaded track
    ///
    /// Does nothing when no track is loaded.
    pub fn resume(&mut self) {
        if self.current_track.is_none() {
            debug!("Ignoring resume with no track loaded");
            return;
        }
        self.set_playing(true);
    }

    /// Pause if playing, resume otherwise
    pub fn toggle_playback(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Stop playback and rewind
    ///
    /// The loaded track stays loaded.
    pub fn stop(&mut self) {
        self.set_playing(false);
        self.current_time = 0.0;
    }

    // ===== Seek =====

    /// Seek to a position in seconds, clamped to the track duration
    pub fn seek(&mut self, time: f64) {
        if self.current_track.is_none() {
            debug!("Ignoring seek with no track loaded");
            return;
        }
        if !time.is_finite() {
            warn!(time, "Ignoring seek to non-finite position");
            return;
        }

        let position = time.clamp(0.0, self.duration());
        if position == self.current_time {
            return;
        }
        self.current_time = position;
        self.pending_events.push(PlaybackEvent::Seeked {
            position_secs: position,
        });
    }

    /// Seek relative to the current position
    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.current_time + delta);
    }

    /// Seek to a percentage (0-100) of the track duration
    pub fn seek_percent(&mut self, percent: f64) {
        if !percent.is_finite() {
            warn!(percent, "Ignoring seek to non-finite percentage");
            return;
        }
        let position = self.duration() * percent.clamp(0.0, 100.0) / 100.0;
        self.seek(position);
    }

    /// Position report from the audio device
    ///
    /// Non-finite values are discarded.
    pub fn update_time(&mut self, time: f64) {
        if !time.is_finite() {
            debug!(time, "Discarding non-finite time update");
            return;
        }
        self.current_time = time.max(0.0);
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0), clamped
    pub fn set_volume(&mut self, volume: f64) {
        let before = self.volume.level();
        if self.volume.set_level(volume) && self.volume.level() != before {
            self.emit_volume_changed();
        }
    }

    /// Get current volume (0.0-1.0)
    pub fn get_volume(&self) -> f64 {
        self.volume.level()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        if !self.volume.is_muted() {
            self.volume.mute();
            self.emit_volume_changed();
        }
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        if self.volume.is_muted() {
            self.volume.unmute();
            self.emit_volume_changed();
        }
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.emit_volume_changed();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Linear gain for the current volume (mute not applied)
    pub fn effective_gain(&self) -> f64 {
        self.volume.effective_gain()
    }

    /// Gain to send to the output device (0.0 while muted)
    pub fn output_gain(&self) -> f64 {
        self.volume.output_gain()
    }

    /// Apply output gain to a sample buffer (in-place)
    ///
    /// For hosts that mix in software instead of setting device volume.
    pub fn apply_volume(&self, buffer: &mut [f32]) {
        self.volume.apply(buffer);
    }

    // ===== Queue Management =====

    /// Replace the queue and select the track at `start_index`
    ///
    /// `start_index` is clamped to the last track. The selected track
    /// becomes current without starting or stopping playback. An empty
    /// `tracks` clears the queue and leaves the loaded track alone.
    pub fn set_queue(&mut self, tracks: Vec<T>, start_index: usize) {
        if tracks.is_empty() {
            if !self.queue.is_empty() {
                self.queue.clear();
                debug!("Queue cleared");
                self.emit_queue_changed();
            }
            return;
        }

        let position = self.queue.set(tracks, start_index);
        debug!(len = self.queue.len(), ?position, "Queue replaced");

        if self.shuffle_enabled {
            self.apply_shuffle_order();
        }
        self.emit_queue_changed();

        if let Some(track) = self.queue.current().cloned() {
            if self.replace_current(track) {
                // Keep the offset, but never past the end of the new track
                self.current_time = self.current_time.min(self.duration());
            }
        }
    }

    /// Clear entire queue
    pub fn clear_queue(&mut self) {
        self.set_queue(Vec::new(), 0);
    }

    /// Get all tracks in queue order
    pub fn get_queue(&self) -> &[T] {
        self.queue.tracks()
    }

    /// Get queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Current position in the queue, `None` when the queue is empty
    pub fn current_index(&self) -> Option<usize> {
        self.queue.position()
    }

    /// Skip to the next track in the queue
    ///
    /// At the last track this wraps to the first with repeat-all and does
    /// nothing otherwise. Playing/paused is preserved.
    pub fn next(&mut self) {
        if !self.queue.has_next() {
            if self.repeat == RepeatMode::All && !self.queue.is_empty() {
                self.go_to_index(0, "next");
            }
            return;
        }

        let target = self.queue.position().map_or(0, |i| i + 1);
        self.go_to_index(target, "next");
    }

    /// Go to previous track
    ///
    /// If past the restart threshold (3 s by default), restarts the current
    /// track instead. At the first track this wraps to the last with
    /// repeat-all and does nothing otherwise.
    pub fn previous(&mut self) {
        if self.current_time > self.restart_threshold_secs {
            self.restart_current();
            return;
        }

        if !self.queue.has_previous() {
            if self.repeat == RepeatMode::All {
                if let Some(last) = self.queue.last_index() {
                    self.go_to_index(last, "previous");
                }
            }
            return;
        }

        if let Some(current) = self.queue.position() {
            self.go_to_index(current - 1, "previous");
        }
    }

    /// Called by the audio device when the current track reaches its end
    ///
    /// Priority: repeat-one restarts, then advance, then wrap with
    /// repeat-all, otherwise stop at the end of the queue.
    pub fn handle_track_end(&mut self) {
        if self.repeat == RepeatMode::One {
            self.restart_current();
        } else if self.queue.has_next() {
            self.next();
        } else if self.repeat == RepeatMode::All && !self.queue.is_empty() {
            self.go_to_index(0, "handle_track_end");
        } else {
            debug!("End of queue reached");
            self.set_playing(false);
            self.current_time = 0.0;
            self.pending_events.push(PlaybackEvent::QueueEnded);
        }
    }

    // ===== Shuffle & Repeat =====

    /// Cycle repeat mode: Off → All → One → Off
    pub fn toggle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat == mode {
            return;
        }
        self.repeat = mode;
        self.pending_events.push(PlaybackEvent::RepeatModeChanged { mode });
    }

    /// Get current repeat mode
    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle_enabled);
    }

    /// Enable or disable shuffle
    ///
    /// Reordering is delegated to the installed [`ShuffleOrder`]. The
    /// default order keeps the queue as it is.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle_enabled == enabled {
            return;
        }
        self.shuffle_enabled = enabled;

        let reordered = if enabled {
            self.apply_shuffle_order()
        } else if self.queue.is_shuffled() {
            self.queue.restore_original_order();
            true
        } else {
            false
        };

        self.pending_events.push(PlaybackEvent::ShuffleChanged { enabled });
        if reordered {
            self.emit_queue_changed();
        }
    }

    /// Check if shuffle is enabled
    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Install the order used when shuffle is enabled
    ///
    /// Takes effect the next time shuffle is enabled or a queue is set.
    pub fn set_shuffle_order(&mut self, order: Box<dyn ShuffleOrder>) {
        self.shuffle_order = order;
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn get_state(&self) -> PlaybackState {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackState::Empty,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Get the loaded track
    pub fn get_current_track(&self) -> Option<&T> {
        self.current_track.as_ref()
    }

    /// Check if the transport is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration of the loaded track in seconds, 0 when nothing is loaded
    pub fn duration(&self) -> f64 {
        self.current_track
            .as_ref()
            .map(|track| track.duration_secs())
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0)
    }

    /// Position as a percentage of duration, 0 when duration is 0
    pub fn progress_percent(&self) -> f64 {
        let duration = self.duration();
        if duration > 0.0 {
            self.current_time / duration * 100.0
        } else {
            0.0
        }
    }

    /// Check if there is a track after the current queue position
    pub fn can_go_next(&self) -> bool {
        self.queue.has_next()
    }

    /// Check if there is a track before the current queue position
    pub fn can_go_previous(&self) -> bool {
        self.queue.has_previous()
    }

    /// Seconds after which `previous()` restarts instead of going back
    pub fn restart_threshold_secs(&self) -> f64 {
        self.restart_threshold_secs
    }

    /// Whether `track_id` is the loaded track, and whether it is playing
    pub fn is_track_playing(&self, track_id: &str) -> TrackStatus {
        let is_current_track = self
            .current_track
            .as_ref()
            .is_some_and(|track| track.id() == track_id);

        TrackStatus {
            is_current_track,
            is_playing: is_current_track && self.is_playing,
        }
    }

    /// Collect every derived value for rendering
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.get_state(),
            current_track_id: self.current_track.as_ref().map(|t| t.id().to_string()),
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration(),
            progress_percent: self.progress_percent(),
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            effective_gain: self.volume.effective_gain(),
            queue_length: self.queue.len(),
            current_index: self.queue.position(),
            repeat_mode: self.repeat,
            shuffle_enabled: self.shuffle_enabled,
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
        }
    }

    // ===== Commands =====

    /// Dispatch a command from the UI, keyboard or audio device layer
    pub fn execute(&mut self, command: PlaybackCommand<T>) {
        match command {
            PlaybackCommand::Load { track } => self.load(track),
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Resume => self.resume(),
            PlaybackCommand::TogglePlayback => self.toggle_playback(),
            PlaybackCommand::Stop => self.stop(),
            PlaybackCommand::Seek { time } => self.seek(time),
            PlaybackCommand::SeekBy { delta } => self.seek_by(delta),
            PlaybackCommand::SeekPercent { percent } => self.seek_percent(percent),
            PlaybackCommand::SetVolume { volume } => self.set_volume(volume),
            PlaybackCommand::ToggleMute => self.toggle_mute(),
            PlaybackCommand::SetQueue {
                tracks,
                start_index,
            } => self.set_queue(tracks, start_index),
            PlaybackCommand::ClearQueue => self.clear_queue(),
            PlaybackCommand::Next => self.next(),
            PlaybackCommand::Previous => self.previous(),
            PlaybackCommand::ToggleRepeat => self.toggle_repeat(),
            PlaybackCommand::SetRepeat { mode } => self.set_repeat(mode),
            PlaybackCommand::ToggleShuffle => self.toggle_shuffle(),
            PlaybackCommand::TimeUpdate { time } => self.update_time(time),
            PlaybackCommand::TrackEnded => self.handle_track_end(),
        }
    }

    // ===== Events =====

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Emit a position update event
    pub fn emit_position_update(&mut self) {
        if self.current_track.is_some() {
            self.pending_events.push(PlaybackEvent::PositionUpdate {
                position_secs: self.current_time,
                duration_secs: self.duration(),
            });
        }
    }

    // ===== Internal =====

    /// Move the queue position and make that track current from its start
    fn go_to_index(&mut self, index: usize, operation: &str) -> bool {
        let Some(track) = self.queue.set_position(index).cloned() else {
            error!(
                operation,
                index,
                len = self.queue.len(),
                "No track at queue index"
            );
            return false;
        };

        if !self.replace_current(track) {
            self.emit_track_restarted();
        }
        self.current_time = 0.0;
        self.emit_queue_changed();
        true
    }

    /// Swap in a new current track; returns false if its id did not change
    fn replace_current(&mut self, track: T) -> bool {
        let track_id = track.id().to_string();
        let previous_track_id = self
            .current_track
            .replace(track)
            .map(|t| t.id().to_string());

        if previous_track_id.as_deref() == Some(track_id.as_str()) {
            return false;
        }

        debug!(%track_id, ?previous_track_id, "Current track changed");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
        true
    }

    fn restart_current(&mut self) {
        self.current_time = 0.0;
        self.emit_track_restarted();
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        debug!(is_playing = playing, "Transport changed");
        self.pending_events.push(PlaybackEvent::StateChanged {
            is_playing: playing,
        });
    }

    /// Ask the installed order for a permutation and apply it
    ///
    /// Returns true if the queue was reordered.
    fn apply_shuffle_order(&mut self) -> bool {
        let len = self.queue.len();
        if len < 2 {
            return false;
        }

        let permutation = self.shuffle_order.order(len, self.queue.position());
        if permutation.iter().copied().eq(0..len) {
            return false;
        }

        if !self.queue.apply_order(&permutation) {
            warn!(len, "Shuffle order is not a permutation of the queue; keeping order");
            return false;
        }
        true
    }

    fn emit_track_restarted(&mut self) {
        if let Some(track) = &self.current_track {
            self.pending_events.push(PlaybackEvent::TrackRestarted {
                track_id: track.id().to_string(),
            });
        }
    }

    fn emit_volume_changed(&mut self) {
        debug!(
            level = self.volume.level(),
            db = self.volume.to_db(),
            muted = self.volume.is_muted(),
            "Volume changed"
        );
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.position(),
        });
    }
}

impl<T: Playable + Clone> Default for PlaybackEngine<T> {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
