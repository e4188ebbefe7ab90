//! Shuffle ordering extension point
//!
//! The engine exposes a shuffle flag but ships no randomizing algorithm.
//! Hosts that want real shuffling install their own [`ShuffleOrder`];
//! the default [`Sequential`] order leaves the queue exactly as it was set.

/// Produces the playback order used while shuffle is enabled
pub trait ShuffleOrder: Send {
    /// Return a permutation of `0..len`
    ///
    /// Position `i` of the result names the queue index that should play
    /// `i`-th. `current` is the index of the track currently selected, if
    /// any. Anything that is not a permutation of `0..len` is rejected by
    /// the engine and the queue is left unchanged.
    fn order(&mut self, len: usize, current: Option<usize>) -> Vec<usize>;
}

/// Identity order: enabling shuffle does not move any track
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl ShuffleOrder for Sequential {
    fn order(&mut self, len: usize, _current: Option<usize>) -> Vec<usize> {
        (0..len).collect()
    }
}
