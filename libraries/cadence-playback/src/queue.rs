//! Ordered playback queue
//!
//! Holds the tracks available for navigation plus the current position.
//! The position is `None` exactly when the queue is empty; otherwise it
//! always points at a valid track.

/// Ordered queue with a current position
///
/// Structure:
/// ```text
/// tracks:   [ A ][ B ][ C ][ D ]
/// position:        ^ Some(1)
/// ```
///
/// When shuffled, `order[i]` records the original index of the track now
/// at `i`, so the original order can be restored without cloning tracks.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    /// Tracks in playback order
    tracks: Vec<T>,

    /// Current position (None iff empty)
    position: Option<usize>,

    /// Original index of each track while shuffled
    order: Option<Vec<usize>>,
}

impl<T> Queue<T> {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            position: None,
            order: None,
        }
    }

    /// Replace the queue contents
    ///
    /// `start` is clamped to the last index. An empty `tracks` clears the
    /// queue. Returns the resulting position.
    pub fn set(&mut self, tracks: Vec<T>, start: usize) -> Option<usize> {
        self.order = None;
        if tracks.is_empty() {
            self.clear();
            return None;
        }

        self.position = Some(start.min(tracks.len() - 1));
        self.tracks = tracks;
        self.position
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.position = None;
        self.order = None;
    }

    /// Move the position to `index`
    ///
    /// Returns the track now current, or `None` (leaving the position
    /// untouched) if there is no track at `index`.
    pub fn set_position(&mut self, index: usize) -> Option<&T> {
        if index >= self.tracks.len() {
            return None;
        }
        self.position = Some(index);
        self.tracks.get(index)
    }

    /// Current position
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&T> {
        self.position.and_then(|i| self.tracks.get(i))
    }

    /// All tracks in playback order
    pub fn tracks(&self) -> &[T] {
        &self.tracks
    }

    /// Index of the last track
    pub fn last_index(&self) -> Option<usize> {
        self.tracks.len().checked_sub(1)
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Check if a track follows the current one
    pub fn has_next(&self) -> bool {
        match self.position {
            Some(i) => i + 1 < self.tracks.len(),
            None => false,
        }
    }

    /// Check if a track precedes the current one
    pub fn has_previous(&self) -> bool {
        matches!(self.position, Some(i) if i > 0)
    }

    /// Check if queue order differs from the order it was set with
    pub fn is_shuffled(&self) -> bool {
        self.order.is_some()
    }

    /// Reorder tracks by a permutation of `0..len`
    ///
    /// The track at position `i` afterwards is the one previously at
    /// `permutation[i]`. The current track stays current. Returns false
    /// and leaves the queue untouched if `permutation` is not valid.
    pub fn apply_order(&mut self, permutation: &[usize]) -> bool {
        if !is_permutation(permutation, self.tracks.len()) {
            return false;
        }

        let mut slots: Vec<Option<T>> = self.tracks.drain(..).map(Some).collect();
        self.tracks = permutation.iter().filter_map(|&i| slots[i].take()).collect();

        self.position = self
            .position
            .and_then(|p| permutation.iter().position(|&i| i == p));

        let previous = self.order.take();
        self.order = Some(match previous {
            Some(previous) => permutation.iter().map(|&i| previous[i]).collect(),
            None => permutation.to_vec(),
        });
        true
    }

    /// Restore the order the queue was set with
    ///
    /// Used when turning shuffle off. The current track stays current.
    pub fn restore_original_order(&mut self) {
        let Some(order) = self.order.take() else {
            return;
        };

        let mut slots: Vec<Option<T>> = (0..self.tracks.len()).map(|_| None).collect();
        for (track, &original) in self.tracks.drain(..).zip(order.iter()) {
            slots[original] = Some(track);
        }
        self.tracks = slots.into_iter().flatten().collect();
        self.position = self.position.map(|p| order[p]);
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_permutation(indices: &[usize], len: usize) -> bool {
    if indices.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in indices {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
