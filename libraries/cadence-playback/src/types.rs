//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity contract for anything the engine can play
///
/// The engine only ever reads an identifier and a duration. Everything
/// else a catalog attaches to a track is passed through untouched.
pub trait Playable {
    /// Unique track identifier from the catalog
    fn id(&self) -> &str;

    /// Track duration in seconds
    fn duration_secs(&self) -> f64;
}

/// Track information as produced by the catalog
///
/// Field names follow the catalog DTO so records can be deserialized
/// directly from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier from the catalog
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name (optional)
    #[serde(default)]
    pub album: Option<String>,

    /// Album artist, when different from the track artist
    #[serde(default)]
    pub album_artist: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default)]
    pub year: Option<u32>,

    /// Track number in album (optional)
    #[serde(default)]
    pub track_number: Option<u32>,

    #[serde(default)]
    pub disc_number: Option<u32>,

    /// Track duration in seconds
    pub duration: f64,

    /// Local file path for audio decoding
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Remote stream location
    #[serde(default)]
    pub stream_url: Option<String>,

    /// Cover art on disk
    #[serde(default)]
    pub artwork_path: Option<PathBuf>,
}

impl Track {
    /// Create a track with only the fields playback needs
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: None,
            album_artist: None,
            genre: None,
            year: None,
            track_number: None,
            disc_number: None,
            duration,
            path: None,
            stream_url: None,
            artwork_path: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the local file path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Playable for Track {
    fn id(&self) -> &str {
        &self.id
    }

    fn duration_secs(&self) -> f64 {
        self.duration
    }
}

/// Coarse playback state, derived from the loaded track and transport flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Empty,

    /// Track loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off → All → One → Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycle_visits_every_mode() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
    }

    #[test]
    fn track_creation() {
        let track = Track::new("track1", "Test Song", 180.0)
            .with_artist("Test Artist")
            .with_album("Test Album")
            .with_path("/music/song.mp3");

        assert_eq!(track.id(), "track1");
        assert_eq!(track.duration_secs(), 180.0);
        assert_eq!(track.album.as_deref(), Some("Test Album"));
        assert_eq!(track.path, Some(PathBuf::from("/music/song.mp3")));
    }

    #[test]
    fn track_deserializes_from_catalog_dto() {
        let json = r#"{
            "id": "t-42",
            "sourceId": "fs-1",
            "title": "Blue in Green",
            "artist": "Miles Davis",
            "albumArtist": "Miles Davis",
            "trackNumber": 3,
            "duration": 337.5,
            "artworkPath": "/covers/kob.jpg"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "t-42");
        assert_eq!(track.track_number, Some(3));
        assert_eq!(track.duration, 337.5);
        assert_eq!(track.album, None);
        assert_eq!(track.artwork_path, Some(PathBuf::from("/covers/kob.jpg")));
    }
}
