//! Core types for the playback controller

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Track information supplied by the playlist source
///
/// Immutable for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Track duration in seconds (finite, > 0)
    #[serde(alias = "duration")]
    pub duration_secs: f64,

    /// Opaque locator handed to the audio primitive
    #[serde(alias = "src")]
    pub source_ref: String,

    /// Opaque locator for the cover image
    #[serde(alias = "cover", default)]
    pub cover_ref: String,
}

/// Ordered, non-empty track list fixed for the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, validating the data model
    ///
    /// Rejects empty lists, non-positive or non-finite durations and
    /// duplicate ids.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !track.duration_secs.is_finite() || track.duration_secs <= 0.0 {
                return Err(PlaybackError::InvalidTrack(format!(
                    "track {} has invalid duration {}",
                    track.id, track.duration_secs
                )));
            }
            if !seen.insert(track.id.as_str()) {
                return Err(PlaybackError::InvalidTrack(format!(
                    "duplicate track id {}",
                    track.id
                )));
            }
        }

        Ok(Self { tracks })
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl<'de> Deserialize<'de> for Playlist {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPlaylist {
            tracks: Vec<Track>,
        }

        let raw = RawPlaylist::deserialize(deserializer)?;
        Playlist::new(raw.tracks).map_err(serde::de::Error::custom)
    }
}

/// Transport state as seen by the UI
///
/// `Starting` means playback was requested but the primitive has not
/// acknowledged it yet (either the source is still loading or `play()`
/// is in flight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// Not playing, and no playback requested
    Stopped,

    /// Playback requested, waiting on the primitive
    Starting,

    /// Primitive acknowledged playback
    Playing,
}

/// Where a track selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOrigin {
    /// Transport controls or programmatic selection
    Controls,

    /// A click in the playlist panel (closes the panel)
    PlaylistPanel,
}

/// Identity of one source load
///
/// A new token is minted every time the controller loads a track, so
/// notifications from a superseded load can be told apart from current
/// ones even when the same index is selected twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionToken(pub u64);

impl SelectionToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Identity of one play request against a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayToken {
    /// Load the request was issued against
    pub selection: SelectionToken,

    /// Attempt counter, unique across the session
    pub attempt: u64,
}

/// Transient, dismissible notice shown after a rejected play request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackNotice {
    pub track_id: String,
    pub message: String,
}

/// Read-only view of the controller state for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub current_index: usize,
    pub track: Track,
    pub transport: TransportState,
    pub is_playing: bool,
    pub position_secs: f64,
    pub remaining_secs: f64,
    pub progress: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub effective_volume: f64,
    pub shuffle_enabled: bool,
    pub repeat_enabled: bool,
    pub playlist_panel_open: bool,
    pub notice: Option<PlaybackNotice>,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Initial volume in [0, 1] (default: 1.0)
    pub initial_volume: f64,

    /// Seed for shuffle selection; entropy-seeded when `None`
    pub shuffle_seed: Option<u64>,

    /// A time report within this distance of a seek target ends the seek
    /// (default: 1.0 s)
    pub seek_settle_tolerance_secs: f64,

    /// Reports ignored during a seek before the primitive is trusted again
    /// (default: 4)
    pub seek_settle_max_updates: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            shuffle_seed: None,
            seek_settle_tolerance_secs: 1.0,
            seek_settle_max_updates: 4,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_volume.is_finite() || !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "initial_volume must be within [0, 1], got {}",
                self.initial_volume
            )));
        }

        if !self.seek_settle_tolerance_secs.is_finite() || self.seek_settle_tolerance_secs < 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "seek_settle_tolerance_secs must be a non-negative number, got {}",
                self.seek_settle_tolerance_secs
            )));
        }

        Ok(())
    }
}
