//! Error types for the playback controller

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The audio primitive refused to start playback
    ///
    /// Recovered locally: the controller is already back in `Stopped`
    /// when this is returned.
    #[error("Playback of track {track_id} was rejected: {reason}")]
    PlaybackRejected { track_id: String, reason: String },

    /// Track index outside the playlist
    #[error("Index out of bounds: {index} (playlist has {len} tracks)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Seek target is not a finite number
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Volume outside [0, 1] or not finite
    #[error("Invalid volume: {0}")]
    InvalidVolume(f64),

    /// Playlists must contain at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Track metadata violates the data model
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// Errors raised at the call boundary for out-of-range input
    ///
    /// State is never modified when one of these is returned.
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            PlaybackError::IndexOutOfBounds { .. }
                | PlaybackError::InvalidSeekPosition(_)
                | PlaybackError::InvalidVolume(_)
        )
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
