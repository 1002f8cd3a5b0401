//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the controller and drained by the UI with
//! [`PlaybackController::drain_events`](crate::PlaybackController::drain_events):
//! - Transport changes (stopped/starting/playing)
//! - Track changes
//! - Position updates (time reports and seeks)
//! - Volume and mode changes

use crate::types::TransportState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Selected track changed
    TrackChanged {
        /// Index of the new track
        index: usize,
        /// ID of the new track
        track_id: String,
        /// Index selected before the change
        previous_index: usize,
    },

    /// Position changed, from a time report or a seek
    PositionUpdate {
        /// Current position in seconds
        position_secs: f64,
        /// Track duration in seconds
        duration_secs: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Stored volume level (0.0-1.0)
        volume: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle or repeat toggled
    ModesChanged { shuffle: bool, repeat: bool },

    /// Playlist panel opened or closed
    PlaylistPanelToggled { open: bool },

    /// Playback could not start
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Events the UI shows as a one-line log entry
    ///
    /// Position updates are frequent and excluded.
    pub fn is_notable(&self) -> bool {
        !matches!(self, PlaybackEvent::PositionUpdate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_updates_are_not_notable() {
        let update = PlaybackEvent::PositionUpdate {
            position_secs: 1.0,
            duration_secs: 2.0,
        };
        assert!(!update.is_notable());

        let state = PlaybackEvent::StateChanged {
            state: TransportState::Playing,
        };
        assert!(state.is_notable());
    }

    #[test]
    fn events_serialize_with_variant_names() {
        let event = PlaybackEvent::ModesChanged {
            shuffle: true,
            repeat: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"ModesChanged":{"shuffle":true,"repeat":false}}"#);
    }
}
