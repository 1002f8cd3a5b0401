//! Audio primitive abstraction
//!
//! The controller never decodes audio. It drives a platform primitive
//! (an HTML audio element, a native player, a simulator) through this
//! trait and learns about asynchronous outcomes through [`PrimitiveEvent`]s
//! that the integrator feeds back into
//! [`PlaybackController::handle_event`](crate::PlaybackController::handle_event).

use crate::types::{PlayToken, SelectionToken};
use serde::{Deserialize, Serialize};

/// Platform audio primitive
///
/// `load` and `play` are fire-and-forget. Their completion must be reported
/// later as `LoadCompleted` / `PlayResolved` carrying the token passed in
/// here. Everything else is synchronous.
pub trait AudioPrimitive {
    /// Start loading a new source, replacing the current one
    ///
    /// The primitive is expected to stop any current output.
    fn load(&mut self, source_ref: &str, selection: SelectionToken);

    /// Request playback of the loaded source
    fn play(&mut self, token: PlayToken);

    /// Pause output
    fn pause(&mut self);

    /// Current position reported by the primitive, in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position, in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Current output volume in [0, 1]
    fn volume(&self) -> f64;

    /// Set output volume in [0, 1]
    fn set_volume(&mut self, volume: f64);
}

/// Notifications emitted by the audio primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveEvent {
    /// A `load` finished and the source is ready to play
    LoadCompleted { selection: SelectionToken },

    /// A `play` request was acknowledged or refused
    PlayResolved {
        token: PlayToken,
        outcome: Result<(), String>,
    },

    /// Periodic position report
    TimeUpdate {
        selection: SelectionToken,
        seconds: f64,
    },

    /// Playback reached the end of the source
    Ended { selection: SelectionToken },
}

impl PrimitiveEvent {
    /// Selection the event originates from
    pub fn selection(&self) -> SelectionToken {
        match self {
            PrimitiveEvent::LoadCompleted { selection }
            | PrimitiveEvent::TimeUpdate { selection, .. }
            | PrimitiveEvent::Ended { selection } => *selection,
            PrimitiveEvent::PlayResolved { token, .. } => token.selection,
        }
    }
}

/// Primitive that records calls, for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPrimitive {
    pub loads: Vec<(String, SelectionToken)>,
    pub plays: Vec<PlayToken>,
    pub pauses: usize,
    pub time: f64,
    pub volume: f64,
}

#[cfg(test)]
impl AudioPrimitive for RecordingPrimitive {
    fn load(&mut self, source_ref: &str, selection: SelectionToken) {
        self.loads.push((source_ref.to_string(), selection));
        self.time = 0.0;
    }

    fn play(&mut self, token: PlayToken) {
        self.plays.push(token);
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}
