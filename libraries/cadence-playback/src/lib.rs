//! Cadence - Playback Control
//!
//! Platform-agnostic playback controller for Cadence.
//!
//! This crate provides:
//! - Playlist cursor with wrap-around next/previous
//! - Transport state that only reports `Playing` after the audio primitive
//!   acknowledged it
//! - Uniform shuffle with a pluggable randomness source
//! - Repeat of the current track
//! - Seek by fraction or absolute time, applied immediately
//! - Volume with an independent mute override
//! - Stale-notification filtering for superseded track loads
//!
//! # Architecture
//!
//! `cadence-playback` does not produce sound. It drives an
//! [`AudioPrimitive`] (HTML audio element, native player, simulator) and
//! the integrator feeds the primitive's asynchronous notifications back
//! through [`PlaybackController::handle_event`]. The UI reads
//! [`PlaybackSnapshot`]s and drains [`PlaybackEvent`]s; it never mutates
//! state except through the controller's operations.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_playback::{
//!     AudioPrimitive, ControllerConfig, PlayToken, PlaybackController, Playlist,
//!     PrimitiveEvent, SelectionToken, Track,
//! };
//!
//! #[derive(Default)]
//! struct Element {
//!     loaded: Option<SelectionToken>,
//!     play_requests: Vec<PlayToken>,
//!     time: f64,
//!     volume: f64,
//! }
//!
//! impl AudioPrimitive for Element {
//!     fn load(&mut self, _source_ref: &str, selection: SelectionToken) {
//!         self.loaded = Some(selection);
//!     }
//!     fn play(&mut self, token: PlayToken) {
//!         self.play_requests.push(token);
//!     }
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 {
//!         self.time
//!     }
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.time = seconds;
//!     }
//!     fn volume(&self) -> f64 {
//!         self.volume
//!     }
//!     fn set_volume(&mut self, volume: f64) {
//!         self.volume = volume;
//!     }
//! }
//!
//! let playlist = Playlist::new(vec![Track {
//!     id: "1".to_string(),
//!     title: "Ambient Dreams".to_string(),
//!     artist: "Sound Waves".to_string(),
//!     duration_secs: 240.0,
//!     source_ref: "/music/ambient.wav".to_string(),
//!     cover_ref: "/covers/ambient.jpg".to_string(),
//! }])
//! .unwrap();
//!
//! let mut controller =
//!     PlaybackController::new(playlist, Element::default(), ControllerConfig::default())
//!         .unwrap();
//!
//! // Play waits for the initial load, then for the acknowledgment
//! controller.play();
//! let selection = controller.selection();
//! controller
//!     .handle_event(PrimitiveEvent::LoadCompleted { selection })
//!     .unwrap();
//! let token = controller.primitive().play_requests[0];
//! controller
//!     .handle_event(PrimitiveEvent::PlayResolved { token, outcome: Ok(()) })
//!     .unwrap();
//! assert!(controller.is_playing());
//!
//! controller.seek_to_fraction(0.5).unwrap();
//! assert_eq!(controller.position_secs(), 120.0);
//! ```

mod controller;
pub mod display;
mod error;
mod events;
mod primitive;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use primitive::{AudioPrimitive, PrimitiveEvent};
pub use shuffle::{RandomShuffle, ScriptedShuffle, ShuffleSource};
pub use types::{
    ControllerConfig, PlayToken, PlaybackNotice, PlaybackSnapshot, Playlist, SelectionOrigin,
    SelectionToken, Track, TransportState,
};
pub use volume::Volume;
