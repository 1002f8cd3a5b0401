//! Shared helpers for controller integration tests

#![allow(dead_code)]

use cadence_playback::{
    AudioPrimitive, ControllerConfig, PlayToken, PlaybackController, PlaybackError, Playlist,
    PrimitiveEvent, SelectionToken, Track,
};
use std::collections::VecDeque;

/// Mock audio primitive
///
/// Completions of `load` and `play` are queued instead of delivered, so
/// tests decide when (and whether) the "asynchronous" work finishes.
#[derive(Debug, Default)]
pub struct MockPrimitive {
    pub outbox: VecDeque<PrimitiveEvent>,
    pub loaded: Vec<String>,
    pub current: Option<SelectionToken>,
    pub play_requests: Vec<PlayToken>,
    pub pause_calls: usize,
    pub time: f64,
    pub volume: f64,
    /// Reject every play request with this reason
    pub reject_with: Option<String>,
}

impl AudioPrimitive for MockPrimitive {
    fn load(&mut self, source_ref: &str, selection: SelectionToken) {
        self.loaded.push(source_ref.to_string());
        self.current = Some(selection);
        self.time = 0.0;
        self.outbox
            .push_back(PrimitiveEvent::LoadCompleted { selection });
    }

    fn play(&mut self, token: PlayToken) {
        self.play_requests.push(token);
        let outcome = match &self.reject_with {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        };
        self.outbox
            .push_back(PrimitiveEvent::PlayResolved { token, outcome });
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
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

pub fn create_test_track(id: &str, duration_secs: f64) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        duration_secs,
        source_ref: format!("/music/{}.wav", id),
        cover_ref: format!("/covers/{}.jpg", id),
    }
}

/// Four tracks with the sample playlist's durations
pub fn four_track_playlist() -> Playlist {
    Playlist::new(vec![
        create_test_track("1", 240.0),
        create_test_track("2", 195.0),
        create_test_track("3", 320.0),
        create_test_track("4", 210.0),
    ])
    .unwrap()
}

pub fn create_controller() -> PlaybackController<MockPrimitive> {
    PlaybackController::new(
        four_track_playlist(),
        MockPrimitive::default(),
        ControllerConfig::default(),
    )
    .unwrap()
}

/// Deliver every queued primitive notification in emission order,
/// including ones queued while delivering
///
/// Returns the errors reported by the controller.
pub fn pump(controller: &mut PlaybackController<MockPrimitive>) -> Vec<PlaybackError> {
    let mut errors = Vec::new();
    while let Some(event) = controller.primitive_mut().outbox.pop_front() {
        if let Err(e) = controller.handle_event(event) {
            errors.push(e);
        }
    }
    errors
}

/// Start playback from a fresh controller and wait until it is acknowledged
pub fn start_playing(controller: &mut PlaybackController<MockPrimitive>) {
    controller.play();
    assert!(pump(controller).is_empty());
    assert!(controller.is_playing());
}
