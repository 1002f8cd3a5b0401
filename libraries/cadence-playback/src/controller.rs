//! Playback controller - core orchestration
//!
//! Owns the playlist cursor, transport state, position, volume and UI
//! toggles, and reconciles user intents with the audio primitive's
//! asynchronous notifications.
//!
//! Every source load is tagged with a fresh [`SelectionToken`] and every
//! play request with a [`PlayToken`]. Notifications carrying a token that
//! no longer matches are discarded, which is what keeps a slow load or a
//! late play acknowledgment from resurrecting a superseded selection.

use crate::{
    display,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    primitive::{AudioPrimitive, PrimitiveEvent},
    shuffle::{RandomShuffle, ShuffleSource},
    types::{
        ControllerConfig, PlayToken, PlaybackNotice, PlaybackSnapshot, Playlist, SelectionOrigin,
        SelectionToken, Track, TransportState,
    },
    volume::Volume,
};
use tracing::{debug, info, warn};

/// Internal transport state
///
/// Finer grained than [`TransportState`]: the two `Starting` flavours are
/// distinguished so a resume can wait for the load it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Stopped,
    /// Playback wanted, waiting for the current load to complete
    AwaitingLoad,
    /// `play()` issued, waiting for its acknowledgment
    Starting(PlayToken),
    Playing,
}

impl Transport {
    fn public(self) -> TransportState {
        match self {
            Transport::Stopped => TransportState::Stopped,
            Transport::AwaitingLoad | Transport::Starting(_) => TransportState::Starting,
            Transport::Playing => TransportState::Playing,
        }
    }
}

/// Seek waiting for the primitive to report a matching position
#[derive(Debug, Clone, Copy)]
struct PendingSeek {
    target_secs: f64,
    ignored_updates: u32,
}

/// Central playback coordination
///
/// Single-threaded: every operation and every notification runs on the
/// caller's thread and completes without blocking.
pub struct PlaybackController<P: AudioPrimitive> {
    // Playlist and cursor
    playlist: Playlist,
    current_index: usize,

    // Transport
    transport: Transport,
    selection: SelectionToken,
    load_in_flight: bool,
    play_attempts: u64,

    // Position
    position_secs: f64,
    pending_seek: Option<PendingSeek>,
    seek_settle_tolerance_secs: f64,
    seek_settle_max_updates: u32,

    // Settings
    volume: Volume,
    shuffle_enabled: bool,
    repeat_enabled: bool,
    playlist_panel_open: bool,

    // Collaborators
    primitive: P,
    shuffle: Box<dyn ShuffleSource>,

    // Transient notice after a rejected play request
    notice: Option<PlaybackNotice>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<P: AudioPrimitive> PlaybackController<P> {
    /// Create a controller and load the first track into the primitive
    pub fn new(playlist: Playlist, primitive: P, config: ControllerConfig) -> Result<Self> {
        config.validate()?;

        let mut controller = Self {
            playlist,
            current_index: 0,
            transport: Transport::Stopped,
            selection: SelectionToken(0),
            load_in_flight: false,
            play_attempts: 0,
            position_secs: 0.0,
            pending_seek: None,
            seek_settle_tolerance_secs: config.seek_settle_tolerance_secs,
            seek_settle_max_updates: config.seek_settle_max_updates,
            volume: Volume::new(config.initial_volume),
            shuffle_enabled: false,
            repeat_enabled: false,
            playlist_panel_open: false,
            primitive,
            shuffle: Box::new(RandomShuffle::from_seed_option(config.shuffle_seed)),
            notice: None,
            pending_events: Vec::new(),
        };

        controller.apply_volume();
        controller.load_current();
        Ok(controller)
    }

    /// Replace the randomness used for shuffle picks
    pub fn with_shuffle_source(mut self, shuffle: Box<dyn ShuffleSource>) -> Self {
        self.shuffle = shuffle;
        self
    }

    // ===== Playback Control =====

    /// Request playback
    ///
    /// Playback only counts as started once the primitive acknowledges it.
    /// If the current source is still loading, the request waits for the
    /// load to finish.
    pub fn play(&mut self) {
        if self.transport != Transport::Stopped {
            return;
        }

        self.notice = None;
        if self.load_in_flight {
            self.set_transport(Transport::AwaitingLoad);
        } else {
            self.issue_play();
        }
    }

    /// Pause playback
    ///
    /// Takes effect immediately and cancels any pending resume.
    pub fn pause(&mut self) {
        self.primitive.pause();
        self.set_transport(Transport::Stopped);
    }

    /// Pause if playback is wanted, play otherwise
    pub fn toggle(&mut self) {
        if self.wants_playback() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Select a track by playlist index
    ///
    /// Resets the position and loads the new source. Playback resumes after
    /// the load if it was wanted before the call.
    pub fn select_track(&mut self, index: usize, origin: SelectionOrigin) -> Result<()> {
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            });
        }

        if origin == SelectionOrigin::PlaylistPanel && self.playlist_panel_open {
            self.playlist_panel_open = false;
            self.pending_events
                .push(PlaybackEvent::PlaylistPanelToggled { open: false });
        }

        self.change_track(index);
        Ok(())
    }

    /// Skip to next track
    ///
    /// With shuffle enabled the next track is a uniform random pick, which
    /// may be the current track again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let index = self.next_index();
        self.change_track(index);
    }

    /// Go to previous track, wrapping to the last one
    ///
    /// Ignores shuffle.
    pub fn previous(&mut self) {
        let index = if self.current_index == 0 {
            self.playlist.len() - 1
        } else {
            self.current_index - 1
        };
        self.change_track(index);
    }

    // ===== Seek =====

    /// Seek to a fraction of the current track
    ///
    /// The fraction is clamped into [0, 1].
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if !fraction.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(fraction));
        }

        let target = fraction.clamp(0.0, 1.0) * self.current_duration();
        self.apply_seek(target);
        Ok(())
    }

    /// Seek to an absolute position in seconds
    ///
    /// The position is clamped into the track.
    pub fn seek_to(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }

        let target = seconds.clamp(0.0, self.current_duration());
        self.apply_seek(target);
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0)
    ///
    /// A non-zero volume unmutes.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.volume.set_level(volume)?;
        self.apply_volume();
        self.emit_volume_changed();
        Ok(())
    }

    /// Toggle mute state, keeping the stored volume
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
        self.emit_volume_changed();
    }

    // ===== Modes & UI =====

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.shuffle_enabled = !self.shuffle_enabled;
        self.emit_modes_changed();
    }

    /// Toggle repeat of the current track
    pub fn toggle_repeat(&mut self) {
        self.repeat_enabled = !self.repeat_enabled;
        self.emit_modes_changed();
    }

    /// Open or close the playlist panel
    pub fn toggle_playlist_panel(&mut self) {
        self.playlist_panel_open = !self.playlist_panel_open;
        self.pending_events.push(PlaybackEvent::PlaylistPanelToggled {
            open: self.playlist_panel_open,
        });
    }

    /// Clear the playback-rejected notice
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ===== Primitive Notifications =====

    /// Process one notification from the audio primitive
    ///
    /// Notifications must be passed in the order the primitive emitted
    /// them. Stale notifications are dropped silently. A rejected play
    /// request is returned as [`PlaybackError::PlaybackRejected`] after the
    /// controller has already recovered to `Stopped`.
    pub fn handle_event(&mut self, event: PrimitiveEvent) -> Result<()> {
        if event.selection() != self.selection {
            debug!(
                "Discarding stale primitive event {:?} (current selection {})",
                event, self.selection.0
            );
            return Ok(());
        }

        match event {
            PrimitiveEvent::LoadCompleted { .. } => {
                self.handle_load_completed();
                Ok(())
            }
            PrimitiveEvent::PlayResolved { token, outcome } => self.handle_play_resolved(token, outcome),
            PrimitiveEvent::TimeUpdate { seconds, .. } => {
                self.handle_time_update(seconds);
                Ok(())
            }
            PrimitiveEvent::Ended { .. } => {
                self.handle_ended();
                Ok(())
            }
        }
    }

    fn handle_load_completed(&mut self) {
        if !self.load_in_flight {
            debug!("Ignoring duplicate load completion for selection {}", self.selection.0);
            return;
        }

        self.load_in_flight = false;
        if self.transport == Transport::AwaitingLoad {
            self.issue_play();
        }
    }

    fn handle_play_resolved(
        &mut self,
        token: PlayToken,
        outcome: std::result::Result<(), String>,
    ) -> Result<()> {
        if self.transport != Transport::Starting(token) {
            // Superseded attempt. If the user paused while it was in flight
            // but the primitive started anyway, stop it again.
            if outcome.is_ok() && self.transport == Transport::Stopped {
                debug!(
                    "Late play acknowledgment (attempt {}) after pause, pausing primitive",
                    token.attempt
                );
                self.primitive.pause();
            } else {
                debug!("Discarding stale play resolution for attempt {}", token.attempt);
            }
            return Ok(());
        }

        match outcome {
            Ok(()) => {
                self.set_transport(Transport::Playing);
                Ok(())
            }
            Err(reason) => {
                let track_id = self.current_track().id.clone();
                warn!("Playback of track {} rejected: {}", track_id, reason);

                self.set_transport(Transport::Stopped);
                self.notice = Some(PlaybackNotice {
                    track_id: track_id.clone(),
                    message: reason.clone(),
                });
                self.pending_events.push(PlaybackEvent::Error {
                    message: format!("Could not play {}: {}", track_id, reason),
                });

                Err(PlaybackError::PlaybackRejected { track_id, reason })
            }
        }
    }

    fn handle_time_update(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            warn!("Ignoring non-finite time report: {}", seconds);
            return;
        }

        if let Some(seek) = self.pending_seek.as_mut() {
            if (seconds - seek.target_secs).abs() <= self.seek_settle_tolerance_secs {
                debug!("Seek to {:.2}s settled", seek.target_secs);
                self.pending_seek = None;
            } else if seek.ignored_updates < self.seek_settle_max_updates {
                seek.ignored_updates += 1;
                debug!(
                    "Ignoring time report {:.2}s while seeking to {:.2}s",
                    seconds, seek.target_secs
                );
                return;
            } else {
                debug!(
                    "Seek to {:.2}s never settled, trusting primitive again",
                    seek.target_secs
                );
                self.pending_seek = None;
            }
        }

        self.position_secs = seconds.clamp(0.0, self.current_duration());
        self.emit_position_update();
    }

    fn handle_ended(&mut self) {
        if self.repeat_enabled {
            self.pending_seek = None;
            self.position_secs = 0.0;
            self.primitive.set_current_time(0.0);
            self.emit_position_update();

            if self.load_in_flight {
                if self.wants_playback() {
                    self.set_transport(Transport::AwaitingLoad);
                }
            } else if self.wants_playback() {
                self.issue_play();
            }
            return;
        }

        // Auto-advance keeps whatever intent held before the end
        let index = self.next_index();
        self.change_track(index);
    }

    // ===== State Queries =====

    /// Index of the selected track (always valid)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Currently selected track
    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.current_index]
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Transport state as shown to the UI
    pub fn transport_state(&self) -> TransportState {
        self.transport.public()
    }

    /// True only after the primitive acknowledged playback of the current
    /// selection
    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    /// True when playback is playing or requested
    pub fn wants_playback(&self) -> bool {
        self.transport != Transport::Stopped
    }

    /// Authoritative display position in seconds
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Stored volume level (0.0-1.0)
    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Volume applied to the primitive
    pub fn effective_volume(&self) -> f64 {
        self.volume.effective()
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn repeat_enabled(&self) -> bool {
        self.repeat_enabled
    }

    pub fn playlist_panel_open(&self) -> bool {
        self.playlist_panel_open
    }

    pub fn notice(&self) -> Option<&PlaybackNotice> {
        self.notice.as_ref()
    }

    /// Token of the current source load
    pub fn selection(&self) -> SelectionToken {
        self.selection
    }

    /// True while the current source is loading
    pub fn is_loading(&self) -> bool {
        self.load_in_flight
    }

    /// True while a seek waits for the primitive to catch up
    pub fn is_seeking(&self) -> bool {
        self.pending_seek.is_some()
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn primitive_mut(&mut self) -> &mut P {
        &mut self.primitive
    }

    /// Copy of the observable state for rendering
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let track = self.current_track().clone();
        let duration = track.duration_secs;

        PlaybackSnapshot {
            current_index: self.current_index,
            transport: self.transport_state(),
            is_playing: self.is_playing(),
            position_secs: self.position_secs,
            remaining_secs: display::remaining_secs(self.position_secs, duration),
            progress: display::progress_fraction(self.position_secs, duration),
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            effective_volume: self.volume.effective(),
            shuffle_enabled: self.shuffle_enabled,
            repeat_enabled: self.repeat_enabled,
            playlist_panel_open: self.playlist_panel_open,
            notice: self.notice.clone(),
            track,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn current_duration(&self) -> f64 {
        self.current_track().duration_secs
    }

    fn next_index(&mut self) -> usize {
        if self.shuffle_enabled {
            self.shuffle.pick(self.playlist.len())
        } else {
            (self.current_index + 1) % self.playlist.len()
        }
    }

    /// Switch to `index`, superseding any in-flight load or play request
    fn change_track(&mut self, index: usize) {
        let resume = self.wants_playback();
        let previous_index = self.current_index;

        self.current_index = index;
        self.position_secs = 0.0;
        self.pending_seek = None;
        self.load_current();

        self.set_transport(if resume {
            Transport::AwaitingLoad
        } else {
            Transport::Stopped
        });

        let track_id = self.current_track().id.clone();
        info!(
            "Selected track {} ({}) at index {}, resume: {}",
            track_id,
            self.current_track().title,
            index,
            resume
        );
        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            track_id,
            previous_index,
        });
        self.emit_position_update();
    }

    /// Mint a new selection token and hand the current source to the primitive
    fn load_current(&mut self) {
        self.selection = self.selection.next();
        self.load_in_flight = true;

        let track = &self.playlist.tracks()[self.current_index];
        self.primitive.load(&track.source_ref, self.selection);
    }

    fn issue_play(&mut self) {
        self.play_attempts += 1;
        let token = PlayToken {
            selection: self.selection,
            attempt: self.play_attempts,
        };

        self.set_transport(Transport::Starting(token));
        self.primitive.play(token);
    }

    fn apply_seek(&mut self, target_secs: f64) {
        self.primitive.set_current_time(target_secs);
        self.position_secs = target_secs;
        self.pending_seek = Some(PendingSeek {
            target_secs,
            ignored_updates: 0,
        });
        self.emit_position_update();
    }

    fn apply_volume(&mut self) {
        self.primitive.set_volume(self.volume.effective());
    }

    fn set_transport(&mut self, transport: Transport) {
        let before = self.transport.public();
        self.transport = transport;

        let after = transport.public();
        if before != after {
            self.pending_events
                .push(PlaybackEvent::StateChanged { state: after });
        }
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.position_secs,
            duration_secs: self.current_duration(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_modes_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModesChanged {
            shuffle: self.shuffle_enabled,
            repeat: self.repeat_enabled,
        });
    }
}
