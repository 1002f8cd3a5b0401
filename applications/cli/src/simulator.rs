//! Simulated audio primitive
//!
//! Plays sources in virtual time. Completions of `load` and `play` are
//! queued like the callbacks of a real media element and handed to the
//! controller by the session loop.

use cadence_playback::{AudioPrimitive, PlayToken, PrimitiveEvent, SelectionToken};
use std::collections::VecDeque;
use tracing::debug;

/// Sources with this prefix always refuse to play
pub const UNAVAILABLE_PREFIX: &str = "unavailable:";

#[derive(Debug)]
pub struct SimulatedPrimitive {
    interval_secs: f64,
    outbox: VecDeque<PrimitiveEvent>,
    source: Option<String>,
    selection: Option<SelectionToken>,
    playing: bool,
    time: f64,
    volume: f64,
    injected_failure: Option<String>,
}

impl SimulatedPrimitive {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            outbox: VecDeque::new(),
            source: None,
            selection: None,
            playing: false,
            time: 0.0,
            volume: 1.0,
            injected_failure: None,
        }
    }

    /// Make the next play request reject with `reason`
    pub fn inject_failure(&mut self, reason: impl Into<String>) {
        self.injected_failure = Some(reason.into());
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn loaded_source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Take the oldest queued notification
    pub fn poll_event(&mut self) -> Option<PrimitiveEvent> {
        self.outbox.pop_front()
    }

    pub fn has_queued_events(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Let `secs` of virtual time pass for a source of `duration_secs`
    ///
    /// Queues a time report every interval and `Ended` when the source runs
    /// out. Returns the virtual time left over after an end, which is zero
    /// when the source is still playing.
    pub fn advance(&mut self, secs: f64, duration_secs: f64) -> f64 {
        let Some(selection) = self.selection else {
            return 0.0;
        };
        if !self.playing || !secs.is_finite() || secs <= 0.0 {
            return 0.0;
        }

        let mut remaining = secs;
        while remaining > 0.0 {
            let step = remaining.min(self.interval_secs);
            remaining -= step;

            if self.time + step >= duration_secs {
                let overshoot = self.time + step - duration_secs;
                self.time = duration_secs;
                self.playing = false;
                self.outbox.push_back(PrimitiveEvent::TimeUpdate {
                    selection,
                    seconds: duration_secs,
                });
                self.outbox.push_back(PrimitiveEvent::Ended { selection });
                debug!("Simulated source ended at {:.2}s", duration_secs);
                return remaining + overshoot;
            }

            self.time += step;
            self.outbox.push_back(PrimitiveEvent::TimeUpdate {
                selection,
                seconds: self.time,
            });
        }

        0.0
    }
}

impl AudioPrimitive for SimulatedPrimitive {
    fn load(&mut self, source_ref: &str, selection: SelectionToken) {
        debug!("Simulated load of {} (selection {})", source_ref, selection.0);
        self.source = Some(source_ref.to_string());
        self.selection = Some(selection);
        self.playing = false;
        self.time = 0.0;
        self.outbox
            .push_back(PrimitiveEvent::LoadCompleted { selection });
    }

    fn play(&mut self, token: PlayToken) {
        let outcome = if let Some(reason) = self.injected_failure.take() {
            Err(reason)
        } else if self
            .source
            .as_deref()
            .is_some_and(|s| s.starts_with(UNAVAILABLE_PREFIX))
        {
            Err("source unavailable".to_string())
        } else {
            Ok(())
        };

        self.playing = outcome.is_ok();
        self.outbox
            .push_back(PrimitiveEvent::PlayResolved { token, outcome });
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds.max(0.0);
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}
