//! Volume and mute state
//!
//! Mute is an override flag, not a zero volume: the stored level survives
//! any number of mute toggles.

use crate::error::{PlaybackError, Result};

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f64,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Out-of-range levels are clamped, non-finite ones fall back to 1.0.
    pub fn new(level: f64) -> Self {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            1.0
        };

        Self {
            level,
            muted: false,
        }
    }

    /// Set volume level (0.0-1.0)
    ///
    /// Raising the level above zero while muted unmutes.
    pub fn set_level(&mut self, level: f64) -> Result<()> {
        if !level.is_finite() || !(0.0..=1.0).contains(&level) {
            return Err(PlaybackError::InvalidVolume(level));
        }

        self.level = level;
        if level > 0.0 {
            self.muted = false;
        }
        Ok(())
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume to hand to the audio primitive
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn effective(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
