//! Derived display values
//!
//! Pure functions shared by every view layer.

/// Format seconds as `m:ss`
///
/// Fractions are truncated. Negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Progress bar fill fraction in [0, 1]
pub fn progress_fraction(position_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || !position_secs.is_finite() {
        return 0.0;
    }
    (position_secs / duration_secs).clamp(0.0, 1.0)
}

/// Seconds left in the track, never negative
pub fn remaining_secs(position_secs: f64, duration_secs: f64) -> f64 {
    (duration_secs - position_secs).max(0.0)
}

/// Convert a pointer position on a progress bar into a seek fraction
///
/// `bar_left` and `bar_width` describe the bar's horizontal extent in the
/// same units as `pointer_x`. Zero-width bars and non-finite input yield 0.
pub fn pointer_fraction(pointer_x: f64, bar_left: f64, bar_width: f64) -> f64 {
    if !bar_width.is_finite() || bar_width <= 0.0 {
        return 0.0;
    }
    let fraction = (pointer_x - bar_left) / bar_width;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
