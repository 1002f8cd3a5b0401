//! Text rendering of the player
//!
//! Pure presentation over a [`PlaybackSnapshot`]; nothing here touches the
//! controller.

use cadence_playback::display::format_time;
use cadence_playback::{PlaybackSnapshot, Playlist, TransportState};

/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: usize = 30;

pub fn render(snapshot: &PlaybackSnapshot, playlist: &Playlist) -> String {
    let track = &snapshot.track;
    let mut lines = vec![format!("{} - {}", track.title, track.artist)];

    if !track.cover_ref.is_empty() {
        lines.push(format!("  cover: {}", track.cover_ref));
    }
    lines.push(format!(
        "  [{}] {} / -{}",
        progress_bar(snapshot.progress, PROGRESS_BAR_WIDTH),
        format_time(snapshot.position_secs),
        format_time(snapshot.remaining_secs)
    ));
    lines.push(format!("  {}", status_line(snapshot)));

    if let Some(notice) = &snapshot.notice {
        lines.push(format!(
            "  ! Could not play track {}: {}",
            notice.track_id, notice.message
        ));
    }

    if snapshot.playlist_panel_open {
        lines.push("  Playlist:".to_string());
        for (index, entry) in playlist.tracks().iter().enumerate() {
            let marker = if index == snapshot.current_index { '>' } else { ' ' };
            lines.push(format!(
                "  {} {}. {} - {} ({})",
                marker,
                index + 1,
                entry.title,
                entry.artist,
                format_time(entry.duration_secs)
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn status_line(snapshot: &PlaybackSnapshot) -> String {
    let transport = match snapshot.transport {
        TransportState::Stopped => "Paused",
        TransportState::Starting => "Starting",
        TransportState::Playing => "Playing",
    };

    let volume = if snapshot.is_muted {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", snapshot.volume * 100.0)
    };

    let mut parts = vec![transport.to_string(), volume];
    if snapshot.shuffle_enabled {
        parts.push("shuffle".to_string());
    }
    if snapshot.repeat_enabled {
        parts.push("repeat".to_string());
    }
    parts.join(" | ")
}
