//! Playlist loading

use crate::error::{CliError, Result};
use cadence_playback::{Playlist, Track};
use std::path::Path;

/// Load a playlist from a TOML file with `[[tracks]]` entries
pub fn load_playlist(path: &Path) -> Result<Playlist> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Playlist(format!("{}: {}", path.display(), e)))?;

    parse_playlist(&content).map_err(|e| match e {
        CliError::Playlist(msg) => CliError::Playlist(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

pub fn parse_playlist(content: &str) -> Result<Playlist> {
    toml::from_str(content).map_err(|e| CliError::Playlist(e.to_string()))
}

/// Built-in four-track playlist used when no file is given
pub fn sample_playlist() -> Result<Playlist> {
    let tracks = [
        ("1", "Ambient Dreams", "Sound Waves", 240.0, "ambient-dreams"),
        ("2", "Digital Horizon", "Tech Melody", 195.0, "digital-horizon"),
        ("3", "Ocean Waves", "Nature Sounds", 320.0, "ocean-waves"),
        ("4", "City Lights", "Urban Beats", 210.0, "city-lights"),
    ]
    .into_iter()
    .map(|(id, title, artist, duration_secs, slug)| Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        duration_secs,
        source_ref: format!("sample://{}.wav", slug),
        cover_ref: format!("sample://{}.jpg", slug),
    })
    .collect();

    Ok(Playlist::new(tracks)?)
}
