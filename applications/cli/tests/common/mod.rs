//! Common test utilities and fixtures
#![allow(dead_code)]

use cadence_cli::{Command, CliConfig, Flow, Session};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Session over the built-in sample playlist with a fixed shuffle seed
pub fn sample_session() -> Session {
    let mut config = CliConfig::default();
    config.player.shuffle_seed = Some(42);
    Session::new(cadence_cli::sample_playlist().unwrap(), &config).unwrap()
}

/// Parse and run a sequence of commands, panicking on any error
pub fn run_all(session: &mut Session, commands: &[&str]) {
    for line in commands {
        let command: Command = line.parse().unwrap();
        assert_eq!(session.execute(&command).unwrap(), Flow::Continue, "{}", line);
    }
}

/// Write `content` to `name` inside a fresh temporary directory
pub fn write_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

pub mod fixtures {
    pub const TWO_TRACK_PLAYLIST: &str = r#"
[[tracks]]
id = "intro"
title = "Intro"
artist = "Test Band"
duration_secs = 30.0
source_ref = "file:///music/intro.wav"
cover_ref = "file:///covers/intro.jpg"

[[tracks]]
id = "broken"
title = "Broken"
artist = "Test Band"
duration_secs = 45.0
source_ref = "unavailable:file:///music/broken.wav"
"#;
}
