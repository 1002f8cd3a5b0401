//! Environment overrides for the CLI configuration
//!
//! Kept in its own test binary: environment variables are process-wide and
//! would leak into the file-based config tests running in parallel.

mod common;

use cadence_cli::config::CliConfig;
use common::write_temp_file;

#[test]
fn environment_overrides_file_values() {
    let (_dir, path) = write_temp_file(
        "cadence.toml",
        r#"
[player]
initial_volume = 0.25

[simulation]
time_update_interval_secs = 0.5
"#,
    );

    std::env::set_var("CADENCE_PLAYER__INITIAL_VOLUME", "0.5");
    std::env::set_var("CADENCE_SIMULATION__TIME_UPDATE_INTERVAL_SECS", "1");

    let config = CliConfig::load(Some(&path));

    std::env::remove_var("CADENCE_PLAYER__INITIAL_VOLUME");
    std::env::remove_var("CADENCE_SIMULATION__TIME_UPDATE_INTERVAL_SECS");

    let config = config.unwrap();
    assert_eq!(config.player.initial_volume, 0.5);
    assert_eq!(config.simulation.time_update_interval_secs, 1.0);
    // Untouched keys keep their file or default values
    assert_eq!(config.player.seek_settle_max_updates, 4);
    assert!(config.validate().is_ok());
}
