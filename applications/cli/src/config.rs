/// CLI configuration
use crate::error::{CliError, Result};
use cadence_playback::ControllerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: ControllerConfig,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Spacing of simulated time reports
    #[serde(default = "default_time_update_interval_secs")]
    pub time_update_interval_secs: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `cadence.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. CADENCE_PLAYER__INITIAL_VOLUME
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let interval = self.simulation.time_update_interval_secs;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(CliError::Config(format!(
                "simulation.time_update_interval_secs must be positive, got {}",
                interval
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config(
                "logging.filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        time_update_interval_secs: default_time_update_interval_secs(),
    }
}

fn default_time_update_interval_secs() -> f64 {
    0.25
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "cadence=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: ControllerConfig::default(),
            simulation: default_simulation(),
            logging: default_logging(),
        }
    }
}
