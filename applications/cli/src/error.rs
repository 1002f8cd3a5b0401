/// CLI error types
use cadence_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playlist error: {0}")]
    Playlist(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {message}")]
    InvalidArgument { command: String, message: String },

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn invalid_argument(command: &str, message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Errors caused by a single bad input line
    ///
    /// The command loop reports these and keeps going.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::UnknownCommand(_) | CliError::InvalidArgument { .. } => true,
            CliError::Playback(e) => e.is_invalid_selection(),
            _ => false,
        }
    }
}
