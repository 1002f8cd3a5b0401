//! Cadence CLI Library
//!
//! Terminal front-end for the Cadence playback controller, driving a
//! simulated audio primitive in virtual time.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod playlist;
pub mod simulator;
pub mod view;

// Re-export commonly used types for convenience
pub use commands::{run, Command, Flow, Session};
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use playlist::{load_playlist, sample_playlist};
pub use simulator::SimulatedPrimitive;
