//! Command parsing and the interactive session
//!
//! Each input line is one command. After a command runs, every
//! notification the simulated primitive queued is delivered to the
//! controller in emission order before the view is rendered again.

use crate::{
    config::CliConfig,
    error::{CliError, Result},
    simulator::SimulatedPrimitive,
    view,
};
use cadence_playback::{display, PlaybackController, PlaybackSnapshot, Playlist, SelectionOrigin};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Failure reason used by the `fail` command
pub const INJECTED_FAILURE: &str = "playback refused by device";

pub const HELP: &str = "\
commands:
  play | pause | toggle        transport
  next | prev                  navigate
  select <n>                   pick track n from the playlist panel (1-based)
  seek <fraction>              seek to a fraction of the track
  seekto <seconds>             seek to an absolute position
  click <x> <left> <width>     seek by clicking a progress bar
  volume <0..1> | mute         volume
  shuffle | repeat | list      modes and playlist panel
  tick <seconds>               let simulated time pass
  fail                         make the next play request fail
  dismiss                      clear the error notice
  status | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    /// Zero-based playlist index picked in the playlist panel
    Select(usize),
    Seek(f64),
    SeekTo(f64),
    Click { x: f64, left: f64, width: f64 },
    Volume(f64),
    Mute,
    Shuffle,
    Repeat,
    List,
    Tick(f64),
    Fail,
    Dismiss,
    Status,
    Help,
    Quit,
}

fn parse_number(command: &str, arg: Option<&str>) -> Result<f64> {
    let arg = arg.ok_or_else(|| CliError::invalid_argument(command, "missing number"))?;
    arg.parse::<f64>()
        .map_err(|_| CliError::invalid_argument(command, format!("not a number: {}", arg)))
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| CliError::UnknownCommand(String::new()))?
            .to_ascii_lowercase();

        let command = match name.as_str() {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "select" => {
                let arg = words
                    .next()
                    .ok_or_else(|| CliError::invalid_argument("select", "missing track number"))?;
                let number: usize = arg.parse().map_err(|_| {
                    CliError::invalid_argument("select", format!("not a track number: {}", arg))
                })?;
                let index = number
                    .checked_sub(1)
                    .ok_or_else(|| CliError::invalid_argument("select", "tracks start at 1"))?;
                Command::Select(index)
            }
            "seek" => Command::Seek(parse_number("seek", words.next())?),
            "seekto" => Command::SeekTo(parse_number("seekto", words.next())?),
            "click" => Command::Click {
                x: parse_number("click", words.next())?,
                left: parse_number("click", words.next())?,
                width: parse_number("click", words.next())?,
            },
            "volume" | "vol" => Command::Volume(parse_number("volume", words.next())?),
            "mute" => Command::Mute,
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "list" => Command::List,
            "tick" => {
                let secs = parse_number("tick", words.next())?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(CliError::invalid_argument(
                        "tick",
                        "seconds must be a non-negative number",
                    ));
                }
                Command::Tick(secs)
            }
            "fail" => Command::Fail,
            "dismiss" => Command::Dismiss,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A controller wired to a simulated primitive
pub struct Session {
    controller: PlaybackController<SimulatedPrimitive>,
}

impl Session {
    pub fn new(playlist: Playlist, config: &CliConfig) -> Result<Self> {
        config.validate()?;

        let primitive = SimulatedPrimitive::new(config.simulation.time_update_interval_secs);
        let controller = PlaybackController::new(playlist, primitive, config.player.clone())?;

        let mut session = Self { controller };
        session.pump();
        Ok(session)
    }

    pub fn controller(&self) -> &PlaybackController<SimulatedPrimitive> {
        &self.controller
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn render(&self) -> String {
        view::render(&self.controller.snapshot(), self.controller.playlist())
    }

    /// Run one command and deliver the notifications it caused
    pub fn execute(&mut self, command: &Command) -> Result<Flow> {
        let result = self.apply(command);
        self.pump();
        result
    }

    fn apply(&mut self, command: &Command) -> Result<Flow> {
        if let Command::Tick(secs) = *command {
            self.tick(secs);
            return Ok(Flow::Continue);
        }

        let controller = &mut self.controller;

        match *command {
            Command::Play => controller.play(),
            Command::Pause => controller.pause(),
            Command::Toggle => controller.toggle(),
            Command::Next => controller.next(),
            Command::Previous => controller.previous(),
            Command::Select(index) => {
                controller.select_track(index, SelectionOrigin::PlaylistPanel)?;
            }
            Command::Seek(fraction) => controller.seek_to_fraction(fraction)?,
            Command::SeekTo(seconds) => controller.seek_to(seconds)?,
            Command::Click { x, left, width } => {
                controller.seek_to_fraction(display::pointer_fraction(x, left, width))?;
            }
            Command::Volume(volume) => controller.set_volume(volume)?,
            Command::Mute => controller.toggle_mute(),
            Command::Shuffle => controller.toggle_shuffle(),
            Command::Repeat => controller.toggle_repeat(),
            Command::List => controller.toggle_playlist_panel(),
            Command::Fail => controller.primitive_mut().inject_failure(INJECTED_FAILURE),
            Command::Dismiss => controller.dismiss_notice(),
            Command::Tick(_) | Command::Status | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Let simulated time pass, following auto-advance across track ends
    fn tick(&mut self, secs: f64) {
        let mut remaining = secs;
        while remaining > 0.0 {
            let duration = self.controller.current_track().duration_secs;
            remaining = self
                .controller
                .primitive_mut()
                .advance(remaining, duration);
            self.pump();

            if !self.controller.primitive().is_playing() {
                break;
            }
        }
    }

    /// Deliver queued primitive notifications in emission order
    fn pump(&mut self) {
        while let Some(event) = self.controller.primitive_mut().poll_event() {
            if let Err(e) = self.controller.handle_event(event) {
                // Already recovered and surfaced through the notice
                debug!("Primitive notification reported: {}", e);
            }
        }

        for event in self.controller.drain_events() {
            if event.is_notable() {
                debug!("Controller event: {:?}", event);
            }
        }
    }
}

/// Read commands from `input` until it ends or `quit`, rendering to `output`
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, output: &mut W) -> Result<()> {
    write!(output, "{}", session.render())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };

        match session.execute(&command) {
            Ok(Flow::Quit) => {
                info!("Session ended by user");
                break;
            }
            Ok(Flow::Continue) => {
                if command == Command::Help {
                    writeln!(output, "{}", HELP)?;
                } else {
                    write!(output, "{}", session.render())?;
                }
            }
            Err(e) if e.is_recoverable() => {
                warn!("Command {:?} failed: {}", command, e);
                writeln!(output, "error: {}", e)?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
