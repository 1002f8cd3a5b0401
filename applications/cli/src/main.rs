/// Cadence - terminal music player over a simulated audio device
use cadence_cli::{commands, playlist, CliConfig, Session};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence music player (simulated playback)", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Playlist file (TOML with [[tracks]] entries); built-in sample if omitted
    #[arg(short, long)]
    playlist: Option<PathBuf>,

    /// Seed for shuffle picks
    #[arg(long)]
    seed: Option<u64>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.player.shuffle_seed = Some(seed);
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let playlist = match &cli.playlist {
        Some(path) => playlist::load_playlist(path)?,
        None => playlist::sample_playlist()?,
    };
    tracing::info!("Loaded playlist with {} tracks", playlist.len());

    let mut session = Session::new(playlist, &config)?;

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => {
            println!("{}", commands::HELP);
            Box::new(io::stdin().lock())
        }
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    commands::run(&mut session, input, &mut output)?;

    Ok(())
}
