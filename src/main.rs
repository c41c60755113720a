use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod audio;
mod config;
mod display;
mod error;
mod library;
mod lyrics;
mod marquee;
mod mpris;
mod runtime;
mod session;

/// Play a music library and stream synced lyrics into MPRIS metadata.
#[derive(Debug, Parser)]
#[command(name = "lyricast", version, about)]
struct Cli {
    /// Music directory to scan (defaults to the current directory).
    dir: Option<PathBuf>,

    /// Track to start with, 1-based in library order.
    #[arg(long, value_name = "N")]
    track: Option<usize>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let opts = runtime::RunOptions {
        dir: cli.dir,
        track: cli.track,
        config: cli.config,
    };

    if cli.print_config {
        let settings = runtime::load_settings(opts.config_path().as_deref());
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    runtime::run(opts)
}
