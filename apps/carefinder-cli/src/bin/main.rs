use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use carefinder_cli::args::Cli;
use carefinder_cli::run::{run, RunContext};
use carefinder_cli::sink::LoggingSink;
use carefinder_core::clock::SystemClock;
use carefinder_core::config::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;

    let ctx = RunContext { settings: &settings, clock: &SystemClock, sink: &LoggingSink };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &ctx, &mut out)
}
