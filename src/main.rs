//! Command-line entry point.

mod cli;
mod commands;
mod config;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::Cli::parse();
    let settings = config::Settings::load().into_diagnostic()?;
    match cli.command {
        cli::Command::Convert(args) => commands::convert::run(args, &settings),
        cli::Command::List(args) => commands::list::run(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).without_time().init();
}
