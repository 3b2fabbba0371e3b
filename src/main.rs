#![forbid(unsafe_code)]

mod cli;
mod config;
mod constants;
mod controller;
mod debounce;
mod error;
mod gui;
mod prefs;
mod registry;
mod snapshot;
mod style;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use config::AppConfig;

fn parse_level(name: &str) -> TraceLevel {
    match name.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Read before the subscriber exists; config warnings are not logged
    let config = AppConfig::load();

    // LOG_LEVEL wins over the config file
    let log_level = parse_level(
        &std::env::var("LOG_LEVEL").unwrap_or_else(|_| config.log_level.clone()),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!(command = ?cli.command, "Starting font tuner");
    cli::run(cli, &config)
}
