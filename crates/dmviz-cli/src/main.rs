//! dmviz CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use dmviz_cli::{Args, error_adapter};

/// Exit status for unusable input, configuration or I/O failures.
const EXIT_FAILURE: i32 = 1;
/// Exit status for an unknown or ambiguous visualizer name.
const EXIT_USAGE: i32 = 2;

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting dmviz");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = dmviz_cli::run(&args) {
        eprintln!("{}", error_adapter::render(&err));
        process::exit(if err.is_usage() { EXIT_USAGE } else { EXIT_FAILURE });
    }

    info!("Completed successfully");
}
