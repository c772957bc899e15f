//! Binary crate for the `suntimes` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Logging setup and human-friendly output

use clap::Parser;
use std::{
    io::IsTerminal,
    process::ExitCode,
};
use suntimes_core::Palette;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let palette =
                if std::io::stderr().is_terminal() { Palette::ansi() } else { Palette::plain() };
            eprintln!("{}Error:{} {err:#}", palette.warning, palette.reset);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `--verbose`; the default only shows warnings.
fn init_tracing(verbose: bool) {
    let default = if verbose { "suntimes_core=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
