//! # Transmission CLI
//!
//! ## Usage
//!
//! ```sh,ignore
//! cargo run --release --bin transmission-cli -- --address localhost:9091 --list
//! ```

use std::{io, process::ExitCode};

use clap::Parser;
use thiserror as _;
use tracing as _;
use tracing_subscriber::EnvFilter;
use transmission_rpc_client as _;
use transmission_rpc_types as _;

use transmission_cli::{Cli, execute, report};

/// Initializes the tracing subscriber. Logs go to stderr so listing output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let result = execute(&cli, &mut io::stdout().lock()).await;
    report(result, &mut io::stderr())
}
