//! # Transmission CLI
//!
//! Flag-driven front-end for [`transmission_rpc_client`]. Each invocation performs one action.
//!
//! ## Usage
//!
//! ```sh,ignore
//! transmission-cli --address localhost:9091 --list
//! transmission-cli --address localhost:9091 --stop=3
//! ```

use std::{
    io::{self, Write},
    process::ExitCode,
};

use dotenvy as _;
use thiserror::Error;
use tokio as _;
use tracing::debug;
use tracing_subscriber as _;
use transmission_rpc_client::TransmissionClient;
use transmission_rpc_types::{Torrent, TorrentRpc, TransmissionError};

mod cli;

pub use cli::{Action, Cli};

/// Error variants of a CLI run.
#[derive(Error, Debug)]
pub enum Error {
    /// The daemon call failed.
    #[error(transparent)]
    Rpc(#[from] TransmissionError),

    /// Writing the output failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Formats one listing line: id, status code, completion percentage and name.
pub fn format_torrent_line(torrent: &Torrent) -> String {
    format!(
        "{}: (Status {}) (Done: {:.2}) {}",
        torrent.id,
        torrent.status,
        torrent.percent_done * 100.0,
        torrent.name
    )
}

/// Performs the action against the daemon, writing listing output to `out`.
pub async fn run<C, W>(client: &C, action: Action, out: &mut W) -> Result<(), Error>
where
    C: TorrentRpc,
    W: Write,
{
    debug!("Running {action:?}");
    match action {
        Action::List => {
            for torrent in client.list_all().await? {
                writeln!(out, "{}", format_torrent_line(&torrent))?;
            }
        }
        Action::Start(id) => client.start(&[id]).await?,
        Action::StartNow(id) => client.start_now(&[id]).await?,
        Action::Stop(id) => client.stop(&[id]).await?,
        Action::Remove {
            id,
            delete_local_data: false,
        } => client.remove(&[id]).await?,
        Action::Remove {
            id,
            delete_local_data: true,
        } => client.remove_and_delete(&[id]).await?,
        Action::Verify(id) => client.verify(&[id]).await?,
        Action::Reannounce(id) => client.reannounce(&[id]).await?,
    }
    Ok(())
}

/// Runs the requested action against the configured daemon.
/// Without an action flag nothing happens and no client is built.
pub async fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Error> {
    let Some(action) = cli.action() else {
        debug!("No action requested");
        return Ok(());
    };

    let client = TransmissionClient::from_config(cli.client_config())?;
    run(&client, action, out).await
}

/// Maps a run's outcome to the process exit code, printing any error to `err`.
pub fn report<W: Write>(result: Result<(), Error>, err: &mut W) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "{e}");
            ExitCode::FAILURE
        }
    }
}
