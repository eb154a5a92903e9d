//! # Transmission RPC client.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::TransmissionClient;
//! use transmission_rpc_types::TorrentRpc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::try_new("localhost:9091", "", "")?;
//!     let torrents = client.list_all().await?;
//!     for torrent in &torrents {
//!         println!("{}: {}", torrent.id, torrent.name);
//!     }
//!     client.stop_torrents(&torrents).await?;
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod envelope;
mod fields;
mod ops;
#[cfg(test)]
mod testutil;

pub use client::TransmissionClient;
pub use config::{ClientConfig, Credentials, DEFAULT_ADDRESS, RPC_PATH, normalize_address};
pub use fields::{DEFAULT_TORRENT_FIELDS, OMITTED_TORRENT_FIELDS, TorrentFields};

// Only used by the integration tests.
#[cfg(test)]
use mockito as _;
#[cfg(test)]
use tracing_subscriber as _;
