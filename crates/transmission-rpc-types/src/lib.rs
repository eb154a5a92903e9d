//! # Transmission RPC Types
//!
//! This crate defines the data model, error type and operation trait shared by the
//! Transmission RPC client and its command-line front-end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransmissionError {
    /// The daemon address could not be turned into a valid RPC URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Network-related errors (connection failures, timeouts, truncated bodies, etc.)
    #[error("transport error: {0}")]
    Transport(String),

    /// The daemon answered 409 without a usable session id.
    #[error("session handshake failed: {0}")]
    Handshake(String),

    /// The request could not be encoded or the response body is not a valid envelope.
    #[error("decode error: {0}")]
    Decode(String),

    /// The daemon answered with a result other than `success`.
    /// Displays as the daemon's result string, verbatim.
    #[error("{0}")]
    Rpc(String),
}

/// Operations exposed by a Transmission RPC client.
///
/// Mutating operations given an empty id set return `Ok(())` without contacting the daemon,
/// since an absent id list addresses every torrent.
#[allow(async_fn_in_trait)]
pub trait TorrentRpc {
    /// List all torrents, in the order the daemon reports them.
    async fn list_all(&self) -> Result<Vec<Torrent>, TransmissionError>;
    /// Start torrents, respecting the daemon's download queue.
    async fn start(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Start torrents immediately, bypassing the download queue.
    async fn start_now(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Stop torrents.
    async fn stop(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Queue torrents for a local data verification.
    async fn verify(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Ask the trackers for more peers.
    async fn reannounce(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Remove torrents, keeping their downloaded data on disk.
    async fn remove(&self, ids: &[i64]) -> Result<(), TransmissionError>;
    /// Remove torrents and delete their downloaded data.
    async fn remove_and_delete(&self, ids: &[i64]) -> Result<(), TransmissionError>;

    /// [`TorrentRpc::start`] for previously listed torrents.
    async fn start_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.start(&torrent_ids(torrents)).await
    }

    /// [`TorrentRpc::start_now`] for previously listed torrents.
    async fn start_now_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.start_now(&torrent_ids(torrents)).await
    }

    /// [`TorrentRpc::stop`] for previously listed torrents.
    async fn stop_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.stop(&torrent_ids(torrents)).await
    }

    /// [`TorrentRpc::verify`] for previously listed torrents.
    async fn verify_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.verify(&torrent_ids(torrents)).await
    }

    /// [`TorrentRpc::reannounce`] for previously listed torrents.
    async fn reannounce_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.reannounce(&torrent_ids(torrents)).await
    }

    /// [`TorrentRpc::remove`] for previously listed torrents.
    async fn remove_torrents(&self, torrents: &[Torrent]) -> Result<(), TransmissionError> {
        self.remove(&torrent_ids(torrents)).await
    }
}

/// Projects the ids of the given torrents, preserving their order.
pub fn torrent_ids(torrents: &[Torrent]) -> Vec<i64> {
    torrents.iter().map(|t| t.id).collect()
}

/// Status codes reported in [`Torrent::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentStatus {
    /// Paused.
    Paused,
    /// Queued for a local data check.
    CheckWait,
    /// Checking local data.
    Check,
    /// Downloading.
    Download,
    /// Seeding.
    Seed,
    /// Stopped.
    Stopped,
}

impl TorrentStatus {
    /// Maps a raw status code, returning `None` for codes this client does not know.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Paused),
            1 => Some(Self::CheckWait),
            2 => Some(Self::Check),
            4 => Some(Self::Download),
            8 => Some(Self::Seed),
            16 => Some(Self::Stopped),
            _ => None,
        }
    }

    /// The raw status code.
    pub fn code(self) -> i64 {
        match self {
            Self::Paused => 0,
            Self::CheckWait => 1,
            Self::Check => 2,
            Self::Download => 4,
            Self::Seed => 8,
            Self::Stopped => 16,
        }
    }
}

// Field names and shapes follow the Transmission RPC schema. Every field defaults when
// the daemon leaves it out, which is the case for any field that was not requested.

/// One file of a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct File {
    pub name: String,

    pub bytes_completed: i64,

    pub length: i64,
}

/// Per-file progress and download settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FileStats {
    pub bytes_completed: i64,

    pub wanted: bool,

    pub priority: i64,
}

/// A connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,

    pub client_name: String,

    pub client_is_choked: bool,

    pub client_is_interested: bool,

    pub flag_str: String,

    pub is_downloading_from: bool,

    pub is_encrypted: bool,

    pub is_incoming: bool,

    pub is_uploading_to: bool,

    #[serde(rename = "isUTP")]
    pub is_utp: bool,

    pub port: i64,

    pub progress: f64,

    pub rate_to_client: i64,

    pub rate_to_peer: i64,
}

/// Where the connected peers were discovered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeersFrom {
    pub from_cache: i64,

    pub from_dht: i64,

    pub from_incoming: i64,

    pub from_lpd: i64,

    pub from_ltep: i64,

    pub from_pex: i64,

    pub from_tracker: i64,
}

/// A tracker configured for a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,

    pub id: i64,

    pub scrape: String,

    pub tier: i64,
}

/// Announce and scrape statistics of a tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub announce: String,

    pub host: String,

    pub id: i64,

    pub tier: i64,

    pub last_announce_result: String,

    pub last_announce_time: i64,

    pub last_announce_succeeded: bool,

    pub leecher_count: i64,

    pub seeder_count: i64,

    pub next_announce_time: i64,
}

/// Snapshot of a torrent as reported by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Torrent {
    pub activity_date: i64,

    pub added_date: i64,

    pub bandwidth_priority: i64,

    pub comment: String,

    pub corrupt_ever: i64,

    pub creator: String,

    pub date_created: i64,

    pub desired_available: i64,

    pub done_date: i64,

    pub download_dir: String,

    pub downloaded_ever: i64,

    pub download_limit: i64,

    pub download_limited: bool,

    pub error: i64,

    pub error_string: String,

    pub eta: i64,

    pub eta_idle: i64,

    pub files: Vec<File>,

    pub file_stats: Vec<FileStats>,

    pub hash_string: String,

    pub have_unchecked: i64,

    pub have_valid: i64,

    pub honors_session_limits: bool,

    pub id: i64,

    pub is_finished: bool,

    pub is_private: bool,

    pub is_stalled: bool,

    pub left_until_done: i64,

    pub magnet_link: String,

    pub manual_announce_time: i64,

    pub max_connected_peers: i64,

    pub metadata_percent_complete: f64,

    pub name: String,

    pub peer_limit: i64,

    pub peers: Vec<Peer>,

    pub peers_connected: i64,

    pub peers_from: PeersFrom,

    pub peers_getting_from_us: i64,

    pub peers_sending_to_us: i64,

    pub percent_done: f64,

    /// Base64 encoded bitfield of the pieces we have.
    pub pieces: String,

    pub piece_count: i64,

    pub piece_size: i64,

    pub priorities: Vec<i64>,

    pub queue_position: i64,

    /// Bytes per second.
    pub rate_download: i64,

    /// Bytes per second.
    pub rate_upload: i64,

    pub recheck_progress: f64,

    pub seconds_downloading: i64,

    pub seconds_seeding: i64,

    pub seed_idle_limit: i64,

    pub seed_idle_mode: i64,

    pub seed_ratio_limit: f64,

    pub seed_ratio_mode: i64,

    pub size_when_done: i64,

    pub start_date: i64,

    pub status: i64,

    pub trackers: Vec<Tracker>,

    pub tracker_stats: Vec<TrackerStat>,

    pub total_size: i64,

    pub torrent_file: String,

    pub uploaded_ever: i64,

    pub upload_limit: i64,

    pub upload_limited: bool,

    pub upload_ratio: f64,

    pub wanted: Vec<i64>,

    pub webseeds: Vec<String>,

    pub webseeds_sending_to_us: i64,
}

impl Torrent {
    /// The status as a [`TorrentStatus`], if the code is known.
    pub fn status_kind(&self) -> Option<TorrentStatus> {
        TorrentStatus::from_code(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torrent_defaults_missing_fields() {
        let torrent: Torrent =
            serde_json::from_str(r#"{"id":7,"name":"debian.iso","status":4,"percentDone":0.25}"#)
                .unwrap();

        assert_eq!(torrent.id, 7);
        assert_eq!(torrent.name, "debian.iso");
        assert_eq!(torrent.status_kind(), Some(TorrentStatus::Download));
        assert_eq!(torrent.percent_done, 0.25);
        assert!(torrent.files.is_empty());
        assert_eq!(torrent.peers_from, PeersFrom::default());
        assert_eq!(
            Torrent {
                id: 7,
                name: "debian.iso".into(),
                status: 4,
                percent_done: 0.25,
                ..Default::default()
            },
            torrent
        );
    }

    #[test]
    fn torrent_nested_records() {
        let torrent: Torrent = serde_json::from_str(
            r#"{
                "id": 1,
                "files": [{"name": "a/b.txt", "bytesCompleted": 10, "length": 20}],
                "fileStats": [{"bytesCompleted": 10, "wanted": true, "priority": -1}],
                "peers": [{"address": "10.0.0.2", "port": 51413, "isUTP": true}],
                "trackers": [{"announce": "http://t/announce", "id": 0, "tier": 0}],
                "webseeds": ["http://mirror/"],
                "unknownField": 42
            }"#,
        )
        .unwrap();

        assert_eq!(torrent.files[0].name, "a/b.txt");
        assert_eq!(torrent.files[0].length, 20);
        assert!(torrent.file_stats[0].wanted);
        assert_eq!(torrent.file_stats[0].priority, -1);
        assert!(torrent.peers[0].is_utp);
        assert_eq!(torrent.peers[0].port, 51413);
        assert_eq!(torrent.trackers[0].announce, "http://t/announce");
        assert_eq!(torrent.webseeds, vec!["http://mirror/".to_string()]);
    }

    #[test]
    fn status_codes() {
        for code in [0, 1, 2, 4, 8, 16] {
            let status = TorrentStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(TorrentStatus::from_code(3), None);
        assert_eq!(TorrentStatus::from_code(16), Some(TorrentStatus::Stopped));
    }

    #[test]
    fn rpc_error_displays_daemon_result_verbatim() {
        let err = TransmissionError::Rpc("duplicate torrent".into());
        assert_eq!(err.to_string(), "duplicate torrent");
    }

    #[test]
    fn ids_preserve_order() {
        let torrents = [3, 1, 2].map(|id| Torrent {
            id,
            ..Default::default()
        });
        assert_eq!(torrent_ids(&torrents), vec![3, 1, 2]);
        assert!(torrent_ids(&[]).is_empty());
    }
}
