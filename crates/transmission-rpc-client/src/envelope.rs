//! Request and response envelopes of the Transmission RPC protocol.

use serde::{Deserialize, Serialize};
use transmission_rpc_types::{Torrent, TransmissionError};

/// The only `result` value that signals success.
pub(crate) const SUCCESS: &str = "success";

/// RPC methods used by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum RpcMethod {
    TorrentGet,
    TorrentStart,
    TorrentStartNow,
    TorrentStop,
    TorrentVerify,
    TorrentReannounce,
    TorrentRemove,
}

/// `{method, tag, arguments}`, built fresh for every call.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope<A> {
    pub(crate) method: RpcMethod,
    pub(crate) tag: i64,
    pub(crate) arguments: A,
}

/// `{result, tag, arguments}`. Failed calls usually carry no arguments.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<A> {
    pub(crate) result: String,
    #[serde(default)]
    pub(crate) tag: Option<i64>,
    #[serde(default)]
    pub(crate) arguments: Option<A>,
}

impl<A: Default> ResponseEnvelope<A> {
    /// The arguments, or the daemon's result string as an error.
    pub(crate) fn into_result(self) -> Result<A, TransmissionError> {
        if self.result != SUCCESS {
            return Err(TransmissionError::Rpc(self.result));
        }
        Ok(self.arguments.unwrap_or_default())
    }
}

/// Arguments of `torrent-get`. No ids means every torrent.
#[derive(Debug, Serialize)]
pub(crate) struct TorrentGetRequest<'a> {
    pub(crate) fields: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TorrentGetResponse {
    #[serde(default)]
    pub(crate) torrents: Vec<Torrent>,
}

/// Arguments of the lifecycle methods.
#[derive(Debug, Serialize)]
pub(crate) struct TorrentActionRequest<'a> {
    pub(crate) ids: &'a [i64],
    #[serde(rename = "delete-local-data", skip_serializing_if = "Option::is_none")]
    pub(crate) delete_local_data: Option<bool>,
}

/// Lifecycle methods answer with an empty arguments object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NoArguments {}
