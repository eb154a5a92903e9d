//! Transmission RPC client implementation.

use std::{
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicI64, Ordering},
    },
};

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, trace};
use url::Url;

use transmission_rpc_types::{Torrent, TorrentRpc, TransmissionError};

use crate::config::{ClientConfig, Credentials, authority, normalize_address};
use crate::envelope::{
    NoArguments, RequestEnvelope, ResponseEnvelope, RpcMethod, TorrentActionRequest,
    TorrentGetRequest, TorrentGetResponse,
};
use crate::fields::TorrentFields;
use crate::ops::{CONFLICT, RpcRequest, RpcResponse, RpcTransport};


/// TransmissionClient talks to a Transmission daemon over its JSON RPC endpoint.
///
/// The client keeps the session id handed out by the daemon and renews it transparently:
/// a call answered with `409 Conflict` is sent once more with the fresh id.
#[allow(private_bounds)]
pub struct TransmissionClient<T: RpcTransport = Client> {
    transport: T,
    url: Url,
    credentials: Option<Credentials>,
    fields: TorrentFields,
    session_id: Mutex<String>,
    next_tag: AtomicI64,
}

impl TransmissionClient {
    /// Create a new TransmissionClient for the given address.
    /// Credentials are only used when both the username and the password are non-empty.
    /// No request is sent until the first operation.
    pub fn try_new(
        address: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, TransmissionError> {
        Self::from_config(ClientConfig::new(address).with_credentials(username, password))
    }

    /// Create a new TransmissionClient from a full configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, TransmissionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            TransmissionError::Transport(format!("Failed to create HTTP client: {e}"))
        })?;

        Self::with_transport(http, config)
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TransmissionClient<T> {
    /// Create a TransmissionClient with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    pub(crate) fn with_transport(
        transport: T,
        config: ClientConfig,
    ) -> Result<Self, TransmissionError> {
        let address = normalize_address(&config.address);
        // The URL parser would read `http:///transmission/rpc` as host `transmission`.
        if authority(&address).is_empty() {
            return Err(TransmissionError::InvalidAddress(format!("{address}: missing host")));
        }
        let url = Url::parse(&address)
            .map_err(|e| TransmissionError::InvalidAddress(format!("{address}: {e}")))?;
        info!("Using {url} as Transmission address");

        Ok(Self {
            transport,
            url,
            credentials: config.credentials,
            fields: config.fields,
            session_id: Mutex::new(String::new()),
            next_tag: AtomicI64::new(1),
        })
    }

    /// The RPC endpoint this client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The fields requested when listing torrents.
    pub fn fields(&self) -> &TorrentFields {
        &self.fields
    }

    /// The session id attached to the next request. Empty until the daemon hands one out.
    pub fn session_id(&self) -> String {
        self.session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_session_id(&self, session_id: String) {
        *self.session_id.lock().unwrap_or_else(PoisonError::into_inner) = session_id;
    }

    fn request(&self, body: Vec<u8>) -> RpcRequest {
        RpcRequest {
            url: self.url.clone(),
            session_id: self.session_id(),
            credentials: self.credentials.clone(),
            body,
        }
    }

    /// Sends one RPC call, renewing the session id at most once.
    async fn call<A, R>(&self, method: RpcMethod, arguments: A) -> Result<R, TransmissionError>
    where
        A: Serialize,
        R: DeserializeOwned + Default,
    {
        let tag = self.next_tag.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_vec(&RequestEnvelope {
            method,
            tag,
            arguments,
        })
        .map_err(|e| TransmissionError::Decode(format!("Failed to encode request: {e}")))?;
        trace!("Request {tag}: {}", String::from_utf8_lossy(&body));

        let mut response = self.transport.post_rpc(self.request(body.clone())).await?;
        if response.status == CONFLICT {
            let session_id = renewed_session_id(&response)?;
            debug!("Session id renewed, retrying {method:?}");
            self.set_session_id(session_id);
            response = self.transport.post_rpc(self.request(body)).await?;
        }
        trace!(
            "Response {tag} (HTTP {}): {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        );

        let envelope: ResponseEnvelope<R> = serde_json::from_slice(&response.body)
            .map_err(|e| TransmissionError::Decode(format!("Invalid response envelope: {e}")))?;
        if envelope.tag.is_some_and(|t| t != tag) {
            debug!("Response tag {:?} does not match request tag {tag}", envelope.tag);
        }
        envelope.into_result()
    }

    async fn torrent_action(
        &self,
        method: RpcMethod,
        ids: &[i64],
        delete_local_data: Option<bool>,
    ) -> Result<(), TransmissionError> {
        if ids.is_empty() {
            debug!("No torrent ids given, skipping {method:?}");
            return Ok(());
        }
        debug!("Sending {method:?} for torrents {ids:?}");
        let _: NoArguments = self
            .call(
                method,
                TorrentActionRequest {
                    ids,
                    delete_local_data,
                },
            )
            .await?;
        debug!("{method:?} command sent");
        Ok(())
    }
}

/// Extracts the session id a 409 response hands out. Anything but exactly one value is fatal.
fn renewed_session_id(response: &RpcResponse) -> Result<String, TransmissionError> {
    match response.session_ids.as_slice() {
        [session_id] => Ok(session_id.clone()),
        [] => Err(TransmissionError::Handshake(
            "409 response without X-Transmission-Session-Id".into(),
        )),
        values => Err(TransmissionError::Handshake(format!(
            "409 response with {} X-Transmission-Session-Id values",
            values.len()
        ))),
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TorrentRpc for TransmissionClient<T> {
    async fn list_all(&self) -> Result<Vec<Torrent>, TransmissionError> {
        debug!("Listing torrents");
        let response: TorrentGetResponse = self
            .call(
                RpcMethod::TorrentGet,
                TorrentGetRequest {
                    fields: self.fields.names(),
                },
            )
            .await?;
        debug!("Listed {} torrents", response.torrents.len());

        Ok(response.torrents)
    }

    async fn start(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentStart, ids, None).await
    }

    async fn start_now(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentStartNow, ids, None)
            .await
    }

    async fn stop(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentStop, ids, None).await
    }

    async fn verify(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentVerify, ids, None).await
    }

    async fn reannounce(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentReannounce, ids, None)
            .await
    }

    async fn remove(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentRemove, ids, None).await
    }

    async fn remove_and_delete(&self, ids: &[i64]) -> Result<(), TransmissionError> {
        self.torrent_action(RpcMethod::TorrentRemove, ids, Some(true))
            .await
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> fmt::Debug for TransmissionClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmissionClient")
            .field("url", &self.url.as_str())
            .field("credentials", &self.credentials)
            .field("fields", &self.fields.names().len())
            .finish_non_exhaustive()
    }
}
