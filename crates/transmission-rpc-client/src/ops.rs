//! Internal trait abstracting the HTTP transport of RPC calls.
//!
//! This module provides the [`RpcTransport`] trait which performs a single HTTP POST against
//! the daemon, enabling mocking of the session handshake in tests.

use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap},
};
use transmission_rpc_types::TransmissionError;
use url::Url;

use crate::config::Credentials;

/// Header carrying the CSRF session id, in both directions. Header names are case-insensitive.
pub(crate) const SESSION_ID_HEADER: &str = "x-transmission-session-id";

/// HTTP status the daemon answers with when the session id is missing or stale.
pub(crate) const CONFLICT: u16 = 409;

/// One POST to the RPC endpoint.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RpcRequest {
    pub(crate) url: Url,
    pub(crate) session_id: String,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) body: Vec<u8>,
}

/// The parts of an HTTP response the client looks at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RpcResponse {
    pub(crate) status: u16,
    /// Every value of the session id header, in order.
    pub(crate) session_ids: Vec<String>,
    pub(crate) body: Vec<u8>,
}

/// Internal trait that abstracts the HTTP transport.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait RpcTransport {
    async fn post_rpc(&self, request: RpcRequest) -> Result<RpcResponse, TransmissionError>;
}

impl RpcTransport for Client {
    async fn post_rpc(&self, request: RpcRequest) -> Result<RpcResponse, TransmissionError> {
        let mut builder = self
            .post(request.url)
            .header(SESSION_ID_HEADER, request.session_id)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body);
        if let Some(credentials) = request.credentials {
            builder = builder.basic_auth(credentials.username, Some(credentials.password));
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let session_ids = session_ids(response.headers());
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        Ok(RpcResponse {
            status,
            session_ids,
            body,
        })
    }
}

fn session_ids(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SESSION_ID_HEADER)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect()
}

fn transport_error(err: reqwest::Error) -> TransmissionError {
    TransmissionError::Transport(err.to_string())
}
