//! Client configuration and daemon address handling.

use std::{fmt, time::Duration};

use crate::fields::TorrentFields;

/// Path of the daemon's single RPC endpoint.
pub const RPC_PATH: &str = "/transmission/rpc";

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "localhost:9091";

/// Turns a daemon address into the full RPC endpoint address.
///
/// A missing `http://` or `https://` scheme (matched case-insensitively) is replaced by
/// `http://`, and the RPC path is appended unless the address already ends with it. Trailing
/// slashes after the scheme are dropped first.
///
/// ```rust,ignore
/// use transmission_rpc_client::normalize_address;
///
/// assert_eq!(normalize_address("localhost:9091"), "http://localhost:9091/transmission/rpc");
/// assert_eq!(normalize_address("https://host/transmission/rpc"), "https://host/transmission/rpc");
/// ```
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    let (scheme, rest) = split_scheme(address).unwrap_or(("http://", address));

    let rest = rest.trim_end_matches('/');
    if rest.ends_with(RPC_PATH) {
        format!("{scheme}{rest}")
    } else {
        format!("{scheme}{rest}{RPC_PATH}")
    }
}

/// Splits a leading `http://` or `https://` off the address, ignoring ASCII case.
fn split_scheme(address: &str) -> Option<(&str, &str)> {
    ["http://", "https://"].into_iter().find_map(|scheme| {
        address
            .get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|prefix| (prefix, &address[scheme.len()..]))
    })
}

/// The host and port part of a normalized address. Empty when the address names no host.
pub(crate) fn authority(address: &str) -> &str {
    let rest = split_scheme(address).map_or(address, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

/// HTTP Basic credentials for the daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The user name.
    pub username: String,
    /// The password.
    pub password: String,
}

impl Credentials {
    /// Returns credentials only when both parts are non-empty.
    pub fn from_parts(username: &str, password: &str) -> Option<Self> {
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the password.
        write!(f, "Credentials(username=\"{}\", password=<set>)", self.username)
    }
}

/// Configuration for a [`TransmissionClient`](crate::TransmissionClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Daemon address, normalized with [`normalize_address`] when the client is built.
    pub address: String,
    /// Basic authentication, sent with every request when present.
    pub credentials: Option<Credentials>,
    /// Fields requested when listing torrents.
    pub fields: TorrentFields,
    /// Timeout applied to each HTTP request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            credentials: None,
            fields: TorrentFields::default(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for the given address, without credentials.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Sets the credentials. They are dropped unless both parts are non-empty.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Credentials::from_parts(username, password);
        self
    }

    /// Sets the fields requested when listing torrents.
    pub fn with_fields(mut self, fields: TorrentFields) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
