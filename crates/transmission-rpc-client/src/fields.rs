//! Torrent field selection for `torrent-get`.
//!
//! [`DEFAULT_TORRENT_FIELDS`] and [`OMITTED_TORRENT_FIELDS`] together name every field of
//! [`Torrent`](transmission_rpc_types::Torrent). They are maintained by hand: the omitted
//! fields are expensive for the daemon to produce and are only requested on demand.

/// Fields requested by default.
pub const DEFAULT_TORRENT_FIELDS: &[&str] = &[
    "name",
    "id",
    "totalSize",
    "eta",
    "status",
    "percentDone",
    "activityDate",
    "addedDate",
    "bandwidthPriority",
    "comment",
    "corruptEver",
    "creator",
    "dateCreated",
    "desiredAvailable",
    "doneDate",
    "downloadDir",
    "downloadedEver",
    "downloadLimit",
    "downloadLimited",
    "error",
    "errorString",
    "etaIdle",
    "files",
    "fileStats",
    "hashString",
    "haveUnchecked",
    "haveValid",
    "honorsSessionLimits",
    "isFinished",
    "isPrivate",
    "isStalled",
    "leftUntilDone",
    "magnetLink",
    "manualAnnounceTime",
    "maxConnectedPeers",
    "metadataPercentComplete",
    "peerLimit",
    "pieces",
    "pieceCount",
    "pieceSize",
    "rateDownload",
    "rateUpload",
    "recheckProgress",
    "secondsDownloading",
    "secondsSeeding",
    "seedIdleLimit",
    "seedIdleMode",
    "seedRatioLimit",
    "seedRatioMode",
    "sizeWhenDone",
    "startDate",
    "torrentFile",
    "uploadedEver",
    "uploadLimit",
    "uploadLimited",
    "uploadRatio",
    "webseedsSendingToUs",
];

/// Fields of the torrent record left out of the default request.
pub const OMITTED_TORRENT_FIELDS: &[&str] = &[
    "peers",
    "peersConnected",
    "peersFrom",
    "peersGettingFromUs",
    "peersSendingToUs",
    "priorities",
    "queuePosition",
    "trackers",
    "trackerStats",
    "wanted",
    "webseeds",
];

/// The ordered set of field names sent with `torrent-get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFields {
    names: Vec<String>,
}

impl Default for TorrentFields {
    fn default() -> Self {
        Self::explicit(DEFAULT_TORRENT_FIELDS.iter().copied())
    }
}

impl TorrentFields {
    /// Every field of the torrent record, including the omitted ones.
    pub fn all() -> Self {
        Self::default().include_all(OMITTED_TORRENT_FIELDS.iter().copied())
    }

    /// Exactly the given fields, in order, without duplicates.
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: Vec::new() }.include_all(names)
    }

    /// Adds a field unless it is already selected.
    pub fn include(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
        self
    }

    /// Adds every given field that is not already selected.
    pub fn include_all<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |fields, name| fields.include(name))
    }

    /// Whether the field is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The selected field names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
