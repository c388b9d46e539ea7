//! The RPC methods this client speaks, and the argument fields the daemon accepts for them.
//!
//! The tables here are a versioned contract with the daemon's RPC protocol. They are not
//! derived from daemon responses and have to be kept in sync with the daemon out of band.

use std::fmt;

use serde::{Serialize, Serializer};

/// A logical RPC operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Start torrents.
    TorrentStart,
    /// Start torrents, bypassing the download queue.
    TorrentStartNow,
    /// Stop torrents.
    TorrentStop,
    /// Verify local data of torrents.
    TorrentVerify,
    /// Ask trackers for more peers.
    TorrentReannounce,
    /// Set torrent properties.
    TorrentSet,
    /// Add a torrent.
    TorrentAdd,
    /// Remove torrents.
    TorrentRemove,
    /// Move torrent data.
    TorrentSetLocation,
    /// Rename a file or folder of a torrent.
    TorrentRenamePath,
    /// Get torrent fields.
    TorrentGet,
    /// Get session settings.
    SessionGet,
    /// Set session settings.
    SessionSet,
    /// Get session statistics.
    SessionStats,
    /// Refresh the blocklist.
    BlocklistUpdate,
    /// Check whether the peer port is reachable.
    PortTest,
    /// Query free space in a directory.
    FreeSpace,
}

impl Method {
    /// The method name on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Method::TorrentStart => "torrent-start",
            Method::TorrentStartNow => "torrent-start-now",
            Method::TorrentStop => "torrent-stop",
            Method::TorrentVerify => "torrent-verify",
            Method::TorrentReannounce => "torrent-reannounce",
            Method::TorrentSet => "torrent-set",
            Method::TorrentAdd => "torrent-add",
            Method::TorrentRemove => "torrent-remove",
            Method::TorrentSetLocation => "torrent-set-location",
            Method::TorrentRenamePath => "torrent-rename-path",
            Method::TorrentGet => "torrent-get",
            Method::SessionGet => "session-get",
            Method::SessionSet => "session-set",
            Method::SessionStats => "session-stats",
            Method::BlocklistUpdate => "blocklist-update",
            Method::PortTest => "port-test",
            Method::FreeSpace => "free-space",
        }
    }

    /// The argument fields accepted by methods that take caller-supplied settings.
    ///
    /// `None` means the method has no whitelist. Its arguments are either built by the client
    /// itself or, for `torrent-add`, passed through to the daemon unchecked.
    pub const fn settable_fields(self) -> Option<&'static [&'static str]> {
        match self {
            Method::TorrentSet => Some(TORRENT_SET_FIELDS),
            Method::TorrentRemove => Some(TORRENT_REMOVE_FIELDS),
            Method::TorrentSetLocation => Some(TORRENT_LOCATION_FIELDS),
            Method::SessionSet => Some(SESSION_SET_FIELDS),
            Method::TorrentAdd
            | Method::TorrentStart
            | Method::TorrentStartNow
            | Method::TorrentStop
            | Method::TorrentVerify
            | Method::TorrentReannounce
            | Method::TorrentRenamePath
            | Method::TorrentGet
            | Method::SessionGet
            | Method::SessionStats
            | Method::BlocklistUpdate
            | Method::PortTest
            | Method::FreeSpace => None,
        }
    }

    /// Whether `field` may appear in the arguments of this method. Always `false` for methods
    /// without a whitelist.
    pub fn is_field_settable(self, field: &str) -> bool {
        self.settable_fields()
            .is_some_and(|fields| fields.contains(&field))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

const TORRENT_SET_FIELDS: &[&str] = &[
    "bandwidthPriority",
    "downloadLimit",
    "downloadLimited",
    "files-wanted",
    "files-unwanted",
    "honorsSessionLimits",
    "ids",
    "location",
    "peer-limit",
    "priority-high",
    "priority-low",
    "priority-normal",
    "seedRatioLimit",
    "seedRatioMode",
    "uploadLimit",
    "uploadLimited",
];

const TORRENT_REMOVE_FIELDS: &[&str] = &["ids", "delete-local-data"];

const TORRENT_LOCATION_FIELDS: &[&str] = &["location", "ids", "move"];

const SESSION_SET_FIELDS: &[&str] = &[
    "start-added-torrents",
    "alt-speed-down",
    "alt-speed-enabled",
    "alt-speed-time-begin",
    "alt-speed-time-enabled",
    "alt-speed-time-end",
    "alt-speed-time-day",
    "alt-speed-up",
    "blocklist-enabled",
    "dht-enabled",
    "encryption",
    "download-dir",
    "peer-limit-global",
    "peer-limit-per-torrent",
    "pex-enabled",
    "peer-port",
    "peer-port-random-on-start",
    "port-forwarding-enabled",
    "seedRatioLimit",
    "seedRatioLimited",
    "speed-limit-down",
    "speed-limit-down-enabled",
    "speed-limit-up",
    "speed-limit-up-enabled",
];

/// Fields requested by `torrent-get` when the caller does not name any.
pub const DEFAULT_TORRENT_FIELDS: &[&str] = &[
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
    "eta",
    "files",
    "fileStats",
    "hashString",
    "haveUnchecked",
    "haveValid",
    "honorsSessionLimits",
    "id",
    "isFinished",
    "isPrivate",
    "leftUntilDone",
    "magnetLink",
    "manualAnnounceTime",
    "maxConnectedPeers",
    "metadataPercentComplete",
    "name",
    "peer-limit",
    "peers",
    "peersConnected",
    "peersFrom",
    "peersGettingFromUs",
    "peersKnown",
    "peersSendingToUs",
    "percentDone",
    "pieces",
    "pieceCount",
    "pieceSize",
    "priorities",
    "rateDownload",
    "rateUpload",
    "recheckProgress",
    "seedIdleLimit",
    "seedIdleMode",
    "seedRatioLimit",
    "seedRatioMode",
    "sizeWhenDone",
    "startDate",
    "status",
    "trackers",
    "trackerStats",
    "totalSize",
    "torrentFile",
    "uploadedEver",
    "uploadLimit",
    "uploadLimited",
    "uploadRatio",
    "wanted",
    "webseeds",
    "webseedsSendingToUs",
];

/// Fields requested by [`crate::TransmissionClient::peers`].
pub const PEER_FIELDS: &[&str] = &["peers", "hashString", "id"];

/// Fields requested by [`crate::TransmissionClient::files`].
pub const FILE_FIELDS: &[&str] = &["files", "fileStats", "hashString", "id"];

/// Fields requested by [`crate::TransmissionClient::fast`]: progress and timing only.
pub const FAST_FIELDS: &[&str] = &[
    "id",
    "error",
    "errorString",
    "eta",
    "isFinished",
    "isStalled",
    "leftUntilDone",
    "metadataPercentComplete",
    "peersConnected",
    "peersGettingFromUs",
    "peersSendingToUs",
    "percentDone",
    "queuePosition",
    "rateDownload",
    "rateUpload",
    "recheckProgress",
    "seedRatioMode",
    "seedRatioLimit",
    "sizeWhenDone",
    "status",
    "trackers",
    "uploadedEver",
    "uploadRatio",
];
