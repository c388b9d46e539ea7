//! Typed views of the daemon's response arguments. Field names follow the Transmission RPC
//! protocol; fields this crate does not model are kept in the flattened `other` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RpcError, TorrentStatus};

/// A snapshot of a torrent as returned by `torrent-get`.
///
/// Which fields are present depends on the field list the caller asked for, so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_done: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_finished: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_download: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_upload: Option<i64>,

    /// Every other field the daemon returned.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Torrent {
    /// The lifecycle state, if `status` was requested. An unknown ordinal is a protocol error.
    pub fn lifecycle_state(&self) -> Result<Option<TorrentStatus>, RpcError> {
        self.status.map(TorrentStatus::from_ordinal).transpose()
    }

    /// Looks up a field that has no typed accessor, e.g. `peers` or `fileStats`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.other.get(name)
    }
}

/// The arguments of a `torrent-get` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentList {
    /// The matching torrents.
    #[serde(default)]
    pub torrents: Vec<Torrent>,

    /// Ids of recently removed torrents, only present for `recently-active` queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<i64>>,
}

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SessionStats {
    pub active_torrent_count: i64,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: i64,

    pub paused_torrent_count: i64,

    pub torrent_count: i64,

    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}

/// Free space available in a directory on the daemon's host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FreeSpace {
    /// The directory that was queried.
    pub path: String,
    /// Free space in bytes.
    pub size_bytes: i64,
}

/// Result of asking the daemon whether its peer port is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PortTest {
    /// Whether the peer port is open.
    pub port_is_open: bool,
}

/// Result of a blocklist refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BlocklistUpdate {
    /// Number of rules in the refreshed blocklist.
    pub blocklist_size: i64,
}
