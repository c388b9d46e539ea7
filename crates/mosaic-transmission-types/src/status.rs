//! Torrent lifecycle state as reported by the daemon's `status` field.

use std::{fmt, str::FromStr};

use crate::RpcError;

/// One of the eight phases a torrent can be in. The daemon reports it as an integer ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TorrentStatus {
    /// Not downloading or seeding.
    Stopped = 0,
    /// Queued for a local data check.
    CheckWait = 1,
    /// Checking local data.
    Check = 2,
    /// Queued for download.
    DownloadWait = 3,
    /// Downloading.
    Download = 4,
    /// Queued for seeding.
    SeedWait = 5,
    /// Seeding.
    Seed = 6,
    /// No peers could be reached.
    Isolated = 7,
}

impl TorrentStatus {
    /// All states, indexed by ordinal.
    pub const ALL: [TorrentStatus; 8] = [
        TorrentStatus::Stopped,
        TorrentStatus::CheckWait,
        TorrentStatus::Check,
        TorrentStatus::DownloadWait,
        TorrentStatus::Download,
        TorrentStatus::SeedWait,
        TorrentStatus::Seed,
        TorrentStatus::Isolated,
    ];

    /// The wire ordinal of this state.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Maps a wire ordinal to a state. Ordinals outside `0..=7` are a protocol error.
    pub fn from_ordinal(ordinal: i64) -> Result<Self, RpcError> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| RpcError::Protocol(format!("unknown torrent status {ordinal}")))
    }

    /// The canonical upper-case name, e.g. `DOWNLOAD_WAIT`.
    pub const fn name(self) -> &'static str {
        match self {
            TorrentStatus::Stopped => "STOPPED",
            TorrentStatus::CheckWait => "CHECK_WAIT",
            TorrentStatus::Check => "CHECK",
            TorrentStatus::DownloadWait => "DOWNLOAD_WAIT",
            TorrentStatus::Download => "DOWNLOAD",
            TorrentStatus::SeedWait => "SEED_WAIT",
            TorrentStatus::Seed => "SEED",
            TorrentStatus::Isolated => "ISOLATED",
        }
    }
}

impl fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TorrentStatus {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RpcError::Validation(format!("unknown torrent status name {s:?}")))
    }
}

impl TryFrom<i64> for TorrentStatus {
    type Error = RpcError;

    fn try_from(ordinal: i64) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal)
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        i64::from(status.ordinal())
    }
}
