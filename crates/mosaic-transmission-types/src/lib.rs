//! # Mosaic Transmission Types
//!
//! This crate defines the types shared by the Transmission RPC client and its front ends:
//! the error taxonomy, torrent identifiers, the torrent lifecycle state and the typed views
//! of the daemon's responses.

use std::time::Duration;

use thiserror::Error;

mod ids;
mod responses;
mod status;

pub use ids::{TorrentIds, TorrentRef};
pub use responses::{
    BlocklistUpdate, FreeSpace, PortTest, SessionStats, StatsDetails, Torrent, TorrentList,
};
pub use status::TorrentStatus;

/// Failures below the RPC protocol: the daemon could not be reached, or it answered with
/// something that is not a Transmission response.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The daemon rejected the configured credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The daemon answered with an unexpected HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body is not a valid response envelope.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// Network or HTTP-layer failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The daemon was reachable but reported an application-level failure.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The caller supplied arguments the daemon would not accept. Raised before any request
    /// is sent.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// The requested torrent is not known to the daemon.
    #[error("no torrent found for id {0}")]
    NotFound(TorrentRef),

    /// Waiting for a torrent state took longer than the caller allowed.
    #[error("timed out after {0:?} waiting for torrent state")]
    Timeout(Duration),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),

    /// The client configuration cannot be turned into a valid request target.
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_display_through_rpc_error() {
        let err: RpcError = TransportError::Status {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(err.to_string(), "unexpected HTTP status 500: boom");
    }

    #[test]
    fn not_found_names_the_torrent() {
        let err = RpcError::NotFound(TorrentRef::Id(42));
        assert_eq!(err.to_string(), "no torrent found for id 42");

        let err = RpcError::NotFound(TorrentRef::Hash("deadbeef".into()));
        assert_eq!(err.to_string(), "no torrent found for id deadbeef");
    }
}
