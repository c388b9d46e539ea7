//! # Transmission RPC client.
//!
//! usage:
//!
//! ```rust,ignore
//! use mosaic_transmission_rpc::{ClientConfig, TransmissionClient};
//! use mosaic_transmission_types::TorrentStatus;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::new(&ClientConfig::default())?;
//!     let torrent = client
//!         .add_file("path/to/file.torrent", &json!({ "download-dir": "/downloads" }))
//!         .await?;
//!     let id = torrent.id.ok_or("daemon did not return an id")?;
//!     client.set(id, &json!({ "uploadLimit": 100, "uploadLimited": true })).await?;
//!     let seeding = client.wait_for_state(id, TorrentStatus::Seed).await?;
//!     println!("Seeding: {:?}", seeding.name);
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod conversions;
mod methods;
mod poll;
mod session;
#[cfg(test)]
mod testutil;
mod transport;

pub use client::TransmissionClient;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT};
pub use methods::{DEFAULT_TORRENT_FIELDS, FAST_FIELDS, FILE_FIELDS, Method, PEER_FIELDS};
pub use poll::{DEFAULT_POLL_INTERVAL, PollOptions};
pub use session::SESSION_ID_HEADER;
pub use transport::{HttpResponse, HttpTransport, Transport};

// Only used by the integration tests.
#[cfg(test)]
use {httpmock as _, libc as _, tracing_subscriber as _};
