//! Transmission RPC client implementation.

use std::{
    fmt,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use mosaic_transmission_types::{
    BlocklistUpdate, FreeSpace, PortTest, RpcError, SessionStats, Torrent, TorrentIds,
    TorrentList,
};

use crate::{
    config::ClientConfig,
    conversions::{added_torrent, decode, into_arguments, validate_fields},
    methods::{DEFAULT_TORRENT_FIELDS, FAST_FIELDS, FILE_FIELDS, Method, PEER_FIELDS},
    session::{RequestEnvelope, Session},
    transport::{HttpTransport, Transport},
};


/// `ids` value selecting torrents that changed recently.
const RECENTLY_ACTIVE: &str = "recently-active";

/// TransmissionClient talks to a Transmission daemon over its JSON RPC protocol.
///
/// Calls may be issued concurrently; they share the session id negotiated with the daemon.
pub struct TransmissionClient<T: Transport = HttpTransport> {
    session: Session<T>,
    next_tag: AtomicU64,
}

impl<T: Transport> fmt::Debug for TransmissionClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmissionClient")
            .field("url", &self.session.url().as_str())
            .finish_non_exhaustive()
    }
}

impl TransmissionClient {
    /// Create a new TransmissionClient using the `reqwest` transport.
    ///
    /// No request is sent until the first call: the session id is negotiated lazily.
    pub fn new(config: &ClientConfig) -> Result<Self, RpcError> {
        Self::with_transport(config, HttpTransport::default())
    }

    /// Create a new TransmissionClient from a full RPC URL, e.g.
    /// `http://localhost:9091/transmission/rpc`.
    pub fn try_from_url(rpc_url: &str) -> Result<Self, RpcError> {
        Self::new(&ClientConfig::from_url(rpc_url)?)
    }
}

impl<T: Transport> TransmissionClient<T> {
    /// Create a TransmissionClient with a custom transport implementation.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, RpcError> {
        let url = config.url()?;
        debug!("Using Transmission RPC at {}", url);
        Ok(Self {
            session: Session::new(transport, url, config.authorization()?),
            next_tag: AtomicU64::new(1),
        })
    }

    /// The RPC endpoint this client talks to.
    pub fn url(&self) -> &Url {
        self.session.url()
    }

    /// The session id currently held, if one has been negotiated.
    pub async fn session_token(&self) -> Option<String> {
        self.session.token().await
    }

    /// Sends one RPC request and returns the `arguments` of the success response.
    ///
    /// Arguments of methods with a field whitelist are validated before anything is sent.
    pub async fn call(
        &self,
        method: Method,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Map<String, Value>, RpcError> {
        if let Some(arguments) = &arguments {
            validate_fields(method, arguments)?;
        }

        let tag = self.next_tag.fetch_add(1, Ordering::Relaxed);
        let envelope = RequestEnvelope {
            method,
            arguments,
            tag,
        };
        debug!(%method, tag, "Sending request");
        let response = self.session.send(&envelope).await?;

        if let Some(echoed) = response.tag.filter(|echoed| *echoed != tag) {
            return Err(RpcError::Protocol(format!(
                "response tag {echoed} does not match request tag {tag}"
            )));
        }
        Ok(response.arguments)
    }

    /// Sets torrent properties. `options` must serialize to an object whose keys are all
    /// settable through `torrent-set`.
    pub async fn set<S>(
        &self,
        ids: impl Into<TorrentIds>,
        options: &S,
    ) -> Result<Map<String, Value>, RpcError>
    where
        S: Serialize + ?Sized,
    {
        let ids = ids.into();
        let options = into_arguments(Method::TorrentSet, options)?;
        debug!("Setting {options:?} on torrents {ids:?}");

        let mut arguments = ids_argument(ids);
        arguments.extend(options);
        self.call(Method::TorrentSet, Some(arguments)).await
    }

    /// Alias for [`Self::add_url`].
    pub async fn add<S>(&self, url: &str, options: &S) -> Result<Torrent, RpcError>
    where
        S: Serialize + ?Sized,
    {
        self.add_url(url, options).await
    }

    /// Adds a torrent from a URL or magnet link the daemon can fetch.
    pub async fn add_url<S>(&self, url: &str, options: &S) -> Result<Torrent, RpcError>
    where
        S: Serialize + ?Sized,
    {
        debug!("Adding torrent from URL: {}", url);
        self.add_source("filename", url.to_owned(), options).await
    }

    /// Adds a torrent from the base64 encoded contents of a torrent file.
    pub async fn add_base64<S>(&self, metainfo: &str, options: &S) -> Result<Torrent, RpcError>
    where
        S: Serialize + ?Sized,
    {
        self.add_source("metainfo", metainfo.to_owned(), options)
            .await
    }

    /// Adds a torrent from a local torrent file.
    pub async fn add_file<S>(
        &self,
        path: impl AsRef<Path>,
        options: &S,
    ) -> Result<Torrent, RpcError>
    where
        S: Serialize + ?Sized,
    {
        let path = path.as_ref();
        debug!("Adding torrent from file: {}", path.display());
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| RpcError::FileSystem(format!("{}: {e}", path.display())))?;
        self.add_source("metainfo", BASE64.encode(contents), options)
            .await
    }

    async fn add_source<S>(
        &self,
        key: &str,
        source: String,
        options: &S,
    ) -> Result<Torrent, RpcError>
    where
        S: Serialize + ?Sized,
    {
        let mut arguments = Map::new();
        arguments.insert(key.to_owned(), Value::String(source));
        arguments.extend(into_arguments(Method::TorrentAdd, options)?);

        let response = self.call(Method::TorrentAdd, Some(arguments)).await?;
        let torrent = added_torrent(response)?;
        debug!("Added {torrent:?}");
        Ok(torrent)
    }

    /// Removes torrents, optionally deleting their downloaded data.
    pub async fn remove(
        &self,
        ids: impl Into<TorrentIds>,
        delete_local_data: bool,
    ) -> Result<Map<String, Value>, RpcError> {
        let ids = ids.into();
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        let mut arguments = ids_argument(ids);
        arguments.insert("delete-local-data".into(), Value::Bool(delete_local_data));
        self.call(Method::TorrentRemove, Some(arguments)).await
    }

    /// Points torrents at a new location. With `move_data` the daemon moves the data there,
    /// otherwise it looks for the data at the new location.
    pub async fn move_torrent(
        &self,
        ids: impl Into<TorrentIds>,
        location: &str,
        move_data: bool,
    ) -> Result<Map<String, Value>, RpcError> {
        let mut arguments = ids_argument(ids.into());
        arguments.insert("location".into(), Value::String(location.to_owned()));
        arguments.insert("move".into(), Value::Bool(move_data));
        self.call(Method::TorrentSetLocation, Some(arguments)).await
    }

    /// Renames a file or folder. `path` is relative to the torrent's root folder.
    pub async fn rename(
        &self,
        ids: impl Into<TorrentIds>,
        path: &str,
        name: &str,
    ) -> Result<Map<String, Value>, RpcError> {
        let mut arguments = ids_argument(ids.into());
        arguments.insert("path".into(), Value::String(path.to_owned()));
        arguments.insert("name".into(), Value::String(name.to_owned()));
        self.call(Method::TorrentRenamePath, Some(arguments)).await
    }

    /// Gets torrents. `None` (or an empty id list) selects every torrent; an empty field list
    /// requests the default fields.
    pub async fn get(
        &self,
        ids: Option<TorrentIds>,
        fields: &[&str],
    ) -> Result<TorrentList, RpcError> {
        let fields = if fields.is_empty() {
            DEFAULT_TORRENT_FIELDS
        } else {
            fields
        };
        let mut arguments = Map::new();
        arguments.insert("fields".into(), json!(fields));
        if let Some(ids) = ids.filter(|ids| !ids.is_empty()) {
            arguments.insert("ids".into(), json!(ids));
        }

        let response = self.call(Method::TorrentGet, Some(arguments)).await?;
        decode(Method::TorrentGet, response)
    }

    /// Gets every field of every torrent.
    pub async fn all(&self) -> Result<TorrentList, RpcError> {
        self.get(None, &[]).await
    }

    /// Gets torrents that changed recently, plus the ids of recently removed ones.
    pub async fn active(&self) -> Result<TorrentList, RpcError> {
        let mut arguments = Map::new();
        arguments.insert("fields".into(), json!(DEFAULT_TORRENT_FIELDS));
        arguments.insert("ids".into(), Value::String(RECENTLY_ACTIVE.into()));
        let response = self.call(Method::TorrentGet, Some(arguments)).await?;
        decode(Method::TorrentGet, response)
    }

    /// Gets peer information.
    pub async fn peers(&self, ids: impl Into<TorrentIds>) -> Result<TorrentList, RpcError> {
        self.get(Some(ids.into()), PEER_FIELDS).await
    }

    /// Gets file information.
    pub async fn files(&self, ids: impl Into<TorrentIds>) -> Result<TorrentList, RpcError> {
        self.get(Some(ids.into()), FILE_FIELDS).await
    }

    /// Gets progress and timing information only.
    pub async fn fast(&self, ids: impl Into<TorrentIds>) -> Result<TorrentList, RpcError> {
        self.get(Some(ids.into()), FAST_FIELDS).await
    }

    /// Starts torrents.
    pub async fn start(&self, ids: impl Into<TorrentIds>) -> Result<Map<String, Value>, RpcError> {
        self.call_with_ids(Method::TorrentStart, ids.into()).await
    }

    /// Starts every torrent.
    pub async fn start_all(&self) -> Result<Map<String, Value>, RpcError> {
        self.call(Method::TorrentStart, None).await
    }

    /// Starts torrents, bypassing the download queue.
    pub async fn start_now(
        &self,
        ids: impl Into<TorrentIds>,
    ) -> Result<Map<String, Value>, RpcError> {
        self.call_with_ids(Method::TorrentStartNow, ids.into()).await
    }

    /// Stops torrents.
    pub async fn stop(&self, ids: impl Into<TorrentIds>) -> Result<Map<String, Value>, RpcError> {
        self.call_with_ids(Method::TorrentStop, ids.into()).await
    }

    /// Stops every torrent.
    pub async fn stop_all(&self) -> Result<Map<String, Value>, RpcError> {
        self.call(Method::TorrentStop, None).await
    }

    /// Verifies the downloaded data of torrents.
    pub async fn verify(&self, ids: impl Into<TorrentIds>) -> Result<Map<String, Value>, RpcError> {
        self.call_with_ids(Method::TorrentVerify, ids.into()).await
    }

    /// Asks the trackers of torrents for more peers.
    pub async fn reannounce(
        &self,
        ids: impl Into<TorrentIds>,
    ) -> Result<Map<String, Value>, RpcError> {
        self.call_with_ids(Method::TorrentReannounce, ids.into())
            .await
    }

    /// Gets the session settings.
    pub async fn session(&self) -> Result<Map<String, Value>, RpcError> {
        self.call(Method::SessionGet, None).await
    }

    /// Changes session settings. `settings` must serialize to an object whose keys are all
    /// settable through `session-set`.
    pub async fn session_set<S>(&self, settings: &S) -> Result<Map<String, Value>, RpcError>
    where
        S: Serialize + ?Sized,
    {
        let settings = into_arguments(Method::SessionSet, settings)?;
        debug!("Changing session settings {settings:?}");
        self.call(Method::SessionSet, Some(settings)).await
    }

    /// Gets session statistics.
    pub async fn session_stats(&self) -> Result<SessionStats, RpcError> {
        let response = self.call(Method::SessionStats, None).await?;
        let stats = decode(Method::SessionStats, response)?;
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    /// Gets the free space in a directory on the daemon's host.
    pub async fn free_space(&self, path: &str) -> Result<FreeSpace, RpcError> {
        let mut arguments = Map::new();
        arguments.insert("path".into(), Value::String(path.to_owned()));
        let response = self.call(Method::FreeSpace, Some(arguments)).await?;
        decode(Method::FreeSpace, response)
    }

    /// Checks whether the daemon's peer port is reachable from the outside.
    pub async fn port_test(&self) -> Result<PortTest, RpcError> {
        let response = self.call(Method::PortTest, None).await?;
        decode(Method::PortTest, response)
    }

    /// Refreshes the daemon's blocklist.
    pub async fn blocklist_update(&self) -> Result<BlocklistUpdate, RpcError> {
        let response = self.call(Method::BlocklistUpdate, None).await?;
        decode(Method::BlocklistUpdate, response)
    }

    async fn call_with_ids(
        &self,
        method: Method,
        ids: TorrentIds,
    ) -> Result<Map<String, Value>, RpcError> {
        debug!("{method} on torrents {ids:?}");
        self.call(method, Some(ids_argument(ids))).await
    }
}

fn ids_argument(ids: TorrentIds) -> Map<String, Value> {
    let mut arguments = Map::new();
    arguments.insert("ids".into(), json!(ids));
    arguments
}
