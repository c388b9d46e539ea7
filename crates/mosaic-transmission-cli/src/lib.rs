//! # Mosaic Transmission CLI
//!
//! ## Usage
//!
//! ```sh,ignore
//! mosaic-transmission --url http://localhost:9091/transmission/rpc list
//! mosaic-transmission add ubuntu.torrent --download-dir /downloads
//! mosaic-transmission wait 7 seed --timeout-secs 3600
//! ```

use std::{path::Path, time::Duration};

use dotenvy as _;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tokio as _;
use tracing::debug;
use tracing_subscriber as _;

use mosaic_transmission_rpc::{PollOptions, TransmissionClient, Transport};
use mosaic_transmission_types::RpcError;

pub mod cli;

use cli::Command;

/// Error variants for [`execute`].
#[derive(Error, Debug)]
pub enum Error {
    /// The RPC call failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The result could not be turned into JSON.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Runs one subcommand against the daemon and returns what should be printed.
pub async fn execute<T: Transport>(
    client: &TransmissionClient<T>,
    command: Command,
) -> Result<Value, Error> {
    debug!("Executing {command:?}");
    let output = match command {
        Command::List { ids } => serde_json::to_value(client.get(Some(ids.into()), &[]).await?)?,
        Command::Active => serde_json::to_value(client.active().await?)?,
        Command::Add {
            source,
            download_dir,
            paused,
        } => {
            let mut options = Map::new();
            if let Some(dir) = download_dir {
                options.insert("download-dir".into(), Value::String(dir));
            }
            if paused {
                options.insert("paused".into(), Value::Bool(true));
            }
            let torrent = if Path::new(&source).is_file() {
                client.add_file(&source, &options).await?
            } else {
                client.add_url(&source, &options).await?
            };
            serde_json::to_value(torrent)?
        }
        Command::Start { ids } if ids.is_empty() => Value::Object(client.start_all().await?),
        Command::Start { ids } => Value::Object(client.start(ids).await?),
        Command::Stop { ids } if ids.is_empty() => Value::Object(client.stop_all().await?),
        Command::Stop { ids } => Value::Object(client.stop(ids).await?),
        Command::Remove {
            ids,
            delete_local_data,
        } => Value::Object(client.remove(ids, delete_local_data).await?),
        Command::Session => Value::Object(client.session().await?),
        Command::Stats => serde_json::to_value(client.session_stats().await?)?,
        Command::FreeSpace { path } => serde_json::to_value(client.free_space(&path).await?)?,
        Command::Wait {
            id,
            state,
            interval_ms,
            timeout_secs,
        } => {
            let options = PollOptions {
                interval: Duration::from_millis(interval_ms),
                timeout: timeout_secs.map(Duration::from_secs),
            };
            let torrent = client.wait_for_state_with(id, state, options).await?;
            json!({ "state": state.to_string(), "torrent": torrent })
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use mosaic_transmission_types::{TorrentRef, TorrentStatus};

    use super::*;

    const RPC_PATH: &str = "/transmission/rpc";

    fn client_for(server: &MockServer) -> TransmissionClient {
        TransmissionClient::try_from_url(&server.url(RPC_PATH)).unwrap()
    }

    #[tokio::test]
    async fn start_without_ids_starts_everything() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(RPC_PATH)
                .json_body(json!({ "method": "torrent-start", "tag": 1 }));
            then.status(200)
                .json_body(json!({ "result": "success", "arguments": {} }));
        });

        let output = execute(&client_for(&server), Command::Start { ids: vec![] })
            .await
            .unwrap();

        assert_eq!(output, json!({}));
        mock.assert();
    }

    #[tokio::test]
    async fn list_prints_torrents() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path(RPC_PATH);
            then.status(200).json_body(json!({
                "result": "success",
                "arguments": { "torrents": [{ "id": 1, "name": "sample", "status": 4 }] }
            }));
        });

        let output = execute(
            &client_for(&server),
            Command::List {
                ids: vec![TorrentRef::Id(1)],
            },
        )
        .await
        .unwrap();

        assert_eq!(output["torrents"][0]["name"], "sample");
    }

    #[tokio::test]
    async fn add_url_passes_options() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(RPC_PATH).json_body(json!({
                "method": "torrent-add",
                "arguments": {
                    "filename": "magnet:?xt=urn:btih:abc123",
                    "download-dir": "/downloads",
                    "paused": true
                },
                "tag": 1
            }));
            then.status(200).json_body(json!({
                "result": "success",
                "arguments": { "torrent-added": { "id": 2, "hashString": "abc123" } }
            }));
        });

        let output = execute(
            &client_for(&server),
            Command::Add {
                source: "magnet:?xt=urn:btih:abc123".into(),
                download_dir: Some("/downloads".into()),
                paused: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(output["id"], 2);
        mock.assert();
    }

    #[tokio::test]
    async fn wait_reports_reached_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path(RPC_PATH);
            then.status(200).json_body(json!({
                "result": "success",
                "arguments": { "torrents": [{ "id": 7, "status": 6 }] }
            }));
        });

        let output = execute(
            &client_for(&server),
            Command::Wait {
                id: TorrentRef::Id(7),
                state: TorrentStatus::Seed,
                interval_ms: 10,
                timeout_secs: Some(5),
            },
        )
        .await
        .unwrap();

        assert_eq!(output["state"], "SEED");
        assert_eq!(output["torrent"]["id"], 7);
    }

    #[tokio::test]
    async fn rpc_failure_is_surfaced() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path(RPC_PATH);
            then.status(401);
        });

        let result = execute(&client_for(&server), Command::Stats).await;
        assert!(matches!(result, Err(Error::Rpc(RpcError::Transport(_)))));
    }
}
