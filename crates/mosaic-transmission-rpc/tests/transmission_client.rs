//! End-to-end tests of TransmissionClient against a mocked RPC endpoint: session handshake,
//! authentication and request shapes as they go over the wire.

#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use httpmock::prelude::*;
use serde_json::json;

use mosaic_transmission_rpc::{ClientConfig, SESSION_ID_HEADER, TransmissionClient};
use mosaic_transmission_types::{RpcError, TorrentStatus, TransportError};

const RPC_PATH: &str = "/transmission/rpc";

fn client_for(server: &MockServer) -> TransmissionClient {
    TransmissionClient::try_from_url(&server.url(RPC_PATH)).expect("valid mock server url")
}

#[test_log::test(tokio::test)]
async fn handshake_retries_with_issued_session_id() {
    let server = MockServer::start_async().await;
    let accepted = server.mock(|when, then| {
        when.method(POST)
            .path(RPC_PATH)
            .header(SESSION_ID_HEADER, "abc")
            .json_body(json!({ "method": "session-stats", "tag": 1 }));
        then.status(200).json_body(json!({
            "result": "success",
            "tag": 1,
            "arguments": {
                "activeTorrentCount": 0,
                "cumulative-stats": {
                    "downloadedBytes": 0, "filesAdded": 0, "secondsActive": 0,
                    "sessionCount": 1, "uploadedBytes": 0
                },
                "current-stats": {
                    "downloadedBytes": 0, "filesAdded": 0, "secondsActive": 0,
                    "sessionCount": 1, "uploadedBytes": 0
                },
                "downloadSpeed": 0,
                "pausedTorrentCount": 0,
                "torrentCount": 0,
                "uploadSpeed": 0
            }
        }));
    });
    let conflict = server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(409)
            .header(SESSION_ID_HEADER, "abc")
            .body("<h1>409: Conflict</h1>");
    });

    let client = client_for(&server);
    let stats = client.session_stats().await.expect("handshake should succeed");

    assert_eq!(stats.torrent_count, 0);
    assert_eq!(client.session_token().await.as_deref(), Some("abc"));
    conflict.assert_calls(1);
    accepted.assert_calls(1);
}

#[test_log::test(tokio::test)]
async fn persistent_conflict_gives_up_after_one_retry() {
    let server = MockServer::start_async().await;
    let conflict = server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(409).header(SESSION_ID_HEADER, "rotating");
    });

    let client = client_for(&server);
    let result = client.session().await;

    assert!(matches!(result, Err(RpcError::Protocol(_))));
    conflict.assert_calls(2);
}

#[test_log::test(tokio::test)]
async fn credentials_are_sent_as_basic_auth() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(RPC_PATH)
            .header("authorization", "Basic dXNlcjpwYXNz");
        then.status(200)
            .json_body(json!({ "result": "success", "arguments": { "port-is-open": true } }));
    });

    let config = ClientConfig {
        host: server.host(),
        port: server.port(),
        username: Some("user".into()),
        password: Some("pass".into()),
        ..ClientConfig::default()
    };
    let client = TransmissionClient::new(&config).unwrap();

    let port = client.port_test().await.expect("authenticated call");
    assert!(port.port_is_open);
    mock.assert();
}

#[test_log::test(tokio::test)]
async fn unauthorized_is_reported() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(401).body("Unauthorized User");
    });

    let result = client_for(&server).session().await;
    assert!(matches!(
        result,
        Err(RpcError::Transport(TransportError::Unauthorized))
    ));
}

#[test_log::test(tokio::test)]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(500).body("boom");
    });

    let result = client_for(&server).session().await;
    match result {
        Err(RpcError::Transport(TransportError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn add_sends_the_expected_envelope() {
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
            "tag": 1,
            "arguments": {
                "torrent-added": { "id": 4, "name": "sample", "hashString": "abc123" }
            }
        }));
    });

    let client = client_for(&server);
    let torrent = client
        .add(
            "magnet:?xt=urn:btih:abc123",
            &json!({ "download-dir": "/downloads", "paused": true }),
        )
        .await
        .expect("add should succeed");

    assert_eq!(torrent.id, Some(4));
    assert_eq!(torrent.hash_string.as_deref(), Some("abc123"));
    mock.assert();
}

#[test_log::test(tokio::test)]
async fn daemon_failure_result_is_a_protocol_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(200)
            .json_body(json!({ "result": "invalid or corrupt torrent file", "arguments": {} }));
    });

    let result = client_for(&server).add_base64("bm90IGEgdG9ycmVudA==", &()).await;
    match result {
        Err(RpcError::Protocol(msg)) => assert_eq!(msg, "invalid or corrupt torrent file"),
        other => panic!("Expected Protocol error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn wait_for_state_returns_matching_snapshot() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path(RPC_PATH);
        then.status(200).json_body(json!({
            "result": "success",
            "arguments": {
                "torrents": [{ "id": 1, "name": "sample", "hashString": "abc123", "status": 6 }]
            }
        }));
    });

    let torrent = client_for(&server)
        .wait_for_state("abc123", TorrentStatus::Seed)
        .await
        .expect("torrent is already seeding");

    assert_eq!(torrent.name.as_deref(), Some("sample"));
    mock.assert_calls(1);
}
