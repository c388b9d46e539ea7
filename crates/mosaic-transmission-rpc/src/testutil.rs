//! Shared test utilities and fixtures.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use reqwest::{
    StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde_json::{Value, json};
use url::Url;

use crate::{
    client::TransmissionClient,
    config::ClientConfig,
    session::SESSION_ID_HEADER,
    transport::{HttpResponse, MockTransport},
};

/// Request bodies seen by a scripted transport, in order.
pub(crate) type Requests = Arc<Mutex<Vec<Value>>>;

pub(crate) fn test_url() -> Url {
    Url::parse("http://localhost:9091/transmission/rpc").unwrap()
}

pub(crate) fn response(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HeaderMap::new(),
        body: body.to_owned(),
    }
}

/// A successful envelope carrying `arguments`.
pub(crate) fn success(arguments: Value) -> HttpResponse {
    let body = json!({ "result": "success", "arguments": arguments });
    response(StatusCode::OK, &body.to_string())
}

/// A 409 handing out `token`.
pub(crate) fn conflict(token: &str) -> HttpResponse {
    let mut response = response(StatusCode::CONFLICT, "<h1>409: Conflict</h1>");
    response
        .headers
        .insert(SESSION_ID_HEADER, HeaderValue::from_str(token).unwrap());
    response
}

/// A transport that answers with `responses` in order, expects exactly that many requests,
/// and records every request body.
pub(crate) fn scripted(responses: Vec<HttpResponse>) -> (MockTransport, Requests) {
    let requests = Requests::default();
    let recorded = Arc::clone(&requests);
    let times = responses.len();
    let mut queue = VecDeque::from(responses);

    let mut mock = MockTransport::new();
    mock.expect_post().times(times).returning(move |_, body, _| {
        recorded.lock().unwrap().push(body.clone());
        Ok(queue.pop_front().unwrap())
    });
    (mock, requests)
}

/// A client over a scripted transport.
pub(crate) fn scripted_client(
    responses: Vec<HttpResponse>,
) -> (TransmissionClient<MockTransport>, Requests) {
    let (mock, requests) = scripted(responses);
    let client = TransmissionClient::with_transport(&ClientConfig::default(), mock).unwrap();
    (client, requests)
}

/// The `arguments` of the `n`th recorded request.
pub(crate) fn sent_arguments(requests: &Requests, n: usize) -> Value {
    requests.lock().unwrap()[n]["arguments"].clone()
}

pub(crate) fn make_test_torrent(id: i64, name: &str, hash: &str, status: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "hashString": hash,
        "status": status,
        "percentDone": 0.5,
        "downloadDir": "/downloads",
        "totalSize": 1000,
        "eta": -1,
        "error": 0,
        "errorString": "",
        "isFinished": false,
        "rateDownload": 0,
        "rateUpload": 0,
        "peersConnected": 5,
        "peersGettingFromUs": 2,
        "peersSendingToUs": 3,
    })
}

pub(crate) fn make_test_stats() -> Value {
    json!({
        "activeTorrentCount": 1,
        "cumulative-stats": {
            "downloadedBytes": 1000,
            "filesAdded": 5,
            "secondsActive": 3600,
            "sessionCount": 10,
            "uploadedBytes": 500
        },
        "current-stats": {
            "downloadedBytes": 100,
            "filesAdded": 1,
            "secondsActive": 600,
            "sessionCount": 1,
            "uploadedBytes": 50
        },
        "downloadSpeed": 1000,
        "pausedTorrentCount": 0,
        "torrentCount": 1,
        "uploadSpeed": 500
    })
}
