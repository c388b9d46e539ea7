//! The HTTP transport seam.
//!
//! This module provides the [`Transport`] trait which abstracts the underlying HTTP client,
//! enabling mocking in tests, and [`HttpTransport`], its `reqwest` implementation.

use reqwest::{StatusCode, header::HeaderMap};
use serde_json::Value;
use url::Url;

use mosaic_transmission_types::TransportError;

/// A raw HTTP response, before any protocol interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, undecoded.
    pub body: String,
}

/// Issues a single HTTP POST of a JSON body.
///
/// Implementations must not interpret the status code: a non-2xx response is still `Ok`.
/// Only failures to exchange a request with the daemon are errors.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Posts `body` to `url` with the given headers.
    async fn post(
        &self,
        url: &Url,
        body: &Value,
        headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wraps a preconfigured client, e.g. one with timeouts or custom TLS roots.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: &Value,
        headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .headers(headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
