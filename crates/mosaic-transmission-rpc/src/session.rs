//! Session-token handshake.
//!
//! The daemon rejects requests that do not carry its current session id with `409 Conflict`
//! and hands out the id in the `X-Transmission-Session-Id` header of that response. The
//! handshake is done lazily: a request is sent with whatever token is held, and on a 409 the
//! token is replaced and the request is retried once.
//!
//! The token is shared by every call on the same client. Concurrent calls that both hit a 409
//! each overwrite the token with the one they received. The overwrite is idempotent, so the
//! only cost is a redundant refresh.

use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use mosaic_transmission_types::{RpcError, TransportError};

use crate::{
    methods::Method,
    transport::{HttpResponse, Transport},
};

/// Header carrying the session token in both directions.
pub const SESSION_ID_HEADER: &str = "x-transmission-session-id";

const SUCCESS: &str = "success";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RequestEnvelope {
    pub(crate) method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) arguments: Option<Map<String, Value>>,
    pub(crate) tag: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseEnvelope {
    pub(crate) result: String,
    #[serde(default)]
    pub(crate) arguments: Map<String, Value>,
    #[serde(default)]
    pub(crate) tag: Option<u64>,
}

pub(crate) struct Session<T> {
    transport: T,
    url: Url,
    authorization: Option<HeaderValue>,
    token: RwLock<Option<String>>,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(transport: T, url: Url, authorization: Option<HeaderValue>) -> Self {
        Self {
            transport,
            url,
            authorization,
            token: RwLock::new(None),
        }
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Sends one request, refreshing the session token at most once.
    pub(crate) async fn send(
        &self,
        envelope: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, RpcError> {
        let body = serde_json::to_value(envelope)
            .map_err(|e| RpcError::Validation(format!("unserializable arguments: {e}")))?;

        let mut response = self.post(&body).await?;
        if response.status == StatusCode::CONFLICT {
            self.refresh_token(&response).await?;
            response = self.post(&body).await?;
            if response.status == StatusCode::CONFLICT {
                warn!(method = %envelope.method, "Daemon rejected a freshly issued session id");
                return Err(RpcError::Protocol(
                    "daemon rejected the refreshed session id".into(),
                ));
            }
        }

        parse_response(response)
    }

    async fn post(&self, body: &Value) -> Result<HttpResponse, RpcError> {
        let headers = self.headers().await?;
        Ok(self.transport.post(&self.url, body, &headers).await?)
    }

    async fn headers(&self) -> Result<HeaderMap, RpcError> {
        let token = self.token.read().await.clone().unwrap_or_default();
        let token = HeaderValue::from_str(&token)
            .map_err(|_| RpcError::Protocol("session id is not a valid header value".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ID_HEADER, token);
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }
        Ok(headers)
    }

    async fn refresh_token(&self, response: &HttpResponse) -> Result<(), RpcError> {
        let token = response
            .headers
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                RpcError::Protocol("409 response without a usable session id".into())
            })?;

        debug!("Refreshing session id");
        *self.token.write().await = Some(token.to_owned());
        Ok(())
    }
}

fn parse_response(response: HttpResponse) -> Result<ResponseEnvelope, RpcError> {
    if response.status == StatusCode::UNAUTHORIZED {
        return Err(TransportError::Unauthorized.into());
    }
    if !response.status.is_success() {
        return Err(TransportError::Status {
            status: response.status.as_u16(),
            body: response.body,
        }
        .into());
    }

    let envelope: ResponseEnvelope = serde_json::from_str(&response.body)
        .map_err(|e| TransportError::Decode(e.to_string()))?;
    if envelope.result != SUCCESS {
        return Err(RpcError::Protocol(envelope.result));
    }
    Ok(envelope)
}
