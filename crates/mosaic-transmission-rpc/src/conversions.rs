//! Conversions between caller-supplied values, raw argument maps, and the typed views in
//! `mosaic_transmission_types`.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use mosaic_transmission_types::{RpcError, Torrent, TransportError};

use crate::methods::Method;

/// Serializes caller options into an argument map. Anything that is not a JSON object (or
/// nothing at all) is rejected.
pub(crate) fn into_arguments<S>(method: Method, options: &S) -> Result<Map<String, Value>, RpcError>
where
    S: Serialize + ?Sized,
{
    let value = serde_json::to_value(options)
        .map_err(|e| RpcError::Validation(format!("arguments for {method}: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(RpcError::Validation(format!(
            "arguments mismatch for {method}: expected an object, got {}",
            kind(&other)
        ))),
    }
}

/// Rejects argument fields the method's whitelist does not contain.
pub(crate) fn validate_fields(
    method: Method,
    arguments: &Map<String, Value>,
) -> Result<(), RpcError> {
    if method.settable_fields().is_none() {
        return Ok(());
    }
    match arguments.keys().find(|key| !method.is_field_settable(key)) {
        Some(key) => Err(RpcError::Validation(format!(
            "field {key:?} cannot be set through {method}"
        ))),
        None => Ok(()),
    }
}

/// Decodes a success payload into one of the typed views.
pub(crate) fn decode<D: DeserializeOwned>(
    method: Method,
    arguments: Map<String, Value>,
) -> Result<D, RpcError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| TransportError::Decode(format!("unexpected {method} response: {e}")).into())
}

/// Extracts the torrent from a `torrent-add` response. A duplicate wins over an addition.
pub(crate) fn added_torrent(mut arguments: Map<String, Value>) -> Result<Torrent, RpcError> {
    let torrent = arguments
        .remove("torrent-duplicate")
        .or_else(|| arguments.remove("torrent-added"))
        .ok_or_else(|| RpcError::Protocol("No torrent returned".into()))?;
    serde_json::from_value(torrent).map_err(|e| {
        TransportError::Decode(format!("unexpected {} response: {e}", Method::TorrentAdd)).into()
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
