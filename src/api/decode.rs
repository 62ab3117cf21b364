use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::IngestError;

/// JSONP wrapper the provider sometimes puts around detail responses
/// (seen for games that have not started yet)
const CALLBACK_PREFIX: &[u8] = b"externalStatisticsCallback(";

/// Remove the JSONP callback wrapper, if present
pub fn strip_callback(raw: &[u8]) -> &[u8] {
    match raw.strip_prefix(CALLBACK_PREFIX) {
        Some(inner) => {
            debug!("Removed callback wrapper from response");
            let inner = inner.trim_ascii_end();
            inner
                .strip_suffix(b");")
                .or_else(|| inner.strip_suffix(b")"))
                .unwrap_or(inner)
        }
        None => raw,
    }
}

/// Decode a provider response.
///
/// Undecodable input yields an empty object so callers carry on as if the
/// provider had returned nothing.
pub fn decode(raw: &[u8]) -> Value {
    match serde_json::from_slice(strip_callback(raw)) {
        Ok(value) => value,
        Err(e) => {
            error!("{}", IngestError::DecodeFailure(e));
            Value::Object(Map::new())
        }
    }
}
