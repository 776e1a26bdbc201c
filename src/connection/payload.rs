//! Inbound payload decoding.

use serde_json::{Map, Value};

use super::ConnectionError;

/// Decode a raw inbound text frame into the assistant reply text.
///
/// The frame must be a JSON object. Only its `message` field is read: strings
/// are used verbatim, `null` becomes the empty string, and any other value is
/// shown as compact JSON.
pub fn decode_payload(raw: &str) -> Result<String, ConnectionError> {
    let mut object: Map<String, Value> = serde_json::from_str(raw)?;
    match object.remove("message") {
        Some(Value::String(text)) => Ok(text),
        Some(Value::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(ConnectionError::MissingMessage),
    }
}
