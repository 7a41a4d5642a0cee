use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::error::RelayError;
use crate::types::UpgradePayload;

/// Decode a base64 `data` field into UTF-8 text.
///
/// ASCII whitespace anywhere in the input is ignored, so wrapped base64 decodes.
pub fn decode_data(data: &str) -> Result<String, RelayError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| RelayError::decode("data", e))?;
    String::from_utf8(bytes).map_err(|e| RelayError::decode("data", e))
}

/// Look up a string value; absent and non-string values both report `label`.
pub fn required_str(
    map: &Map<String, Value>,
    key: &str,
    label: impl FnOnce() -> String,
) -> Result<String, RelayError> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RelayError::MissingField(label()))
}

pub fn required_attribute(
    attributes: &Map<String, Value>,
    key: &str,
) -> Result<String, RelayError> {
    required_str(attributes, key, || key.to_string())
}

/// Parse `attributes.payload`, which arrives either as an object or as a JSON string.
pub fn parse_payload(attributes: &Map<String, Value>) -> Result<UpgradePayload, RelayError> {
    let raw = attributes
        .get("payload")
        .ok_or_else(|| RelayError::MissingField("payload".to_string()))?;

    match raw {
        Value::Object(map) => Ok(UpgradePayload::new(map.clone())),
        Value::String(s) => {
            match serde_json::from_str(s).map_err(|e| RelayError::decode("payload", e))? {
                Value::Object(map) => Ok(UpgradePayload::new(map)),
                _ => Err(RelayError::decode("payload", "not a JSON object")),
            }
        }
        _ => Err(RelayError::MissingField("payload".to_string())),
    }
}
