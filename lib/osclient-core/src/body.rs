//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Media type of every request body sent by osclient.
pub const APPLICATION_JSON: &str = "application/json";

/// Returns `true` if a `Content-Type` value denotes a JSON body.
///
/// Parameters such as `charset` are ignored, and any `+json` suffix type
/// (e.g. `application/vnd.opensearch+json`) is accepted.
#[must_use]
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == APPLICATION_JSON || essence.ends_with("+json")
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use osclient_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Source { index: String }
///
/// let bytes = to_json(&Source { index: "logs".to_string() }).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"index":"logs"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g. `nodes.abc.timestamp`).
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if deserialization fails.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_types() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=UTF-8"));
        assert!(is_json("Application/JSON"));
        assert!(is_json("application/vnd.opensearch+json;compatible-with=7"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/x-ndjson"));
        assert!(!is_json(""));
    }

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct Dest {
            index: String,
            op_type: String,
        }

        let dest = Dest {
            index: "target".to_string(),
            op_type: "create".to_string(),
        };

        let bytes = to_json(&dest).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"index":"target","op_type":"create"}"#);
    }

    #[test]
    fn from_json_syntax_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Health {
            #[allow(dead_code)]
            status: String,
        }

        let result: Result<Health> = from_json(b"not json");
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("JSON deserialization error"));
    }

    #[test]
    fn from_json_error_names_field_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Shards {
            #[allow(dead_code)]
            total: u32,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Cleared {
            #[allow(dead_code)]
            _shards: Shards,
        }

        let result: Result<Cleared> = from_json(br#"{"_shards":{"total":"many"}}"#);
        let msg = result.expect_err("should fail").to_string();
        assert!(msg.contains("_shards.total"), "missing path in: {msg}");
    }
}
