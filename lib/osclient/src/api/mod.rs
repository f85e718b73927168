//! Endpoint request and response types.
//!
//! Each endpoint is a request struct implementing [`Requestable`](crate::Requestable),
//! a derived `*Params` struct, and a response implementing
//! [`ApiResponse`](crate::ApiResponse). Group entry points hang off
//! [`Client`](crate::Client): `client.cat()`, `client.cluster()`,
//! `client.tasks()` and so on.

use serde::Deserialize;

/// Implement [`ApiResponse`](crate::ApiResponse) for a response type with a
/// private `response: Option<Arc<Response>>` field.
///
/// `api_response!(Type)` decodes the body into `Type` itself (which must be
/// `Deserialize + Default` with the `response` field skipped).
/// `api_response!(Type, field: Body)` decodes into `Body` and stores it in
/// `field`, for endpoints answering with a bare JSON array.
macro_rules! api_response {
    ($ty:ident) => {
        impl $crate::ApiResponse for $ty {
            type Body = Self;

            fn from_parts(
                mut body: Self,
                raw: ::std::option::Option<::std::sync::Arc<$crate::Response>>,
            ) -> Self {
                body.response = raw;
                body
            }

            fn inspect(&self) -> $crate::Inspect {
                $crate::Inspect::new(self.response.clone())
            }
        }
    };
    ($ty:ident, $field:ident: $body:ty) => {
        impl $crate::ApiResponse for $ty {
            type Body = $body;

            fn from_parts(
                body: $body,
                raw: ::std::option::Option<::std::sync::Arc<$crate::Response>>,
            ) -> Self {
                Self {
                    $field: body,
                    response: raw,
                }
            }

            fn inspect(&self) -> $crate::Inspect {
                $crate::Inspect::new(self.response.clone())
            }
        }
    };
}

mod cat;
mod cluster;
mod dangling;
mod document;
mod indices;
mod msearch_template;
mod mtermvectors;
mod nodes;
mod params;
mod reindex;
mod tasks;

pub use cat::*;
pub use cluster::*;
pub use dangling::*;
pub use document::*;
pub use indices::*;
pub use msearch_template::*;
pub use mtermvectors::*;
pub use nodes::*;
pub use params::*;
pub use reindex::*;
pub use tasks::*;

/// Shard summary (`_shards`) of multi-shard operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShardStatistics {
    /// Shards the operation ran on.
    pub total: u32,
    /// Shards that succeeded.
    pub successful: u32,
    /// Shards that failed.
    pub failed: u32,
    /// Shards skipped, reported by search endpoints only.
    pub skipped: u32,
}

/// Node summary (`_nodes`) of node-level operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeStatistics {
    /// Nodes targeted.
    pub total: u32,
    /// Nodes that answered.
    pub successful: u32,
    /// Nodes that failed.
    pub failed: u32,
}

/// Error payload returned by the cluster with non-2xx statuses.
///
/// ```ignore
/// if let Err(failure) = client.document().source(req).await {
///     if let Some(Ok(payload)) = failure.error().decode_body::<ErrorResponse>() {
///         println!("{}", payload.error.reason());
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    /// Error cause, structured or a plain message.
    pub error: ErrorCause,
    /// HTTP status echoed in the payload.
    #[serde(default)]
    pub status: u16,
}

/// The `error` member of an [`ErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorCause {
    /// Structured cause with a type and reason.
    Details(ErrorDetails),
    /// Plain message.
    Message(String),
}

impl Default for ErrorCause {
    fn default() -> Self {
        Self::Message(String::new())
    }
}

impl ErrorCause {
    /// Error type, when structured.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Details(details) => Some(&details.kind),
            Self::Message(_) => None,
        }
    }

    /// Human readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Details(details) => details.reason.as_deref().unwrap_or(&details.kind),
            Self::Message(message) => message,
        }
    }
}

/// Structured error cause.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetails {
    /// Exception type, e.g. `index_not_found_exception`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Index the error relates to, if any.
    #[serde(default)]
    pub index: Option<String>,
    /// Underlying causes.
    #[serde(default)]
    pub root_cause: Vec<ErrorDetails>,
}

impl ErrorResponse {
    /// Short message for an error body: `type: reason`, or the plain
    /// message. `None` when the body is not an error payload.
    #[must_use]
    pub fn message_from(body: &[u8]) -> Option<String> {
        let payload: Self = serde_json::from_slice(body).ok()?;
        let message = match &payload.error {
            ErrorCause::Details(details) => match &details.reason {
                Some(reason) => format!("{}: {reason}", details.kind),
                None => details.kind.clone(),
            },
            ErrorCause::Message(message) => message.clone(),
        };
        (!message.is_empty()).then_some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_message() {
        let body = br#"{
            "error": {
                "root_cause": [{"type": "index_not_found_exception", "reason": "no such index [x]", "index": "x"}],
                "type": "index_not_found_exception",
                "reason": "no such index [x]",
                "index": "x"
            },
            "status": 404
        }"#;

        assert_eq!(
            ErrorResponse::message_from(body).as_deref(),
            Some("index_not_found_exception: no such index [x]")
        );

        let payload: ErrorResponse = serde_json::from_slice(body).expect("payload");
        assert_eq!(payload.status, 404);
        assert_eq!(payload.error.kind(), Some("index_not_found_exception"));
        assert_eq!(payload.error.reason(), "no such index [x]");
        let ErrorCause::Details(details) = &payload.error else {
            panic!("expected structured cause");
        };
        assert_eq!(details.root_cause.len(), 1);
        assert_eq!(details.index.as_deref(), Some("x"));
    }

    #[test]
    fn plain_error_message() {
        let body = br#"{"error":"Incorrect HTTP method for uri [/_reindex]","status":405}"#;
        assert_eq!(
            ErrorResponse::message_from(body).as_deref(),
            Some("Incorrect HTTP method for uri [/_reindex]")
        );
    }

    #[test]
    fn not_an_error_payload() {
        assert!(ErrorResponse::message_from(b"").is_none());
        assert!(ErrorResponse::message_from(b"<html>").is_none());
        assert!(ErrorResponse::message_from(br#"{"found":false}"#).is_none());
    }
}
