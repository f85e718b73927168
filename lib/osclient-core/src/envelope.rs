//! Response envelopes.
//!
//! Every typed endpoint response carries an [`Inspect`] view of the raw
//! exchange it was decoded from. On failure the typed response is still
//! returned inside a [`Failure`], so callers can look at the status and body
//! of a `503` the same way they look at a `200`.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use derive_more::Display;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::{Error, Response};

/// Access to the raw HTTP exchange behind a typed response.
///
/// `response` is absent when the request never produced an HTTP response,
/// for example when it could not be built or the connection failed.
#[derive(Debug, Clone, Default)]
pub struct Inspect {
    response: Option<Arc<Response>>,
}

impl Inspect {
    /// Wrap an optional raw response.
    #[must_use]
    pub fn new(response: Option<Arc<Response>>) -> Self {
        Self { response }
    }

    /// The raw response, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }

    /// Returns `true` if an HTTP response was received.
    #[must_use]
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Status code of the raw response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|response| response.status())
    }

    /// Body of the raw response.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.response.as_ref().map(|response| response.body())
    }
}

/// A typed endpoint response.
///
/// `Body` is the JSON payload type. For most endpoints it is the response
/// type itself; the `_cat` endpoints wrap a list.
pub trait ApiResponse: Sized {
    /// Decoded JSON payload.
    type Body: DeserializeOwned + Default;

    /// Assemble the response from its decoded body and the raw exchange.
    fn from_parts(body: Self::Body, raw: Option<Arc<Response>>) -> Self;

    /// View of the raw exchange.
    fn inspect(&self) -> Inspect;
}

/// An error paired with the typed response that was being produced.
///
/// The response always exists: fields the server did not provide keep their
/// defaults and [`Inspect`] exposes whatever raw response was received.
#[derive(Debug, Display)]
#[display("{error}")]
pub struct Failure<T> {
    error: Error,
    response: T,
}

impl<T> Failure<T> {
    /// Pair an error with its response.
    #[must_use]
    pub fn new(error: Error, response: T) -> Self {
        Self { error, response }
    }

    /// The error.
    #[must_use]
    pub const fn error(&self) -> &Error {
        &self.error
    }

    /// The typed response.
    #[must_use]
    pub const fn response(&self) -> &T {
        &self.response
    }

    /// Consume into (error, response).
    #[must_use]
    pub fn into_parts(self) -> (Error, T) {
        (self.error, self.response)
    }

    /// Discard the response.
    #[must_use]
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl<T: ApiResponse> Failure<T> {
    /// View of the raw exchange behind the failed call.
    #[must_use]
    pub fn inspect(&self) -> Inspect {
        self.response.inspect()
    }
}

impl<T: fmt::Debug> std::error::Error for Failure<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<Failure<T>> for Error {
    fn from(failure: Failure<T>) -> Self {
        failure.error
    }
}

/// Result of an endpoint call.
pub type ApiResult<T> = std::result::Result<T, Failure<T>>;

#[cfg(test)]
mod tests {
    use http::HeaderMap;

    use super::*;

    #[derive(Debug, Default, serde::Deserialize)]
    struct Ack {
        acknowledged: bool,
        #[serde(skip)]
        raw: Option<Arc<Response>>,
    }

    impl ApiResponse for Ack {
        type Body = Self;

        fn from_parts(mut body: Self, raw: Option<Arc<Response>>) -> Self {
            body.raw = raw;
            body
        }

        fn inspect(&self) -> Inspect {
            Inspect::new(self.raw.clone())
        }
    }

    fn raw(status: StatusCode, body: &'static str) -> Arc<Response> {
        Arc::new(Response::new(status, HeaderMap::new(), Bytes::from(body)))
    }

    #[test]
    fn inspect_without_response() {
        let inspect = Inspect::default();
        assert!(!inspect.has_response());
        assert!(inspect.status().is_none());
        assert!(inspect.body().is_none());
    }

    #[test]
    fn inspect_shares_raw_response() {
        let ack = Ack::from_parts(
            Ack {
                acknowledged: true,
                raw: None,
            },
            Some(raw(StatusCode::OK, r#"{"acknowledged":true}"#)),
        );

        assert!(ack.acknowledged);
        let inspect = ack.inspect();
        assert_eq!(inspect.status(), Some(StatusCode::OK));
        assert_eq!(
            inspect.body().map(|body| body.to_vec()),
            Some(br#"{"acknowledged":true}"#.to_vec())
        );
    }

    #[test]
    fn failure_keeps_response() {
        let response = Ack::from_parts(
            Ack::default(),
            Some(raw(StatusCode::SERVICE_UNAVAILABLE, "{}")),
        );
        let failure = Failure::new(Error::http(503, "Service Unavailable"), response);

        assert_eq!(failure.to_string(), "HTTP error 503: Service Unavailable");
        assert_eq!(
            failure.inspect().status(),
            Some(StatusCode::SERVICE_UNAVAILABLE)
        );
        assert!(!failure.response().acknowledged);
        assert!(std::error::Error::source(&failure).is_some());

        let error: Error = failure.into();
        assert_eq!(error.status(), Some(503));
    }

    #[test]
    fn failure_question_mark_converts() {
        fn call() -> ApiResult<Ack> {
            Err(Failure::new(Error::Timeout, Ack::default()))
        }

        fn caller() -> crate::Result<bool> {
            let ack = call()?;
            Ok(ack.acknowledged)
        }

        assert!(caller().expect_err("timeout").is_timeout());
    }
}
