//! Core types and traits for the osclient OpenSearch REST client.
//!
//! This crate provides the transport-independent building blocks:
//! - [`Method`] - HTTP method enum
//! - [`PathBuilder`] - Route assembly from endpoint fields
//! - [`ToParams`] and [`ParamValue`] - Query parameter encoding
//! - [`Request`], [`RequestBuilder`] and [`build_request`] - HTTP request types
//! - [`Requestable`] - Trait for endpoint request types
//! - [`Response`] - Raw HTTP response type
//! - [`Inspect`], [`ApiResponse`] and [`Failure`] - Typed response envelopes
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod client;
mod envelope;
mod error;
mod method;
mod params;
mod path;
pub mod prelude;
mod request;
mod response;

pub use body::{APPLICATION_JSON, from_json, is_json, to_json};
pub use client::HttpClient;
pub use envelope::{ApiResponse, ApiResult, Failure, Inspect};
pub use error::{Error, Result};
pub use method::Method;
pub use params::{ParamMap, ParamValue, ToParams, format_duration, join_params};
pub use path::{PathBuilder, comma_join};
pub use request::{Request, RequestBuilder, Requestable, build_request};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{HeaderMap, HeaderValue, StatusCode, header};
