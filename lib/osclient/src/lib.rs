//! Typed async client for the OpenSearch REST API.
//!
//! Every endpoint follows the same shape: a request struct with path fields,
//! a derived parameter struct and optional headers/body is turned into a
//! transport [`Request`], dispatched by [`Client::perform`], and decoded into a
//! typed response that keeps the raw exchange reachable through
//! [`ApiResponse::inspect`].
//!
//! # Example
//!
//! ```ignore
//! use osclient::prelude::*;
//! use osclient::api::{CatCountReq, ClusterHealthReq};
//!
//! let client = Client::from_env()?;
//!
//! let health = client.cluster().health(None).await?;
//! println!("{} is {}", health.cluster_name, health.status);
//!
//! let counts = client
//!     .cat()
//!     .count(Some(CatCountReq {
//!         indices: vec!["logs-*".to_string()],
//!         ..Default::default()
//!     }))
//!     .await?;
//! for count in &counts.counts {
//!     println!("{} docs at {}", count.count, count.timestamp);
//! }
//! ```
//!
//! Failed calls still return the typed response inside a [`Failure`]:
//!
//! ```ignore
//! match client.cat().indices(None).await {
//!     Ok(resp) => println!("{} indices", resp.indices.len()),
//!     Err(failure) => {
//!         let inspect = failure.inspect();
//!         println!("{} ({:?})", failure, inspect.status());
//!     }
//! }
//! ```

extern crate self as osclient;

mod api_client;
mod client;
mod config;
mod connector;

pub mod api;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use api_client::{Client, DEFAULT_URL, URL_ENV};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use osclient_core::{
    APPLICATION_JSON, ApiResponse, ApiResult, Error, Failure, HttpClient, Inspect, Method,
    ParamMap, ParamValue, PathBuilder, Request, RequestBuilder, Requestable, Response, Result,
    ToParams, build_request, comma_join, format_duration, from_json, is_json, join_params,
    to_json,
};

// Re-export http types for status codes and headers
pub use osclient_core::{HeaderMap, HeaderValue, StatusCode, header};

pub use url;

// Re-export macros
pub use osclient_macro::Params;
