//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use osclient_core::prelude::*;
//! ```

pub use crate::{
    ApiResponse, ApiResult, Error, Failure, HttpClient, Inspect, Method, ParamMap, PathBuilder,
    Request, RequestBuilder, Requestable, Response, Result, ToParams, build_request, from_json,
    to_json,
};
