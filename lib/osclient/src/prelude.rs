//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use osclient::prelude::*;
//! ```

pub use crate::{
    ApiResponse, ApiResult, Client, ClientConfig, Error, Failure, HeaderMap, HttpClient,
    HyperClient, Inspect, Method, Params, Request, Requestable, Response, Result, StatusCode,
    ToParams,
};
pub use serde::{Deserialize, Serialize};
