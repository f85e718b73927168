//! HTTP client trait.
//!
//! [`HttpClient`] is the transport seam: it executes one resolved
//! [`Request`] and buffers the whole [`Response`]. Implement it to plug in a
//! custom transport or a test double.

use std::future::Future;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// This trait defines the interface for executing HTTP requests.
/// Implementations should be async-first and support connection pooling.
/// Dropping the returned future cancels the request.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Any HTTP status is a successful execution; only failures to obtain a
    /// response are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
