//! Tower middleware layers for the osclient transport.
//!
//! Layers wrap the boxed transport service inside [`HyperClient`](crate::HyperClient)
//! and see every resolved [`Request`](crate::Request) and buffered
//! [`Response`](crate::Response).
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use osclient::HyperClient;
//! use osclient::middleware::LoggingLayer;
//!
//! let http = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
