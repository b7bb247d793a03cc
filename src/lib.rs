//! # channel-link: Channel Access Client Codec
//!
//! A client-side codec and request/response marshalling layer for typed
//! channel services. Callers hand over dynamically-typed arguments; the
//! library infers a typed wire schema, builds and populates the request
//! envelope, hands it to an injected transport executor, and decodes the
//! typed response container back into native scalars, arrays, and tables.
//!
//! ## Features
//!
//! - **Schema Inference**: Argument values carry their own type; whole-number
//!   floats are coerced to the narrowest integer field that fits
//! - **Builder Requests**: Chainable argument, return type, and timeout
//!   configuration per request
//! - **Typed Decoding**: Scalar, scalar-array, and labeled-table responses
//!   decode into one closed result type
//! - **Async Execution**: Per-request worker threads with callbacks, polling,
//!   and cooperative cancellation
//! - **Pluggable Transport**: The executor is an injected trait object, so
//!   any transport (or a test closure) can carry the request
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use channel_link::{ChannelLinkClient, RequestExecutor};
//!
//! fn run(executor: Arc<dyn RequestExecutor>) -> channel_link::Result<()> {
//!     let client = ChannelLinkClient::new(executor);
//!
//!     // Read a channel with arguments.
//!     let result = client
//!         .request("NDRFACET:BUFFACQ")
//!         .with("BPMD", 57)
//!         .with("NRPOS", 180)
//!         .get()?;
//!     println!("Result: {:?}", result);
//!
//!     // Set a value.
//!     client.request("XCOR:LI31:41:BCON").set(5.0)?;
//!     Ok(())
//! }
//! ```

pub mod arguments;
pub mod chunks;
pub mod client;
pub mod decode;
pub mod error;
pub mod executor;
pub mod models;
pub mod request;
pub mod timeouts;

// Re-export main types for convenience
pub use arguments::ArgumentBuilder;
pub use chunks::ChunkSource;
pub use client::ChannelLinkClient;
pub use decode::unpack;
pub use error::{ChannelLinkError, Result};
pub use executor::RequestExecutor;
pub use models::{
    ArrayValue, ChannelDataType, ChannelResult, PvArray, PvField, PvStructure, ScalarValue,
    TableResult, Value,
};
pub use request::ChannelRequest;
pub use timeouts::{ASYNC_REQUEST_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
