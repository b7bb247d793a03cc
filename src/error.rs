//! Error types for the channel-link client library.

use thiserror::Error;

/// Errors that can occur while building, executing, or decoding a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelLinkError {
    /// A caller-supplied argument value has no wire schema mapping.
    #[error("Unsupported type specified for argument value: {0}")]
    UnsupportedArgumentType(String),

    /// An array argument's elements do not uniformly match the inferred
    /// element type.
    #[error("Non-homogeneous array detected for argument: {0}")]
    NonHomogeneousArray(String),

    /// A decoded table's column field is not an array.
    #[error("Malformed table column: {0}")]
    MalformedTableColumn(String),

    /// A decoded table violates the table container contract (e.g. the
    /// labels field is missing or not a string array).
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// A destination field did not match any population rule. Unreachable
    /// when the schema and population passes agree.
    #[error("Unknown destination field for argument: {0}")]
    UnknownField(String),

    /// Failure reported by the transport executor: connection failure,
    /// timeout, or remote rejection.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A transport failure wrapped with the channel name and the rendered
    /// argument list for diagnostics.
    #[error("{channel}({arguments}) : {message}")]
    Request {
        /// Channel the request was addressed to.
        channel: String,
        /// Rendered `name=value` argument list.
        arguments: String,
        /// Abbreviated transport error message.
        message: String,
    },

    /// The request was cancelled; the transport call was skipped, or its
    /// result was discarded.
    #[error("Request cancelled")]
    Cancelled,
}

/// Result type for channel-link operations.
pub type Result<T> = std::result::Result<T, ChannelLinkError>;
