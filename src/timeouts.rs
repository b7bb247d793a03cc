//! Default timeouts for request execution.

use std::time::Duration;

/// Default wait for a synchronous request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Wait applied to asynchronous requests when the caller never set a
/// timeout: effectively "wait indefinitely" on a human timescale, for
/// long-running acquisitions.
pub const ASYNC_REQUEST_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);
