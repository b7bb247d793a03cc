//! The transport executor seam.
//!
//! The codec never talks to the network itself. A [`RequestExecutor`]
//! performs the actual remote call given a built request container and hands
//! back the typed response container; connection strategy, framing, and
//! retries all live behind this trait.

use std::time::Duration;

use crate::error::Result;
use crate::models::PvStructure;

/// Executes one remote request against a named channel.
///
/// Implementations fail with [`ChannelLinkError::Transport`] on connection
/// failure, timeout, or remote rejection. A setter that produces no value
/// returns `Ok(None)`.
///
/// [`ChannelLinkError::Transport`]: crate::ChannelLinkError::Transport
pub trait RequestExecutor: Send + Sync {
    /// Send `request` to `channel`, waiting at most `timeout`.
    fn execute(
        &self,
        channel: &str,
        request: &PvStructure,
        timeout: Duration,
    ) -> Result<Option<PvStructure>>;
}

/// Any matching closure is an executor, so tests and embedders can supply a
/// transport inline.
impl<F> RequestExecutor for F
where
    F: Fn(&str, &PvStructure, Duration) -> Result<Option<PvStructure>> + Send + Sync,
{
    fn execute(
        &self,
        channel: &str,
        request: &PvStructure,
        timeout: Duration,
    ) -> Result<Option<PvStructure>> {
        self(channel, request, timeout)
    }
}
