//! Client entry point.
//!
//! [`ChannelLinkClient`] holds the injected transport executor and mints
//! [`ChannelRequest`] builders. One-shot helpers cover the common "just read
//! this channel" cases without builder ceremony.

use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::models::{ChannelDataType, ChannelResult, TableResult, Value};
use crate::request::ChannelRequest;

/// Mints channel requests against a shared transport executor.
#[derive(Clone)]
pub struct ChannelLinkClient {
    executor: Arc<dyn RequestExecutor>,
}

impl ChannelLinkClient {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        debug!("[LINK_CLIENT] Client created");
        Self { executor }
    }

    /// Start building a request against `channel`.
    pub fn request(&self, channel: impl Into<String>) -> ChannelRequest {
        ChannelRequest::new(Arc::clone(&self.executor), channel)
    }

    /// One-shot get with no arguments.
    pub fn get(&self, channel: impl Into<String>) -> Result<ChannelResult> {
        self.request(channel).get()
    }

    /// One-shot get declaring the desired return type.
    pub fn get_returning(
        &self,
        channel: impl Into<String>,
        data_type: ChannelDataType,
    ) -> Result<ChannelResult> {
        self.request(channel).returning(data_type).get()
    }

    /// One-shot set with no further arguments.
    pub fn set(
        &self,
        channel: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<TableResult>> {
        self.request(channel).set(value)
    }
}
