//! Builder-pattern channel requests.
//!
//! A [`ChannelRequest`] composes an argument set, a target channel, and the
//! injected transport executor. Configure it with chained calls, then run it
//! once: synchronously with [`get`]/[`set`], or asynchronously with
//! [`async_get`]/[`async_set`] plus callbacks, polling, and cooperative
//! cancellation.
//!
//! Configuration calls are only safe before execution begins; a request is a
//! single-writer-then-single-reader object, not a thread-safe mutable one.
//! Decoded results are immutable snapshots and may be shared freely.
//!
//! [`get`]: ChannelRequest::get
//! [`set`]: ChannelRequest::set
//! [`async_get`]: ChannelRequest::async_get
//! [`async_set`]: ChannelRequest::async_set

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crate::arguments::ArgumentBuilder;
use crate::decode::unpack;
use crate::error::{ChannelLinkError, Result};
use crate::executor::RequestExecutor;
use crate::models::{
    ArrayValue, ChannelDataType, ChannelResult, PvField, PvStructure, ScalarValue, TableResult,
    NTURI_ID,
};
use crate::timeouts::{ASYNC_REQUEST_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

/// Fixed scheme constant of the request envelope.
const SCHEME: &str = "pva";
/// Reserved argument carrying the desired return type.
pub const TYPE_ARGUMENT: &str = "TYPE";
/// Reserved argument carrying a set-operation payload.
pub const VALUE_ARGUMENT: &str = "VALUE";

/// Callback invoked on the worker thread when an asynchronous request
/// completes successfully.
pub type ResponseCallback = Box<dyn Fn(&ChannelResult) + Send + Sync>;
/// Callback invoked on the worker thread when an asynchronous request fails.
pub type ErrorCallback = Box<dyn Fn(&ChannelLinkError) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Completion state shared with the worker thread.
struct AsyncState {
    outcome: Mutex<Option<Result<ChannelResult>>>,
    completed: Condvar,
    started: AtomicBool,
    cancelled: AtomicBool,
    on_response: Mutex<Option<ResponseCallback>>,
    on_error: Mutex<Option<ErrorCallback>>,
}

impl AsyncState {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            completed: Condvar::new(),
            started: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            on_response: Mutex::new(None),
            on_error: Mutex::new(None),
        }
    }

    /// Store the terminal outcome, release the completion signal, then
    /// deliver the matching callback on the calling (worker) thread.
    fn finish(&self, outcome: Result<ChannelResult>) {
        {
            let mut slot = lock(&self.outcome);
            *slot = Some(outcome.clone());
            self.completed.notify_all();
        }
        match outcome {
            Ok(result) => {
                if let Some(callback) = lock(&self.on_response).as_ref() {
                    callback(&result);
                }
            }
            Err(error) => {
                if let Some(callback) = lock(&self.on_error).as_ref() {
                    callback(&error);
                }
            }
        }
    }
}

/// One channel get/set operation, configured via chained calls.
pub struct ChannelRequest {
    executor: Arc<dyn RequestExecutor>,
    channel: String,
    arguments: ArgumentBuilder,
    declared: Option<ChannelDataType>,
    timeout: Duration,
    timeout_set: bool,
    state: Arc<AsyncState>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ChannelRequest {
    pub(crate) fn new(executor: Arc<dyn RequestExecutor>, channel: impl Into<String>) -> Self {
        Self {
            executor,
            channel: channel.into(),
            arguments: ArgumentBuilder::new(),
            declared: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            timeout_set: false,
            state: Arc::new(AsyncState::new()),
            worker: None,
        }
    }

    /// Add a named argument. May be called repeatedly before execution.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<crate::models::Value>) -> Self {
        self.arguments.add_argument(name, value.into());
        self
    }

    /// Declare the desired return type.
    ///
    /// The tag is recorded for local reinterpretation and sent as the
    /// reserved `TYPE` argument using its wire name, so `Char` requests
    /// actually ask for `BYTE` on the wire.
    pub fn returning(mut self, data_type: ChannelDataType) -> Self {
        self.declared = Some(data_type);
        self.arguments
            .add_argument(TYPE_ARGUMENT, crate::models::Value::Str(data_type.wire_name().to_string()));
        self
    }

    /// Override the default 3 second wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.timeout_set = true;
        self
    }

    /// Register a callback for asynchronous completion.
    pub fn on_response(self, callback: impl Fn(&ChannelResult) + Send + Sync + 'static) -> Self {
        *lock(&self.state.on_response) = Some(Box::new(callback));
        self
    }

    /// Register a callback for asynchronous failure.
    pub fn on_error(self, callback: impl Fn(&ChannelLinkError) + Send + Sync + 'static) -> Self {
        *lock(&self.state.on_error) = Some(Box::new(callback));
        self
    }

    /// The request envelope as it would go on the wire: an NTURI structure
    /// with the fixed scheme, the channel path, and the populated query.
    pub fn uri(&self) -> Result<PvStructure> {
        build_uri(&self.channel, &self.arguments)
    }

    /// Execute synchronously and decode the response.
    pub fn get(&mut self) -> Result<ChannelResult> {
        run_once(&*self.executor, &self.channel, &self.arguments, self.declared, self.timeout)
    }

    /// Set the reserved `VALUE` argument, execute synchronously, and return
    /// the table the channel produced, if any.
    pub fn set(&mut self, value: impl Into<crate::models::Value>) -> Result<Option<TableResult>> {
        self.arguments.add_argument(VALUE_ARGUMENT, value.into());
        let result =
            run_once(&*self.executor, &self.channel, &self.arguments, self.declared, self.timeout)?;
        match result {
            ChannelResult::Table(table) => Ok(Some(table)),
            _ => Ok(None),
        }
    }

    /// Execute asynchronously on a dedicated worker thread.
    ///
    /// At most one execution per request instance: a second call while the
    /// first is running, or after completion, is a silent no-op.
    pub fn async_get(&mut self) {
        self.spawn(None, false);
    }

    /// Asynchronous variant of [`set`](ChannelRequest::set); a non-table
    /// response is stored as [`ChannelResult::Void`].
    pub fn async_set(&mut self, value: impl Into<crate::models::Value>) {
        let value = value.into();
        self.spawn(Some(value), true);
    }

    fn spawn(&mut self, value: Option<crate::models::Value>, table_only: bool) {
        if self.state.started.swap(true, Ordering::SeqCst) {
            debug!(
                "[LINK_REQ] Ignoring start, request already executing: channel=\"{}\"",
                self.channel
            );
            return;
        }
        // An async caller who never chose a timeout gets the long one.
        if !self.timeout_set {
            self.timeout = ASYNC_REQUEST_TIMEOUT;
        }
        if let Some(value) = value {
            self.arguments.add_argument(VALUE_ARGUMENT, value);
        }

        let executor = Arc::clone(&self.executor);
        let channel = self.channel.clone();
        let arguments = self.arguments.clone();
        let declared = self.declared;
        let timeout = self.timeout;
        let state = Arc::clone(&self.state);

        self.worker = Some(thread::spawn(move || {
            if state.cancelled.load(Ordering::SeqCst) {
                state.finish(Err(ChannelLinkError::Cancelled));
                return;
            }
            let mut outcome = run_once(&*executor, &channel, &arguments, declared, timeout);
            if table_only {
                outcome = outcome.map(|result| match result {
                    ChannelResult::Table(table) => ChannelResult::Table(table),
                    _ => ChannelResult::Void,
                });
            }
            // A cancellation that arrived while the transport call was in
            // flight discards whatever the call produced.
            if state.cancelled.load(Ordering::SeqCst) {
                outcome = Err(ChannelLinkError::Cancelled);
            }
            state.finish(outcome);
        }));
    }

    /// Request cancellation of a running asynchronous request.
    ///
    /// Cancellation is cooperative: a transport call already in flight is not
    /// interrupted, but its result is discarded and the stored outcome is
    /// [`ChannelLinkError::Cancelled`]. Poll [`is_ready`] rather than
    /// assuming immediate abort.
    ///
    /// [`is_ready`]: ChannelRequest::is_ready
    pub fn cancel(&self) {
        if self.is_running() {
            self.state.cancelled.store(true, Ordering::SeqCst);
        }
    }

    /// True while an asynchronous execution is in flight.
    pub fn is_running(&self) -> bool {
        self.state.started.load(Ordering::SeqCst) && !self.is_ready()
    }

    /// True once an asynchronous execution has stored its terminal outcome.
    pub fn is_ready(&self) -> bool {
        lock(&self.state.outcome).is_some()
    }

    /// Block until the asynchronous outcome is ready or `timeout` elapses.
    /// Returns true if the outcome is ready.
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut slot = lock(&self.state.outcome);
        while slot.is_none() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .state
                .completed
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot = guard;
        }
        true
    }

    /// The stored terminal outcome of an asynchronous execution, if ready.
    pub fn outcome(&self) -> Option<Result<ChannelResult>> {
        lock(&self.state.outcome).clone()
    }

    /// The stored successful response of an asynchronous execution, if any.
    pub fn response(&self) -> Option<ChannelResult> {
        self.outcome().and_then(|outcome| outcome.ok())
    }
}

/// Build the NTURI request envelope around the populated argument query.
fn build_uri(channel: &str, arguments: &ArgumentBuilder) -> Result<PvStructure> {
    let schema = arguments.build_schema()?;
    let mut query = PvStructure::from_schema("", &schema);
    arguments.populate(&mut query)?;

    let mut request = PvStructure::new(NTURI_ID);
    request.push("path", PvField::String(channel.to_string()));
    request.push("scheme", PvField::String(SCHEME.to_string()));
    request.push("query", PvField::Structure(query));
    Ok(request)
}

/// Build, execute, decode, and reinterpret one request.
fn run_once(
    executor: &dyn RequestExecutor,
    channel: &str,
    arguments: &ArgumentBuilder,
    declared: Option<ChannelDataType>,
    timeout: Duration,
) -> Result<ChannelResult> {
    let request = build_uri(channel, arguments)?;
    debug!("[LINK_REQ] Executing: channel=\"{}\" args=({}) timeout={:?}", channel, arguments, timeout);

    let started = Instant::now();
    let response = executor.execute(channel, &request, timeout).map_err(|error| {
        warn!(
            "[LINK_REQ] Transport failure: channel=\"{}\" duration_ms={} error=\"{}\"",
            channel,
            started.elapsed().as_millis(),
            error
        );
        ChannelLinkError::Request {
            channel: channel.to_string(),
            arguments: arguments.to_string(),
            message: abbreviate(&error.to_string()),
        }
    })?;
    debug!(
        "[LINK_REQ] Response received: channel=\"{}\" duration_ms={}",
        channel,
        started.elapsed().as_millis()
    );

    let result = unpack(response.as_ref())?;
    Ok(reinterpret(result, declared))
}

/// Reinterpret byte results as character glyphs when the caller declared a
/// `Char`/`CharArray` return type; bytes and characters share a wire
/// representation, so this is the only place the distinction exists.
fn reinterpret(result: ChannelResult, declared: Option<ChannelDataType>) -> ChannelResult {
    match (declared, result) {
        (Some(ChannelDataType::Char), ChannelResult::Scalar(ScalarValue::Byte(byte))) => {
            ChannelResult::Scalar(ScalarValue::Str(glyph(byte)))
        }
        (Some(ChannelDataType::CharArray), ChannelResult::Array(ArrayValue::Byte(bytes))) => {
            ChannelResult::Array(ArrayValue::Str(bytes.into_iter().map(glyph).collect()))
        }
        (_, result) => result,
    }
}

fn glyph(byte: i8) -> String {
    format!("'{}'", (byte as u8) as char)
}

/// First sentence or clause of a transport error message, for concise
/// display.
fn abbreviate(message: &str) -> String {
    let Some(end) = message.find('.') else {
        return message.to_string();
    };
    let end = match message.find(", cause:") {
        Some(cause) => end.min(cause),
        None => end,
    };
    message[..end].to_string()
}
