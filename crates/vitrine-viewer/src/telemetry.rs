#![forbid(unsafe_code)]

//! Best-effort engagement counters.
//!
//! Views, likes, shares, and WhatsApp clicks feed an analytics dashboard;
//! they are not authoritative data. Delivery is therefore fire-and-forget:
//! [`Telemetry::record`] enqueues onto a bounded channel and returns
//! immediately, a background worker hands updates to a [`CounterSink`],
//! and every failure mode degrades to a dropped count:
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Queue full | Update dropped, logged at `debug` |
//! | Sink delivery error | Update dropped, logged at `warn`, never retried |
//! | Handle dropped | Queue drains, worker exits; undelivered updates are lost |
//!
//! The interactive state machine never waits on any of this.

use std::fmt;
use std::sync::mpsc::{SyncSender, TrySendError, sync_channel};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

/// Default depth of the update queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Which counter an update increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    /// The item's gallery was opened.
    View,
    /// The item was liked.
    Like,
    /// The item was shared.
    Share,
    /// The item's WhatsApp contact button was clicked.
    WhatsappClick,
}

impl CounterKind {
    /// Stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::View => "view",
            CounterKind::Like => "like",
            CounterKind::Share => "share",
            CounterKind::WhatsappClick => "whatsapp_click",
        }
    }

    /// Path segment of the counter endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            CounterKind::View => "views",
            CounterKind::Like => "likes",
            CounterKind::Share => "shares",
            CounterKind::WhatsappClick => "whatsapp-clicks",
        }
    }
}

/// One counter increment for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterUpdate {
    /// Id of the item whose counter moves.
    pub item_id: String,
    /// Which counter moves.
    pub kind: CounterKind,
}

impl CounterUpdate {
    /// Create an update.
    #[must_use]
    pub fn new(item_id: impl Into<String>, kind: CounterKind) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
        }
    }
}

/// Errors a sink can report. All of them are logged and swallowed.
#[derive(Debug)]
pub enum SinkError {
    /// The transport failed before a response arrived.
    Transport(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The sink is not in a usable state.
    Unavailable(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Transport(msg) => write!(f, "transport error: {msg}"),
            SinkError::Status(code) => write!(f, "unexpected status: {code}"),
            SinkError::Unavailable(msg) => write!(f, "sink unavailable: {msg}"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Destination for counter updates.
///
/// Implementations run on the telemetry worker thread and may block; the
/// bounded queue in front of them is what keeps the UI thread free.
pub trait CounterSink: Send {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Deliver one update.
    fn deliver(&self, update: &CounterUpdate) -> Result<(), SinkError>;
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl CounterSink for NullSink {
    fn name(&self) -> &str {
        "NullSink"
    }

    fn deliver(&self, _update: &CounterUpdate) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that records updates in memory, for tests and local inspection.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// the other to [`Telemetry::spawn`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    delivered: Arc<Mutex<Vec<CounterUpdate>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in order.
    #[must_use]
    pub fn delivered(&self) -> Vec<CounterUpdate> {
        self.delivered.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl CounterSink for MemorySink {
    fn name(&self) -> &str {
        "MemorySink"
    }

    fn deliver(&self, update: &CounterUpdate) -> Result<(), SinkError> {
        self.delivered
            .lock()
            .map_err(|_| SinkError::Unavailable("buffer lock poisoned".into()))?
            .push(update.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to the background counter dispatcher.
///
/// Dropping the handle closes the queue; the worker drains whatever is
/// already enqueued and exits. Anything recorded but not yet delivered at
/// that point is lost, which is the accepted data-loss mode for these
/// counters.
pub struct Telemetry {
    tx: Option<SyncSender<CounterUpdate>>,
    worker: Option<JoinHandle<()>>,
}

impl Telemetry {
    /// Spawn a dispatcher with the default queue capacity.
    #[must_use]
    pub fn spawn(sink: Box<dyn CounterSink>) -> Self {
        Self::with_capacity(sink, DEFAULT_QUEUE_CAPACITY)
    }

    /// Spawn a dispatcher with an explicit queue capacity.
    #[must_use]
    pub fn with_capacity(sink: Box<dyn CounterSink>, capacity: usize) -> Self {
        let (tx, rx) = sync_channel::<CounterUpdate>(capacity.max(1));
        let worker = thread::Builder::new()
            .name("vitrine-telemetry".to_string())
            .spawn(move || {
                while let Ok(update) = rx.recv() {
                    match sink.deliver(&update) {
                        Ok(()) => debug!(
                            sink = sink.name(),
                            kind = update.kind.as_str(),
                            item_id = %update.item_id,
                            "counter delivered"
                        ),
                        Err(e) => warn!(
                            sink = sink.name(),
                            kind = update.kind.as_str(),
                            item_id = %update.item_id,
                            error = %e,
                            "counter delivery failed, dropping"
                        ),
                    }
                }
            })
            .ok();
        if worker.is_none() {
            warn!("telemetry worker failed to start, counters disabled");
        }
        Self {
            tx: worker.is_some().then_some(tx),
            worker,
        }
    }

    /// A handle that silently discards every update.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            tx: None,
            worker: None,
        }
    }

    /// Whether updates have anywhere to go.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Enqueue an update without blocking.
    ///
    /// A full queue or a stopped worker drops the update on the floor.
    pub fn record(&self, update: CounterUpdate) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(update) {
            Ok(()) => {}
            Err(TrySendError::Full(update)) => debug!(
                kind = update.kind.as_str(),
                item_id = %update.item_id,
                "telemetry queue full, dropping update"
            ),
            Err(TrySendError::Disconnected(update)) => debug!(
                kind = update.kind.as_str(),
                item_id = %update.item_id,
                "telemetry worker gone, dropping update"
            ),
        }
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        // Closing the sender lets the worker drain and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP sink (requires http-sink feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "http-sink")]
mod http {
    use super::*;

    /// Sink that PATCHes each update to a per-kind counter endpoint.
    ///
    /// `PATCH {base_url}/{kind}` with body `{"itemId": "..."}`. The
    /// response body is ignored; only the status matters. Runs on the
    /// telemetry worker thread, so the blocking client is fine.
    pub struct HttpSink {
        base_url: String,
        client: reqwest::blocking::Client,
    }

    impl HttpSink {
        /// Create a sink targeting the given counter API base URL.
        #[must_use]
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                client: reqwest::blocking::Client::new(),
            }
        }
    }

    impl CounterSink for HttpSink {
        fn name(&self) -> &str {
            "HttpSink"
        }

        fn deliver(&self, update: &CounterUpdate) -> Result<(), SinkError> {
            let url = format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                update.kind.endpoint()
            );
            let body = serde_json::json!({ "itemId": update.item_id });
            let response = self
                .client
                .patch(&url)
                .json(&body)
                .send()
                .map_err(|e| SinkError::Transport(e.to_string()))?;
            if !response.status().is_success() {
                return Err(SinkError::Status(response.status().as_u16()));
            }
            Ok(())
        }
    }

    impl fmt::Debug for HttpSink {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("HttpSink")
                .field("base_url", &self.base_url)
                .finish()
        }
    }
}

#[cfg(feature = "http-sink")]
pub use http::HttpSink;
