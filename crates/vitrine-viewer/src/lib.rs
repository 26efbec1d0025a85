#![forbid(unsafe_code)]

//! Vitrine Viewer
//!
//! The state core of a deep-linkable catalog page: given a loaded
//! [`Catalog`](vitrine_catalog::Catalog), this crate resolves URL
//! selections, runs the modal visibility state machine, keeps the address
//! bar in sync, and feeds best-effort engagement counters.
//!
//! # Key Components
//!
//! - [`ViewerController`] - Wires codec → resolver → state machine → URL sync
//! - [`ModalState`] / [`BoundaryPolicy`] - The visibility state machine
//! - [`resolve`] - Key-based lookup into the catalog, miss is not an error
//! - [`LikeStore`] - Injectable "already liked" capability
//! - [`Telemetry`] / [`CounterSink`] - Fire-and-forget counter delivery
//! - [`EngagementSummary`] - Dashboard-shaped aggregation of local counts
//!
//! # Role in Vitrine
//! `vitrine-viewer` is the orchestrator. It consumes key events and host
//! requests, drives the state machine, and delegates URL writes to
//! `vitrine-route`. Rendering is the host's problem: subscribe to
//! [`ViewerEvent`]s and redraw from [`ViewerController::current`].

pub mod controller;
pub mod event;
pub mod like_store;
pub mod resolver;
pub mod state;
pub mod stats;
pub mod telemetry;

pub use controller::{ListenerId, ViewerController, ViewerEvent};
pub use event::{KeyCode, KeyEvent, Modifiers};
pub use like_store::{FileLikeStore, LikeStore, MemoryLikeStore, StoreError, StoreResult};
pub use resolver::{Resolution, resolve};
pub use state::{BoundaryPolicy, ModalState};
pub use stats::{EngagementCounts, EngagementSummary, GroupTotals, ItemCounts, TopItem};
pub use telemetry::{
    CounterKind, CounterSink, CounterUpdate, MemorySink, NullSink, SinkError, Telemetry,
};
#[cfg(feature = "http-sink")]
pub use telemetry::HttpSink;
