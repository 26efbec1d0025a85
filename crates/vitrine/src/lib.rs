#![forbid(unsafe_code)]

//! Vitrine public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Catalog re-exports ----------------------------------------------------

pub use vitrine_catalog::{Catalog, CatalogError, CatalogGroup, CatalogItem, MediaKind, MediaRef};

// --- Route re-exports ------------------------------------------------------

pub use vitrine_route::{
    HistoryBackend, HistoryOp, MemoryHistory, PARAM_GROUP, PARAM_ITEM, Query, QueryValue,
    Selection, UrlSync, decode, encode,
};

// --- Viewer re-exports -----------------------------------------------------

#[cfg(feature = "http-sink")]
pub use vitrine_viewer::HttpSink;
pub use vitrine_viewer::{
    BoundaryPolicy, CounterKind, CounterSink, CounterUpdate, EngagementCounts, EngagementSummary,
    FileLikeStore, GroupTotals, ItemCounts, KeyCode, KeyEvent, LikeStore, ListenerId,
    MemoryLikeStore, MemorySink, ModalState, Modifiers, NullSink, Resolution, SinkError,
    StoreError, StoreResult, Telemetry, TopItem, ViewerController, ViewerEvent, resolve,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoundaryPolicy, Catalog, HistoryBackend, KeyCode, KeyEvent, MemoryHistory, ModalState,
        Query, Selection, Telemetry, ViewerController, ViewerEvent,
    };

    pub use crate::{catalog, route, viewer};
}

pub use vitrine_catalog as catalog;
pub use vitrine_route as route;
pub use vitrine_viewer as viewer;
