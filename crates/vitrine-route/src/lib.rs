#![forbid(unsafe_code)]

//! Vitrine Route
//!
//! Everything between the viewer's in-memory selection and the address bar:
//!
//! - [`Query`] - An ordered query-string model that survives round trips
//! - [`decode`] / [`encode`] - The selection ⇄ query-parameter codec
//! - [`HistoryBackend`] - The shallow (non-navigating) history seam
//! - [`UrlSync`] - Rewrites selection parameters after state transitions
//!
//! # Role in Vitrine
//! `vitrine-route` never decides *what* is selected; it only translates a
//! selection to and from its URL form and applies the result to whatever
//! history implementation the host provides. Resolution and modal state
//! live in `vitrine-viewer`.

pub mod codec;
pub mod history;
pub mod query;
pub mod sync;

pub use codec::{PARAM_GROUP, PARAM_ITEM, Selection, decode, encode};
pub use history::{HistoryBackend, HistoryOp, MemoryHistory};
pub use query::{Query, QueryValue};
pub use sync::UrlSync;
