#![forbid(unsafe_code)]

//! Vitrine Catalog
//!
//! Data model and ingestion for the catalog tree a viewer page operates on:
//! groups of items, each carrying an ordered list of media references.
//!
//! # Key Components
//!
//! - [`Catalog`] - The full group/item/media tree, fetched once per page view
//! - [`CatalogGroup`] / [`CatalogItem`] / [`MediaRef`] - Tree node types
//! - [`CatalogError`] - Ingestion and validation failures
//!
//! # Role in Vitrine
//! `vitrine-catalog` is the read-only foundation. The viewer and route
//! crates reference into a loaded catalog but never mutate it; a new page
//! view builds a new catalog.

pub mod ingest;
pub mod model;

pub use ingest::CatalogError;
pub use model::{Catalog, CatalogGroup, CatalogItem, MediaKind, MediaRef};
