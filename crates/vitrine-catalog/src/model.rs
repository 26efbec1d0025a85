#![forbid(unsafe_code)]

//! Catalog tree model.
//!
//! A [`Catalog`] holds the complete group/item/media tree as served at page
//! render time. It is immutable for the lifetime of a page view: selection
//! and modal state reference into it by key, never by holding mutable
//! access.
//!
//! # Design Notes
//!
//! - Group keys are unique across the catalog; item ids are unique within
//!   their group. [`Catalog::validate`](crate::ingest) enforces both.
//! - Items are looked up by id, not by position. Positions are only an
//!   output of resolution, so reordering a group invalidates nothing but
//!   open deep links.
//! - Missing `media` arrays and display names deserialize to empty values
//!   rather than failing the whole catalog.

use serde::{Deserialize, Serialize};

/// Kind of a hosted media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

impl Default for MediaKind {
    fn default() -> Self {
        Self::Image
    }
}

/// A reference to a hosted media asset. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Absolute URL of the asset on the media host.
    pub url: String,
    /// Asset kind. Defaults to [`MediaKind::Image`] when absent.
    #[serde(default)]
    pub kind: MediaKind,
}

impl MediaRef {
    /// Create an image reference.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Image,
        }
    }

    /// Create a video reference.
    #[must_use]
    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
        }
    }
}

/// A single bookable/sellable entry within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Identifier, unique within the owning group.
    pub id: String,
    /// Human-readable name. Empty when the source omitted it.
    #[serde(default)]
    pub display_name: String,
    /// Ordered media gallery. Empty when the source omitted it.
    #[serde(default)]
    pub media: Vec<MediaRef>,
}

impl CatalogItem {
    /// Create an item with no media.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            media: Vec::new(),
        }
    }

    /// Attach media to the item (builder style).
    #[must_use]
    pub fn with_media(mut self, media: Vec<MediaRef>) -> Self {
        self.media = media;
        self
    }

    /// Whether the item has anything to show in a gallery.
    #[must_use]
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

/// A named collection of catalog items (a destination, a dress category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGroup {
    /// Stable identifier, unique across the catalog.
    pub key: String,
    /// Human-readable name. Empty when the source omitted it.
    #[serde(default)]
    pub display_name: String,
    /// Ordered items owned exclusively by this group.
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

impl CatalogGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            items: Vec::new(),
        }
    }

    /// Attach items to the group (builder style).
    #[must_use]
    pub fn with_items(mut self, items: Vec<CatalogItem>) -> Self {
        self.items = items;
        self
    }

    /// Number of items in the group.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Position of the item with the given id, if present.
    ///
    /// Lookup is by exact id equality, never positional.
    #[must_use]
    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Item at the given position, if in bounds.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }
}

/// The full catalog tree for one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All groups, in display order.
    #[serde(default)]
    pub groups: Vec<CatalogGroup>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from groups.
    #[must_use]
    pub fn with_groups(groups: Vec<CatalogGroup>) -> Self {
        Self { groups }
    }

    /// Whether the catalog has no groups at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group with the given key, if present.
    ///
    /// Lookup is by exact key equality.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&CatalogGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// Position of the group with the given key, if present.
    #[must_use]
    pub fn group_index(&self, key: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.key == key)
    }

    /// Total item count across all groups.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(CatalogGroup::item_count).sum()
    }
}
