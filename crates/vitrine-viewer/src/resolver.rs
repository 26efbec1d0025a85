#![forbid(unsafe_code)]

//! Selection resolution.
//!
//! Maps decoded URL keys onto positions in the loaded catalog. A miss is a
//! frequently-hit, perfectly normal branch — every page load without a
//! deep link resolves to [`Resolution::NotFound`] — so it is a variant,
//! not an error.

use vitrine_catalog::Catalog;
use vitrine_route::Selection;

/// Outcome of resolving a selection against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both keys matched.
    Found {
        /// Position of the group in the catalog.
        group_index: usize,
        /// Position of the item within the group.
        item_index: usize,
    },
    /// Either key was absent from the selection or from the catalog.
    NotFound,
}

impl Resolution {
    /// Whether the selection matched.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

/// Resolve a decoded selection against the catalog.
///
/// Group lookup is by exact key equality; item lookup is by exact id
/// equality within the matched group, never positional. `None` keys,
/// an unknown group, or an unknown item all yield
/// [`Resolution::NotFound`].
#[must_use]
pub fn resolve(catalog: &Catalog, selection: &Selection) -> Resolution {
    let (Some(group_key), Some(item_key)) = (&selection.group_key, &selection.item_key) else {
        return Resolution::NotFound;
    };
    let Some(group_index) = catalog.group_index(group_key) else {
        return Resolution::NotFound;
    };
    let Some(item_index) = catalog.groups[group_index].item_index(item_key) else {
        return Resolution::NotFound;
    };
    Resolution::Found {
        group_index,
        item_index,
    }
}
