#![forbid(unsafe_code)]

//! Selection ⇄ query-parameter codec.
//!
//! Two parameters carry a deep link: the group key and the item id. The
//! codec is deliberately forgiving on decode — a missing, repeated, or
//! empty parameter is "no selection" for that field, never an error.
//! Absence is the normal state of most page loads.

use crate::query::Query;

/// Query parameter carrying the selected group key.
pub const PARAM_GROUP: &str = "grupo";

/// Query parameter carrying the selected item id.
pub const PARAM_ITEM: &str = "item";

/// A decoded (possibly partial) deep-link selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected group key, when the parameter was a single non-empty string.
    pub group_key: Option<String>,
    /// Selected item id, when the parameter was a single non-empty string.
    pub item_key: Option<String>,
}

impl Selection {
    /// A selection with both fields absent.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a complete selection.
    #[must_use]
    pub fn new(group_key: impl Into<String>, item_key: impl Into<String>) -> Self {
        Self {
            group_key: Some(group_key.into()),
            item_key: Some(item_key.into()),
        }
    }

    /// Whether both fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.group_key.is_some() && self.item_key.is_some()
    }
}

/// Decode the selection parameters out of a query.
///
/// Only a single-valued, non-empty parameter counts; anything else —
/// missing, repeated, empty — yields `None` for that field.
#[must_use]
pub fn decode(query: &Query) -> Selection {
    Selection {
        group_key: decode_field(query, PARAM_GROUP),
        item_key: decode_field(query, PARAM_ITEM),
    }
}

/// Encode a selection as a fresh query holding only the two parameters.
///
/// Pure: building the query has no effect on any history state.
#[must_use]
pub fn encode(group_key: &str, item_key: &str) -> Query {
    let mut query = Query::new();
    query.set(PARAM_GROUP, group_key);
    query.set(PARAM_ITEM, item_key);
    query
}

fn decode_field(query: &Query, name: &str) -> Option<String> {
    query
        .get(name)
        .and_then(|value| value.as_single())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
