#![forbid(unsafe_code)]

//! Catalog ingestion.
//!
//! The catalog arrives as one JSON document, fetched once at page render
//! time. Ingestion is tolerant where the source is sloppy (missing media
//! arrays, missing display names) and strict where ambiguity would corrupt
//! deep links (duplicate group keys or item ids).

use std::fmt;

use crate::model::Catalog;

/// Errors raised while loading or validating a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The document was not structurally valid JSON for the catalog shape.
    Parse(serde_json::Error),
    /// Two groups share the same key.
    DuplicateGroup {
        /// The offending key.
        key: String,
    },
    /// Two items within one group share the same id.
    DuplicateItem {
        /// Key of the group containing the collision.
        group: String,
        /// The offending item id.
        id: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "catalog parse error: {e}"),
            CatalogError::DuplicateGroup { key } => {
                write!(f, "duplicate group key: {key:?}")
            }
            CatalogError::DuplicateItem { group, id } => {
                write!(f, "duplicate item id {id:?} in group {group:?}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

impl Catalog {
    /// Load and validate a catalog from a JSON document.
    ///
    /// This is the page-load boundary: the document is fetched exactly once
    /// and never re-fetched on navigation. An empty document (`{}` or
    /// `{"groups": []}`) is a valid, empty catalog.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_slice(bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// [`from_json_slice`](Self::from_json_slice) over a string.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        Self::from_json_slice(text.as_bytes())
    }

    /// Check key uniqueness across the tree.
    ///
    /// Duplicate keys would make deep links ambiguous, so they reject the
    /// whole catalog rather than silently resolving to the first match.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut group_keys = std::collections::HashSet::new();
        for group in &self.groups {
            if !group_keys.insert(group.key.as_str()) {
                return Err(CatalogError::DuplicateGroup {
                    key: group.key.clone(),
                });
            }
            let mut item_ids = std::collections::HashSet::new();
            for item in &group.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateItem {
                        group: group.key.clone(),
                        id: item.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_full_document() {
        let catalog = Catalog::from_json_str(
            r#"{
                "groups": [
                    {
                        "key": "praia",
                        "displayName": "Praia",
                        "items": [
                            {
                                "id": "a",
                                "displayName": "Pacote A",
                                "media": [{"url": "https://cdn/a1.jpg", "kind": "image"}]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.group_count(), 1);
        let group = catalog.group("praia").unwrap();
        assert_eq!(group.items[0].media.len(), 1);
    }

    #[test]
    fn tolerates_missing_media_and_names() {
        let catalog = Catalog::from_json_str(
            r#"{"groups": [{"key": "g", "items": [{"id": "i"}]}]}"#,
        )
        .unwrap();
        let item = catalog.group("g").unwrap().item(0).unwrap();
        assert!(item.media.is_empty());
        assert!(item.display_name.is_empty());
        assert!(!item.has_media());
    }

    #[test]
    fn empty_documents_are_valid() {
        assert!(Catalog::from_json_str("{}").unwrap().is_empty());
        assert!(Catalog::from_json_str(r#"{"groups": []}"#).unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Catalog::from_json_str("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn rejects_duplicate_group_keys() {
        let err = Catalog::from_json_str(
            r#"{"groups": [{"key": "g", "items": []}, {"key": "g", "items": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGroup { key } if key == "g"));
    }

    #[test]
    fn rejects_duplicate_item_ids_within_group() {
        let err = Catalog::from_json_str(
            r#"{"groups": [{"key": "g", "items": [{"id": "i"}, {"id": "i"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateItem { group, id } if group == "g" && id == "i"
        ));
    }

    #[test]
    fn same_item_id_in_different_groups_is_fine() {
        let catalog = Catalog::from_json_str(
            r#"{"groups": [
                {"key": "g1", "items": [{"id": "i"}]},
                {"key": "g2", "items": [{"id": "i"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(catalog.group_count(), 2);
    }
}
