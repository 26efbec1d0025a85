//! Property-based invariant tests for resolution and the modal state
//! machine:
//!
//! 1. A selection absent from the catalog resolves NotFound and always
//!    leaves the machine closed.
//! 2. Opening via URL and opening via click converge to the same state.
//! 3. Whenever the machine is open, the open selection resolves to a real
//!    group and an in-bounds item (checked across random walks).
//! 4. Boundary stepping never leaves the group's index range.

use proptest::prelude::*;
use vitrine_catalog::{Catalog, CatalogGroup, CatalogItem};
use vitrine_route::{MemoryHistory, Query, Selection};
use vitrine_viewer::{
    BoundaryPolicy, KeyCode, KeyEvent, Resolution, ViewerController, resolve,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    proptest::collection::btree_map(
        key_strategy(),
        proptest::collection::btree_set(key_strategy(), 1..5),
        1..4,
    )
    .prop_map(|groups| {
        Catalog::with_groups(
            groups
                .into_iter()
                .map(|(key, items)| {
                    let items = items
                        .into_iter()
                        .map(|id| CatalogItem::new(id.clone(), id))
                        .collect();
                    CatalogGroup::new(key.clone(), key).with_items(items)
                })
                .collect(),
        )
    })
}

/// One of the catalog's (group, item) pairs, chosen by two indices.
fn pick(catalog: &Catalog, group_pick: usize, item_pick: usize) -> (String, String) {
    let group = &catalog.groups[group_pick % catalog.group_count()];
    let item = &group.items[item_pick % group.item_count()];
    (group.key.clone(), item.id.clone())
}

proptest! {
    #[test]
    fn absent_selection_resolves_not_found_and_stays_closed(
        catalog in catalog_strategy(),
        group_key in "[A-Z]{1,6}",
        item_key in "[A-Z]{1,6}",
    ) {
        // Upper-case keys can never collide with the lower-case catalog.
        let selection = Selection::new(group_key.clone(), item_key.clone());
        prop_assert_eq!(resolve(&catalog, &selection), Resolution::NotFound);

        let mut viewer = ViewerController::new(catalog, MemoryHistory::new());
        prop_assert!(!viewer.open(&group_key, &item_key));
        prop_assert!(!viewer.state().is_open());

        let mut query = Query::new();
        query.set("grupo", group_key);
        query.set("item", item_key);
        viewer.on_navigate(&query);
        prop_assert!(!viewer.state().is_open());
    }

    #[test]
    fn url_open_equals_click_open(
        catalog in catalog_strategy(),
        group_pick in any::<usize>(),
        item_pick in any::<usize>(),
    ) {
        let (group_key, item_key) = pick(&catalog, group_pick, item_pick);

        let mut via_click = ViewerController::new(catalog.clone(), MemoryHistory::new());
        prop_assert!(via_click.open(&group_key, &item_key));

        let mut via_url = ViewerController::new(catalog, MemoryHistory::new());
        let mut query = Query::new();
        query.set("grupo", group_key);
        query.set("item", item_key);
        via_url.on_navigate(&query);

        prop_assert_eq!(via_click.state(), via_url.state());
    }

    #[test]
    fn open_state_always_resolves(
        catalog in catalog_strategy(),
        group_pick in any::<usize>(),
        item_pick in any::<usize>(),
        steps in proptest::collection::vec(0u8..4, 0..12),
        wrap in any::<bool>(),
    ) {
        let policy = if wrap { BoundaryPolicy::Wrap } else { BoundaryPolicy::Clamp };
        let (group_key, item_key) = pick(&catalog, group_pick, item_pick);
        let mut viewer = ViewerController::new(catalog, MemoryHistory::new())
            .with_policy(policy);
        viewer.open(&group_key, &item_key);

        for step in steps {
            match step {
                0 => viewer.next(),
                1 => viewer.previous(),
                2 => { viewer.handle_key(KeyEvent::new(KeyCode::Right)); }
                _ => { viewer.handle_key(KeyEvent::new(KeyCode::Escape)); }
            }
            if viewer.state().is_open() {
                prop_assert!(viewer.current().is_some());
            } else {
                prop_assert!(viewer.current().is_none());
            }
        }
    }

    #[test]
    fn stepping_stays_in_bounds(
        index in 0usize..16,
        len in 1usize..16,
        wrap in any::<bool>(),
    ) {
        let policy = if wrap { BoundaryPolicy::Wrap } else { BoundaryPolicy::Clamp };
        let index = index % len;
        prop_assert!(policy.step_forward(index, len) < len);
        prop_assert!(policy.step_back(index, len) < len);
    }
}
