#![forbid(unsafe_code)]

//! Dashboard-shaped aggregation of engagement counts.
//!
//! The controller keeps optimistic local counts per item id — bumped when
//! an update is enqueued, never reconciled against the backend.
//! [`EngagementSummary::collect`] shapes those counts the way the admin
//! dashboard wants them: overall totals, per-group totals, and the top
//! items by views.
//!
//! Counters are keyed by item id, the unit the counter endpoints use. If
//! the same id appears in more than one group, each of those groups
//! reports the shared counter; the overall totals count it once.

use std::collections::HashMap;

use serde::Serialize;

use vitrine_catalog::Catalog;

use crate::telemetry::CounterKind;

/// Counters for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemCounts {
    /// Gallery opens.
    pub views: u64,
    /// Likes.
    pub likes: u64,
    /// Shares.
    pub shares: u64,
    /// WhatsApp contact clicks.
    pub whatsapp_clicks: u64,
}

impl ItemCounts {
    /// Sum across all counters.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.views + self.likes + self.shares + self.whatsapp_clicks
    }

    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: &ItemCounts) {
        self.views += other.views;
        self.likes += other.likes;
        self.shares += other.shares;
        self.whatsapp_clicks += other.whatsapp_clicks;
    }

    fn bump(&mut self, kind: CounterKind) {
        match kind {
            CounterKind::View => self.views += 1,
            CounterKind::Like => self.likes += 1,
            CounterKind::Share => self.shares += 1,
            CounterKind::WhatsappClick => self.whatsapp_clicks += 1,
        }
    }
}

/// Optimistic local counts, keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct EngagementCounts {
    per_item: HashMap<String, ItemCounts>,
}

impl EngagementCounts {
    /// Create an empty count set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump one counter for one item.
    pub fn record(&mut self, kind: CounterKind, item_id: &str) {
        self.per_item.entry(item_id.to_string()).or_default().bump(kind);
    }

    /// Counters for an item; all-zero when nothing was recorded.
    #[must_use]
    pub fn get(&self, item_id: &str) -> ItemCounts {
        self.per_item.get(item_id).copied().unwrap_or_default()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_item.is_empty()
    }

    /// Iterate `(item_id, counts)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemCounts)> {
        self.per_item.iter().map(|(id, counts)| (id.as_str(), counts))
    }
}

/// Totals for one catalog group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotals {
    /// Group key.
    pub group_key: String,
    /// Group display name.
    pub display_name: String,
    /// Summed counters over the group's items.
    pub counts: ItemCounts,
}

/// One entry of the top-items list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopItem {
    /// Item id.
    pub item_id: String,
    /// Key of the group the item was attributed to.
    pub group_key: String,
    /// View count.
    pub views: u64,
}

/// The dashboard view over one page's engagement counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementSummary {
    /// Overall totals across distinct item ids.
    pub totals: ItemCounts,
    /// Per-group totals, in catalog order.
    pub groups: Vec<GroupTotals>,
    /// Most-viewed items, descending, ties broken by group then id.
    pub top_items: Vec<TopItem>,
}

impl EngagementSummary {
    /// Shape counts against the catalog.
    #[must_use]
    pub fn collect(catalog: &Catalog, counts: &EngagementCounts, top_n: usize) -> Self {
        let mut totals = ItemCounts::default();
        for (_, item_counts) in counts.iter() {
            totals.merge(item_counts);
        }

        let mut groups = Vec::with_capacity(catalog.group_count());
        let mut top_items = Vec::new();
        for group in &catalog.groups {
            let mut group_counts = ItemCounts::default();
            for item in &group.items {
                let item_counts = counts.get(&item.id);
                group_counts.merge(&item_counts);
                if item_counts.views > 0 {
                    top_items.push(TopItem {
                        item_id: item.id.clone(),
                        group_key: group.key.clone(),
                        views: item_counts.views,
                    });
                }
            }
            groups.push(GroupTotals {
                group_key: group.key.clone(),
                display_name: group.display_name.clone(),
                counts: group_counts,
            });
        }

        top_items.sort_by(|a, b| {
            b.views
                .cmp(&a.views)
                .then_with(|| a.group_key.cmp(&b.group_key))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        top_items.truncate(top_n);

        Self {
            totals,
            groups,
            top_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::{CatalogGroup, CatalogItem};

    fn catalog() -> Catalog {
        Catalog::with_groups(vec![
            CatalogGroup::new("praia", "Praia").with_items(vec![
                CatalogItem::new("a", "A"),
                CatalogItem::new("b", "B"),
            ]),
            CatalogGroup::new("serra", "Serra").with_items(vec![CatalogItem::new("x", "X")]),
        ])
    }

    #[test]
    fn record_and_get() {
        let mut counts = EngagementCounts::new();
        counts.record(CounterKind::View, "a");
        counts.record(CounterKind::View, "a");
        counts.record(CounterKind::Like, "a");
        assert_eq!(counts.get("a").views, 2);
        assert_eq!(counts.get("a").likes, 1);
        assert_eq!(counts.get("missing"), ItemCounts::default());
    }

    #[test]
    fn summary_totals_and_groups() {
        let mut counts = EngagementCounts::new();
        counts.record(CounterKind::View, "a");
        counts.record(CounterKind::View, "b");
        counts.record(CounterKind::View, "b");
        counts.record(CounterKind::Like, "x");

        let summary = EngagementSummary::collect(&catalog(), &counts, 10);
        assert_eq!(summary.totals.views, 3);
        assert_eq!(summary.totals.likes, 1);

        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].group_key, "praia");
        assert_eq!(summary.groups[0].counts.views, 3);
        assert_eq!(summary.groups[1].counts.likes, 1);
        assert_eq!(summary.groups[1].counts.views, 0);
    }

    #[test]
    fn top_items_sorted_and_truncated() {
        let mut counts = EngagementCounts::new();
        counts.record(CounterKind::View, "a");
        counts.record(CounterKind::View, "b");
        counts.record(CounterKind::View, "b");
        counts.record(CounterKind::View, "x");

        let summary = EngagementSummary::collect(&catalog(), &counts, 2);
        assert_eq!(summary.top_items.len(), 2);
        assert_eq!(summary.top_items[0].item_id, "b");
        assert_eq!(summary.top_items[0].views, 2);
        // "a" and "x" tie at one view; "praia" sorts before "serra".
        assert_eq!(summary.top_items[1].item_id, "a");
    }

    #[test]
    fn items_with_zero_views_are_not_top_items() {
        let mut counts = EngagementCounts::new();
        counts.record(CounterKind::Like, "a");
        let summary = EngagementSummary::collect(&catalog(), &counts, 10);
        assert!(summary.top_items.is_empty());
    }

    #[test]
    fn empty_counts_give_zero_summary() {
        let summary = EngagementSummary::collect(&catalog(), &EngagementCounts::new(), 5);
        assert_eq!(summary.totals, ItemCounts::default());
        assert!(summary.top_items.is_empty());
        assert_eq!(summary.groups.len(), 2);
    }
}
