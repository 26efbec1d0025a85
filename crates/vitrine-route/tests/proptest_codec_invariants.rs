//! Property-based invariant tests for the query model and selection codec.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. Query serialize → parse is the identity.
//! 2. encode → decode recovers any non-empty selection keys.
//! 3. decode never panics on arbitrary query strings.
//! 4. Stripping the selection parameters is idempotent.

use proptest::prelude::*;
use vitrine_route::{HistoryBackend, MemoryHistory, Query, Selection, UrlSync, decode, encode};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Any printable string, including reserved URL characters and non-ASCII.
fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~çãé&=?+%/#]{1,24}").expect("valid regex")
}

fn pair_strategy() -> impl Strategy<Value = (String, String)> {
    (key_strategy(), key_strategy())
}

proptest! {
    #[test]
    fn query_serialize_parse_round_trips(pairs in proptest::collection::vec(pair_strategy(), 0..6)) {
        let mut query = Query::new();
        for (name, value) in &pairs {
            query.set(name.clone(), value.clone());
        }
        let reparsed = Query::parse(&query.to_query_string());
        prop_assert_eq!(reparsed, query);
    }

    #[test]
    fn encode_decode_recovers_selection((group, item) in pair_strategy()) {
        let query = encode(&group, &item);
        let decoded = decode(&query);
        prop_assert_eq!(decoded.clone(), Selection::new(group.clone(), item.clone()));

        // Also via the wire form.
        let rewired = Query::parse(&query.to_query_string());
        prop_assert_eq!(decode(&rewired), Selection::new(group, item));
    }

    #[test]
    fn decode_never_panics(raw in "[ -~]{0,64}") {
        let _ = decode(&Query::parse(&raw));
    }

    #[test]
    fn sync_closed_is_idempotent(raw in "[ -~]{0,48}") {
        let mut sync = UrlSync::new(MemoryHistory::with_initial(Query::parse(&raw)));
        sync.sync_closed();
        let once = sync.current().clone();
        sync.sync_closed();
        prop_assert_eq!(sync.current().clone(), once);
        prop_assert!(decode(sync.current()).group_key.is_none());
        prop_assert!(decode(sync.current()).item_key.is_none());
    }
}

#[test]
fn deep_linked_initial_history_decodes() {
    let history = MemoryHistory::with_initial(Query::parse("?grupo=praia&item=b"));
    let selection = decode(history.current());
    assert_eq!(selection, Selection::new("praia", "b"));
}
