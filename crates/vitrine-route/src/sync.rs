#![forbid(unsafe_code)]

//! URL synchronizer.
//!
//! [`UrlSync`] rewrites the two selection parameters after a modal
//! transition while leaving every unrelated parameter untouched. Callers
//! invoke it strictly *after* mutating in-memory state, so any history
//! traversal observes a URL consistent with some prior state.
//!
//! Update discipline:
//!
//! - opening pushes (each opened item is a history entry a user can go
//!   back from),
//! - moving the selection inside an open modal replaces,
//! - closing replaces, so repeated closes never grow the stack.
//!
//! Every method is a no-op when the rewritten query equals the current
//! one, which makes [`sync_closed`](UrlSync::sync_closed) idempotent.

use tracing::debug;

use crate::codec::{PARAM_GROUP, PARAM_ITEM};
use crate::history::HistoryBackend;
use crate::query::Query;

/// Owns the history backend and performs selection-parameter rewrites.
#[derive(Debug)]
pub struct UrlSync<H: HistoryBackend> {
    history: H,
}

impl<H: HistoryBackend> UrlSync<H> {
    /// Wrap a history backend.
    #[must_use]
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// Query of the current history entry.
    #[must_use]
    pub fn current(&self) -> &Query {
        self.history.current()
    }

    /// Borrow the underlying backend.
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the underlying backend (host-driven navigation).
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Give the backend back.
    #[must_use]
    pub fn into_inner(self) -> H {
        self.history
    }

    /// Encode an opened selection into the URL, pushing a history entry.
    pub fn sync_open(&mut self, group_key: &str, item_key: &str) {
        let next = self.with_selection(group_key, item_key);
        if next == *self.history.current() {
            return;
        }
        debug!(group_key, item_key, "url sync: open");
        self.history.push(next);
    }

    /// Encode a moved selection in place, without a new history entry.
    pub fn sync_move(&mut self, group_key: &str, item_key: &str) {
        let next = self.with_selection(group_key, item_key);
        if next == *self.history.current() {
            return;
        }
        debug!(group_key, item_key, "url sync: move");
        self.history.replace(next);
    }

    /// Strip the selection parameters in place.
    pub fn sync_closed(&mut self) {
        let mut next = self.history.current().clone();
        next.remove(PARAM_GROUP);
        next.remove(PARAM_ITEM);
        if next == *self.history.current() {
            return;
        }
        debug!("url sync: closed");
        self.history.replace(next);
    }

    /// Current query with the selection parameters rewritten.
    fn with_selection(&self, group_key: &str, item_key: &str) -> Query {
        let mut next = self.history.current().clone();
        next.set(PARAM_GROUP, group_key);
        next.set(PARAM_ITEM, item_key);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryOp, MemoryHistory};

    #[test]
    fn open_pushes_selection() {
        let mut sync = UrlSync::new(MemoryHistory::new());
        sync.sync_open("praia", "b");
        assert_eq!(sync.current().to_query_string(), "grupo=praia&item=b");
        assert_eq!(sync.history().operations(), &[HistoryOp::Push]);
    }

    #[test]
    fn open_preserves_unrelated_parameters() {
        let initial = Query::parse("utm_source=promo&lang=pt");
        let mut sync = UrlSync::new(MemoryHistory::with_initial(initial));
        sync.sync_open("praia", "b");
        assert_eq!(
            sync.current().to_query_string(),
            "utm_source=promo&lang=pt&grupo=praia&item=b"
        );
        sync.sync_closed();
        assert_eq!(sync.current().to_query_string(), "utm_source=promo&lang=pt");
    }

    #[test]
    fn reopening_same_selection_is_a_no_op() {
        let mut sync = UrlSync::new(MemoryHistory::new());
        sync.sync_open("praia", "b");
        sync.sync_open("praia", "b");
        assert_eq!(sync.history().operations(), &[HistoryOp::Push]);
    }

    #[test]
    fn move_replaces_instead_of_pushing() {
        let mut sync = UrlSync::new(MemoryHistory::new());
        sync.sync_open("praia", "a");
        sync.sync_move("praia", "b");
        sync.sync_move("praia", "c");
        assert_eq!(sync.current().to_query_string(), "grupo=praia&item=c");
        assert_eq!(
            sync.history().operations(),
            &[HistoryOp::Push, HistoryOp::Replace, HistoryOp::Replace]
        );
        // One back step lands before the modal was opened.
        assert_eq!(sync.history_mut().back().unwrap().to_query_string(), "");
    }

    #[test]
    fn closed_twice_equals_closed_once() {
        let mut sync = UrlSync::new(MemoryHistory::new());
        sync.sync_open("praia", "b");
        sync.sync_closed();
        let after_first = sync.current().clone();
        let ops_after_first = sync.history().operations().len();
        sync.sync_closed();
        assert_eq!(*sync.current(), after_first);
        assert_eq!(sync.history().operations().len(), ops_after_first);
    }

    #[test]
    fn closed_on_clean_url_is_a_no_op() {
        let mut sync = UrlSync::new(MemoryHistory::new());
        sync.sync_closed();
        assert!(sync.history().operations().is_empty());
    }
}
