#![forbid(unsafe_code)]

//! The viewer controller.
//!
//! [`ViewerController`] wires the pieces together: it decodes the URL,
//! resolves selections against the catalog, runs the modal state machine,
//! and writes the URL back — in that order, always. The URL is an input on
//! the navigation path ([`on_navigate`](ViewerController::on_navigate))
//! and an output on the interaction path ([`open`](ViewerController::open),
//! [`close`](ViewerController::close), next/previous); it is never both in
//! one transition.
//!
//! Everything here runs to completion on the caller's thread. The only
//! asynchronous piece is counter delivery, which is enqueue-and-forget
//! (see [`crate::telemetry`]).
//!
//! Hosts learn about transitions through subscribed listeners, which fire
//! synchronously after the state and URL are consistent. Rendering from
//! [`current`](ViewerController::current) inside a listener always
//! observes the invariant: an open modal resolves to a real group and an
//! in-bounds item.

use std::fmt;

use tracing::{debug, warn};

use vitrine_catalog::{Catalog, CatalogGroup, CatalogItem};
use vitrine_route::{HistoryBackend, Query, Selection, UrlSync, decode};

use crate::event::{KeyCode, KeyEvent};
use crate::like_store::{LikeStore, MemoryLikeStore};
use crate::resolver::{Resolution, resolve};
use crate::state::{BoundaryPolicy, ModalState};
use crate::stats::EngagementCounts;
use crate::telemetry::{CounterKind, CounterUpdate, Telemetry};

/// Identifier of a subscribed listener.
pub type ListenerId = u64;

/// Notification of a completed state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The modal opened (or re-targeted) on an item.
    Opened {
        /// Key of the displayed group.
        group_key: String,
        /// Index of the displayed item.
        item_index: usize,
    },
    /// The open modal moved to another item of the same group.
    SelectionMoved {
        /// Index of the newly displayed item.
        item_index: usize,
    },
    /// The modal closed.
    Closed,
}

type Listener = Box<dyn FnMut(&ViewerEvent)>;

/// Deep-linkable modal controller over one loaded catalog.
pub struct ViewerController<H: HistoryBackend> {
    catalog: Catalog,
    state: ModalState,
    sync: UrlSync<H>,
    policy: BoundaryPolicy,
    likes: Box<dyn LikeStore>,
    telemetry: Telemetry,
    counts: EngagementCounts,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl<H: HistoryBackend> ViewerController<H> {
    /// Create a controller over a catalog and a history backend.
    ///
    /// Starts closed, with an in-memory like guard and counters disabled.
    #[must_use]
    pub fn new(catalog: Catalog, history: H) -> Self {
        Self {
            catalog,
            state: ModalState::Closed,
            sync: UrlSync::new(history),
            policy: BoundaryPolicy::default(),
            likes: Box::new(MemoryLikeStore::new()),
            telemetry: Telemetry::disabled(),
            counts: EngagementCounts::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Set the next/previous boundary policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Inject the "already liked" capability.
    #[must_use]
    pub fn with_like_store(mut self, likes: Box<dyn LikeStore>) -> Self {
        self.likes = likes;
        self
    }

    /// Attach a counter dispatcher.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current modal state.
    #[must_use]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// The configured boundary policy.
    #[must_use]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Query of the current history entry.
    #[must_use]
    pub fn current_query(&self) -> &Query {
        self.sync.current()
    }

    /// The history backend (tests, host-driven traversal).
    #[must_use]
    pub fn history(&self) -> &H {
        self.sync.history()
    }

    /// Mutable history backend access for host-driven traversal. After
    /// moving through history, feed the new query to
    /// [`on_navigate`](Self::on_navigate).
    pub fn history_mut(&mut self) -> &mut H {
        self.sync.history_mut()
    }

    /// Optimistic local engagement counts.
    #[must_use]
    pub fn counts(&self) -> &EngagementCounts {
        &self.counts
    }

    /// The resolved group and item of an open modal.
    #[must_use]
    pub fn current(&self) -> Option<(&CatalogGroup, &CatalogItem)> {
        let (group_key, item_index) = self.state.as_open()?;
        let group = self.catalog.group(group_key)?;
        let item = group.item(item_index)?;
        Some((group, item))
    }

    // ── Listeners ────────────────────────────────────────────────────────

    /// Subscribe to state transitions.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // ── Navigation path (URL is the input) ───────────────────────────────

    /// Apply the query of the current history entry, as on page ready.
    pub fn bootstrap(&mut self) {
        let query = self.sync.current().clone();
        self.on_navigate(&query);
    }

    /// React to a URL observed by the host (page ready, back/forward).
    ///
    /// A resolvable selection opens the modal; anything else closes it if
    /// it was open — a stale or hand-edited link self-heals instead of
    /// crashing. No history is written on this path.
    pub fn on_navigate(&mut self, query: &Query) {
        let selection = decode(query);
        match resolve(&self.catalog, &selection) {
            Resolution::Found {
                group_index,
                item_index,
            } => {
                let group = &self.catalog.groups[group_index];
                let group_key = group.key.clone();
                if self.state.as_open() == Some((group_key.as_str(), item_index)) {
                    return;
                }
                let item_id = group.items[item_index].id.clone();
                debug!(%group_key, item_index, "navigate: opening from url");
                self.state = ModalState::Open {
                    group_key: group_key.clone(),
                    item_index,
                };
                self.record_counter(CounterKind::View, &item_id);
                self.emit(ViewerEvent::Opened {
                    group_key,
                    item_index,
                });
            }
            Resolution::NotFound => {
                if self.state.is_open() {
                    debug!("navigate: selection gone, self-healing close");
                    self.state = ModalState::Closed;
                    self.emit(ViewerEvent::Closed);
                }
            }
        }
    }

    // ── Interaction path (URL is the output) ─────────────────────────────

    /// Open the modal on an item, as from a gallery click.
    ///
    /// Returns whether the modal opened. An unresolvable request is
    /// ignored — the worst outcome of bad input is a modal that does not
    /// open.
    pub fn open(&mut self, group_key: &str, item_key: &str) -> bool {
        let selection = Selection::new(group_key, item_key);
        let Resolution::Found {
            group_index,
            item_index,
        } = resolve(&self.catalog, &selection)
        else {
            debug!(group_key, item_key, "open request did not resolve, ignoring");
            return false;
        };
        let group_key = self.catalog.groups[group_index].key.clone();
        let item_id = self.catalog.groups[group_index].items[item_index].id.clone();
        debug!(%group_key, item_index, "opening from click");
        self.state = ModalState::Open {
            group_key: group_key.clone(),
            item_index,
        };
        self.sync.sync_open(&group_key, &item_id);
        self.record_counter(CounterKind::View, &item_id);
        self.emit(ViewerEvent::Opened {
            group_key,
            item_index,
        });
        true
    }

    /// Close the modal (close button, click outside, Escape).
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }
        debug!("closing");
        self.state = ModalState::Closed;
        self.sync.sync_closed();
        self.emit(ViewerEvent::Closed);
    }

    /// Move to the next item of the open group.
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Move to the previous item of the open group.
    pub fn previous(&mut self) {
        self.step(false);
    }

    /// The global keyboard binding. Returns whether the event was
    /// consumed; a closed modal consumes nothing.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.state.is_open() {
            return false;
        }
        if key.is_plain(KeyCode::Escape) {
            self.close();
            return true;
        }
        if key.is_plain(KeyCode::Left) {
            self.previous();
            return true;
        }
        if key.is_plain(KeyCode::Right) {
            self.next();
            return true;
        }
        false
    }

    fn step(&mut self, forward: bool) {
        let Some((group_key, item_index)) = self
            .state
            .as_open()
            .map(|(key, index)| (key.to_string(), index))
        else {
            return;
        };
        let Some(group) = self.catalog.group(&group_key) else {
            warn!(%group_key, "open state no longer resolves, closing");
            self.close();
            return;
        };
        let len = group.item_count();
        if item_index >= len {
            warn!(%group_key, item_index, "open index out of bounds, closing");
            self.close();
            return;
        }
        let next_index = if forward {
            self.policy.step_forward(item_index, len)
        } else {
            self.policy.step_back(item_index, len)
        };
        if next_index == item_index {
            return;
        }
        let item_id = group.items[next_index].id.clone();
        self.state = ModalState::Open {
            group_key: group_key.clone(),
            item_index: next_index,
        };
        self.sync.sync_move(&group_key, &item_id);
        self.emit(ViewerEvent::SelectionMoved {
            item_index: next_index,
        });
    }

    // ── Engagement ───────────────────────────────────────────────────────

    /// Like an item once per browser profile.
    ///
    /// An already-liked item issues no network traffic and changes no
    /// count; returns whether the like was new.
    pub fn like(&mut self, item_id: &str) -> bool {
        if self.likes.is_liked(item_id) {
            debug!(item_id, "already liked, skipping");
            return false;
        }
        if let Err(e) = self.likes.mark_liked(item_id) {
            // The guard is best-effort too: a persistence failure must not
            // swallow the like itself.
            warn!(item_id, error = %e, "like guard persistence failed");
        }
        self.record_counter(CounterKind::Like, item_id);
        true
    }

    /// Count a share action.
    pub fn share(&mut self, item_id: &str) {
        self.record_counter(CounterKind::Share, item_id);
    }

    /// Count a WhatsApp contact click.
    pub fn whatsapp_click(&mut self, item_id: &str) {
        self.record_counter(CounterKind::WhatsappClick, item_id);
    }

    fn record_counter(&mut self, kind: CounterKind, item_id: &str) {
        self.counts.record(kind, item_id);
        self.telemetry.record(CounterUpdate::new(item_id, kind));
    }

    fn emit(&mut self, event: ViewerEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<H: HistoryBackend> fmt::Debug for ViewerController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerController")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .field("groups", &self.catalog.group_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
