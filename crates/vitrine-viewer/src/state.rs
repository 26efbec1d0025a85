#![forbid(unsafe_code)]

//! Modal visibility state machine.
//!
//! Two states: closed, or open on a (group, item-index) pair. The
//! invariant the controller maintains: whenever the state is
//! [`ModalState::Open`], the group key resolves in the catalog and the
//! index is in bounds. Any operation that would break the invariant closes
//! the modal instead.
//!
//! The source system shipped two modal implementations that disagreed on
//! next/previous boundary behavior (clamp at the ends vs. modular
//! wraparound). Here that is one mechanism with an explicit
//! [`BoundaryPolicy`], applied uniformly.

/// Visibility state of the viewer modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    /// No item is displayed.
    Closed,
    /// The modal shows one item of one group.
    Open {
        /// Key of the displayed group.
        group_key: String,
        /// Index of the displayed item within the group.
        item_index: usize,
    },
}

impl ModalState {
    /// Whether the modal is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }

    /// The open selection, if any.
    #[must_use]
    pub fn as_open(&self) -> Option<(&str, usize)> {
        match self {
            ModalState::Open {
                group_key,
                item_index,
            } => Some((group_key.as_str(), *item_index)),
            ModalState::Closed => None,
        }
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::Closed
    }
}

/// What next/previous does at the ends of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Stop at the first/last item.
    #[default]
    Clamp,
    /// Wrap around to the other end.
    Wrap,
}

impl BoundaryPolicy {
    /// Index after a "next" step from `index` in a group of `len` items.
    ///
    /// `len == 0` returns `index` unchanged; the caller closes the modal
    /// before an empty group can be stepped through.
    #[must_use]
    pub fn step_forward(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return index;
        }
        match self {
            BoundaryPolicy::Clamp => (index + 1).min(len - 1),
            BoundaryPolicy::Wrap => (index + 1) % len,
        }
    }

    /// Index after a "previous" step from `index` in a group of `len` items.
    #[must_use]
    pub fn step_back(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return index;
        }
        match self {
            BoundaryPolicy::Clamp => index.saturating_sub(1),
            BoundaryPolicy::Wrap => (index + len - 1) % len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_stops_at_last_index() {
        assert_eq!(BoundaryPolicy::Clamp.step_forward(2, 3), 2);
        assert_eq!(BoundaryPolicy::Clamp.step_forward(0, 3), 1);
    }

    #[test]
    fn clamp_stops_at_first_index() {
        assert_eq!(BoundaryPolicy::Clamp.step_back(0, 3), 0);
        assert_eq!(BoundaryPolicy::Clamp.step_back(2, 3), 1);
    }

    #[test]
    fn wrap_cycles_forward() {
        assert_eq!(BoundaryPolicy::Wrap.step_forward(2, 3), 0);
        assert_eq!(BoundaryPolicy::Wrap.step_forward(0, 3), 1);
    }

    #[test]
    fn wrap_cycles_backward() {
        assert_eq!(BoundaryPolicy::Wrap.step_back(0, 3), 2);
        assert_eq!(BoundaryPolicy::Wrap.step_back(1, 3), 0);
    }

    #[test]
    fn single_item_group_is_a_fixed_point() {
        for policy in [BoundaryPolicy::Clamp, BoundaryPolicy::Wrap] {
            assert_eq!(policy.step_forward(0, 1), 0);
            assert_eq!(policy.step_back(0, 1), 0);
        }
    }

    #[test]
    fn empty_len_returns_index_unchanged() {
        assert_eq!(BoundaryPolicy::Clamp.step_forward(5, 0), 5);
        assert_eq!(BoundaryPolicy::Wrap.step_back(5, 0), 5);
    }

    #[test]
    fn modal_state_accessors() {
        let open = ModalState::Open {
            group_key: "praia".to_string(),
            item_index: 1,
        };
        assert!(open.is_open());
        assert_eq!(open.as_open(), Some(("praia", 1)));
        assert!(!ModalState::Closed.is_open());
        assert_eq!(ModalState::default(), ModalState::Closed);
    }
}
