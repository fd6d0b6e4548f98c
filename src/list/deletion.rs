use crate::list::{binding::ListBinding, entry::ListEntry, source::ListChange};

/// Successor chosen after the selected entry left the list.
///
/// Produced and consumed within a single change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub next_candidate: Option<ListEntry>,
    pub index_hint: Option<usize>,
}

impl PendingSelection {
    fn none() -> Self {
        Self {
            next_candidate: None,
            index_hint: None,
        }
    }
}

/// Picks the next selection when the current one is deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletionReconciler;

impl DeletionReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Deleted entries the binding never tracked; they are ignored.
    pub fn stale_deletions<'a>(
        &self,
        change: &'a ListChange,
        binding: &ListBinding,
    ) -> Vec<&'a ListEntry> {
        change
            .deleted
            .iter()
            .filter(|entry| !binding.contains(entry))
            .collect()
    }

    /// Decides the successor for `selected`, or `None` when no reconciliation is needed.
    ///
    /// `previous_index` is the selection's row before the change; `binding`
    /// already reflects the list after it. The successor is the entry that
    /// slid into the vacated row, else the new last entry, else nothing.
    pub fn reconcile(
        &self,
        selected: Option<&ListEntry>,
        previous_index: Option<usize>,
        change: &ListChange,
        binding: &ListBinding,
    ) -> Option<PendingSelection> {
        let selected = selected?;

        // A delete that the same change undoes with an insert or move is not a removal
        if binding.contains(selected) {
            if change.deletes(selected) {
                tracing::debug!("Selected entry {} was deleted and re-inserted", selected);
            }
            return None;
        }

        let Some(previous_index) = previous_index else {
            tracing::debug!("Selected entry {} was never tracked, ignoring removal", selected);
            return None;
        };

        if binding.is_empty() {
            tracing::debug!("Selected entry {} removed, list is now empty", selected);
            return Some(PendingSelection::none());
        }

        let candidate = binding
            .entry_at(previous_index)
            .or_else(|| binding.last())
            .cloned();
        let index_hint = candidate.as_ref().and_then(|entry| binding.index_of(entry));

        tracing::debug!(
            "Selected entry {} removed from row {}, successor {:?} at {:?}",
            selected,
            previous_index,
            candidate,
            index_hint
        );

        Some(PendingSelection {
            next_candidate: candidate,
            index_hint,
        })
    }
}
