use crate::list::{entry::ListEntry, source::ConversationSource};
use std::collections::HashMap;

/// Position mapping between list entries and rows.
///
/// The mapping is a snapshot: it only changes on [`ListBinding::reload`], so
/// between a backing-list mutation and the next reload it still answers with
/// the pre-change positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBinding {
    entries: Vec<ListEntry>,
    positions: HashMap<ListEntry, usize>,
}

impl ListBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(source: &dyn ConversationSource) -> Self {
        let mut binding = Self::new();
        binding.reload(source);
        binding
    }

    pub fn reload(&mut self, source: &dyn ConversationSource) {
        self.entries = source.entries();
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.clone(), index))
            .collect();

        if self.positions.len() != self.entries.len() {
            tracing::warn!(
                "Backing list holds duplicate entries ({} rows, {} distinct)",
                self.entries.len(),
                self.positions.len()
            );
        }
    }

    pub fn index_of(&self, entry: &ListEntry) -> Option<usize> {
        self.positions.get(entry).copied()
    }

    pub fn entry_at(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, entry: &ListEntry) -> bool {
        self.positions.contains_key(entry)
    }

    pub fn inbox_index(&self) -> Option<usize> {
        self.index_of(&ListEntry::ConnectionRequests)
    }

    pub fn last(&self) -> Option<&ListEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
