//! Collaborator interfaces the controller consumes.

use crate::list::{
    completion::Completion,
    entry::{ConversationId, ListEntry, MessageId},
};

/// The externally owned, ordered backing list.
pub trait ConversationSource {
    /// Current ordered snapshot of every row.
    fn entries(&self) -> Vec<ListEntry>;
}

/// Content view of a single conversation, able to scroll to a message.
pub trait ConversationContent {
    /// Row of `message` inside the rendered content of `conversation`.
    fn message_position(&self, conversation: &ConversationId, message: &MessageId)
        -> Option<usize>;

    /// Scrolls the content to `message`, firing `completion` once settled.
    ///
    /// Implementations may fire the completion before returning.
    fn scroll_to_message(
        &self,
        conversation: &ConversationId,
        message: &MessageId,
        animated: bool,
        completion: Completion,
    );
}

/// Ordered-sequence change reported by the backing list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChange {
    /// Indexes in the new list
    pub inserted: Vec<usize>,
    /// Entries no longer in the list
    pub deleted: Vec<ListEntry>,
    /// `(old index, new index)` pairs
    pub moved: Vec<(usize, usize)>,
}

impl ListChange {
    pub fn deletion(entry: ListEntry) -> Self {
        Self {
            deleted: vec![entry],
            ..Default::default()
        }
    }

    pub fn insertion(index: usize) -> Self {
        Self {
            inserted: vec![index],
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty() && self.moved.is_empty()
    }

    pub fn deletes(&self, entry: &ListEntry) -> bool {
        self.deleted.contains(entry)
    }
}
