//! In-memory backing list, loadable from a JSON fixture.

use crate::list::{
    entry::{ConversationId, ListEntry, MessageId},
    source::{ConversationSource, ListChange},
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
}

impl ConversationRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ConversationId::new(id),
            title: title.into(),
            messages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub connection_requests: bool,
    #[serde(default)]
    pub conversations: Vec<ConversationRecord>,
}

/// Backing list kept in memory; every mutation returns the matching [`ListChange`].
///
/// The connection-requests entry, when present, is always the first row.
#[derive(Debug, Default)]
pub struct MemorySource {
    state: RefCell<Fixture>,
}

impl MemorySource {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            state: RefCell::new(fixture),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Conversations titled after their ids, without messages.
    pub fn with_conversations(ids: &[&str]) -> Self {
        Self::new(Fixture {
            connection_requests: false,
            conversations: ids
                .iter()
                .map(|id| ConversationRecord::new(*id, *id))
                .collect(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.state.borrow())
    }

    pub fn len(&self) -> usize {
        let state = self.state.borrow();
        state.conversations.len() + usize::from(state.connection_requests)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_connection_requests(&self) -> bool {
        self.state.borrow().connection_requests
    }

    pub fn conversation(&self, id: &ConversationId) -> Option<ConversationRecord> {
        self.state
            .borrow()
            .conversations
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    pub fn title(&self, entry: &ListEntry) -> String {
        match entry {
            ListEntry::ConnectionRequests => "Connection requests".to_string(),
            ListEntry::Conversation(id) => self
                .conversation(id)
                .map(|record| record.title)
                .unwrap_or_else(|| id.to_string()),
        }
    }

    pub fn conversation_ids(&self) -> Vec<ConversationId> {
        self.state
            .borrow()
            .conversations
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }

    /// Appends a message; the list itself does not change.
    pub fn push_message(&self, id: &ConversationId, message: MessageRecord) -> bool {
        let mut state = self.state.borrow_mut();
        match state.conversations.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                record.messages.push(message);
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, entry: &ListEntry) -> ListChange {
        let mut state = self.state.borrow_mut();
        let removed = match entry {
            ListEntry::ConnectionRequests => {
                std::mem::replace(&mut state.connection_requests, false)
            }
            ListEntry::Conversation(id) => {
                let before = state.conversations.len();
                state.conversations.retain(|record| &record.id != id);
                state.conversations.len() != before
            }
        };

        if removed {
            ListChange::deletion(entry.clone())
        } else {
            ListChange::default()
        }
    }

    /// Inserts `record` at conversation position `position`, clamped to the end.
    pub fn insert(&self, position: usize, record: ConversationRecord) -> ListChange {
        let mut state = self.state.borrow_mut();
        let position = position.min(state.conversations.len());
        state.conversations.insert(position, record);
        ListChange::insertion(position + usize::from(state.connection_requests))
    }

    pub fn move_conversation(&self, from: usize, to: usize) -> ListChange {
        let mut state = self.state.borrow_mut();
        let len = state.conversations.len();
        if from >= len || to >= len || from == to {
            return ListChange::default();
        }
        let record = state.conversations.remove(from);
        state.conversations.insert(to, record);

        let shift = usize::from(state.connection_requests);
        ListChange {
            moved: vec![(from + shift, to + shift)],
            ..Default::default()
        }
    }

    pub fn set_connection_requests(&self, present: bool) -> ListChange {
        let mut state = self.state.borrow_mut();
        if state.connection_requests == present {
            return ListChange::default();
        }
        state.connection_requests = present;
        if present {
            ListChange::insertion(0)
        } else {
            ListChange::deletion(ListEntry::ConnectionRequests)
        }
    }
}

impl ConversationSource for MemorySource {
    fn entries(&self) -> Vec<ListEntry> {
        let state = self.state.borrow();
        let inbox = state
            .connection_requests
            .then_some(ListEntry::ConnectionRequests);
        inbox
            .into_iter()
            .chain(
                state
                    .conversations
                    .iter()
                    .map(|record| ListEntry::Conversation(record.id.clone())),
            )
            .collect()
    }
}
