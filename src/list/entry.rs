use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Stable handle for one conversation in the backing list.
///
/// The controller only ever stores these handles, never conversation content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Handle for one message inside a conversation, used only as a scroll target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One selectable row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListEntry {
    /// Synthetic inbox row holding pending connection requests
    ConnectionRequests,
    Conversation(ConversationId),
}

impl ListEntry {
    pub fn conversation(id: impl Into<String>) -> Self {
        ListEntry::Conversation(ConversationId::new(id))
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        match self {
            ListEntry::Conversation(id) => Some(id),
            ListEntry::ConnectionRequests => None,
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, ListEntry::ConnectionRequests)
    }
}

impl Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListEntry::ConnectionRequests => write!(f, "<connection requests>"),
            ListEntry::Conversation(id) => write!(f, "{}", id),
        }
    }
}

impl From<ConversationId> for ListEntry {
    fn from(id: ConversationId) -> Self {
        ListEntry::Conversation(id)
    }
}
