//! Simulated remote sync that mutates the backing list in the background.

use crate::app::event_msg::Msg;
use convlist::list::{
    ConversationId, ConversationRecord, ListChange, ListEntry, MemorySource, MessageId,
    MessageRecord,
};
use rand::Rng;
use std::time::Duration;

const TITLES: [&str; 8] = [
    "Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances",
];

const MESSAGES: [&str; 6] = [
    "Are we still on for tomorrow?",
    "Sent you the draft, take a look when you can.",
    "👍",
    "Running late, ten minutes.",
    "Can you call me back?",
    "That build is green again.",
];

/// One change pulled from the simulated server.
///
/// Conversations are addressed by rank so an operation stays meaningful
/// however the list changed while it was in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOp {
    NewConversation { id: String, title: String },
    DeleteConversation { rank: usize },
    MoveToTop { rank: usize },
    NewMessage { rank: usize, id: String, text: String },
    ToggleConnectionRequests,
}

pub fn random_op(rng: &mut impl Rng) -> SyncOp {
    let tag: u32 = rng.gen();
    match rng.gen_range(0..10) {
        0..=1 => SyncOp::NewConversation {
            id: format!("sync-{:08x}", tag),
            title: TITLES[rng.gen_range(0..TITLES.len())].to_string(),
        },
        2 => SyncOp::DeleteConversation {
            rank: rng.gen_range(0..64),
        },
        3..=4 => SyncOp::MoveToTop {
            rank: rng.gen_range(0..64),
        },
        5..=8 => SyncOp::NewMessage {
            rank: rng.gen_range(0..64),
            id: format!("msg-{:08x}", tag),
            text: MESSAGES[rng.gen_range(0..MESSAGES.len())].to_string(),
        },
        _ => SyncOp::ToggleConnectionRequests,
    }
}

/// Waits one interval, then reports the next change or a simulated failure.
pub async fn next_sync(interval: Duration) -> Msg {
    let result = {
        let mut rng = rand::thread_rng();
        if rng.gen_ratio(1, 15) {
            Err("sync request timed out".to_string())
        } else {
            Ok(random_op(&mut rng))
        }
    };

    tokio::time::sleep(interval).await;
    match result {
        Ok(op) => Msg::SyncArrived(op),
        Err(reason) => Msg::SyncFailed(reason),
    }
}

/// Applies `op` to `source`, returning the change to report to the list.
pub fn apply(op: &SyncOp, source: &MemorySource) -> ListChange {
    let ids = source.conversation_ids();

    match op {
        SyncOp::NewConversation { id, title } => {
            source.insert(0, ConversationRecord::new(id.clone(), title.clone()))
        }
        SyncOp::DeleteConversation { rank } => match by_rank(&ids, *rank) {
            Some(id) => source.remove(&ListEntry::Conversation(id.clone())),
            None => ListChange::default(),
        },
        SyncOp::MoveToTop { rank } => {
            if ids.is_empty() {
                ListChange::default()
            } else {
                source.move_conversation(rank % ids.len(), 0)
            }
        }
        SyncOp::NewMessage { rank, id, text } => {
            if let Some(conversation) = by_rank(&ids, *rank) {
                source.push_message(
                    conversation,
                    MessageRecord {
                        id: MessageId::new(id.clone()),
                        text: text.clone(),
                    },
                );
            }
            ListChange::default()
        }
        SyncOp::ToggleConnectionRequests => {
            source.set_connection_requests(!source.has_connection_requests())
        }
    }
}

fn by_rank(ids: &[ConversationId], rank: usize) -> Option<&ConversationId> {
    if ids.is_empty() {
        None
    } else {
        ids.get(rank % ids.len())
    }
}
