use crate::list::entry::{ConversationId, ListEntry};
use ratatui::layout::Rect;
use std::rc::{Rc, Weak};
use tokio::sync::mpsc;

/// Lifecycle events emitted by the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// An entry was opened or its focus mode changed
    SelectionChanged { entry: ListEntry, focus: bool },
    /// Sent before the selection moves to a successor of a deleted entry
    WillSelectAfterDeletion { index_hint: usize },
    /// The user scrolled the list
    ListScrolled,
    /// Long-press on a conversation row, with the row's screen area
    ActionMenuRequested {
        conversation: ConversationId,
        anchor: Rect,
    },
}

/// Receiver of [`ListEvent`]s.
///
/// Events arrive synchronously on the thread that caused them. Observers must
/// not call back into the controller from inside `on_list_event`.
pub trait ListObserver {
    fn on_list_event(&self, event: &ListEvent);
}

/// Delivers events to at most one observer without owning it.
#[derive(Default)]
pub struct NotificationRelay {
    observer: Option<Weak<dyn ListObserver>>,
}

impl NotificationRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_observer(&mut self, observer: &Rc<dyn ListObserver>) {
        self.observer = Some(Rc::downgrade(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn has_observer(&self) -> bool {
        self.observer
            .as_ref()
            .map(|observer| observer.strong_count() > 0)
            .unwrap_or(false)
    }

    pub fn emit(&self, event: ListEvent) {
        match self.observer.as_ref().and_then(Weak::upgrade) {
            Some(observer) => {
                tracing::debug!("List event: {:?}", event);
                observer.on_list_event(&event);
            }
            None => tracing::trace!("No observer for list event {:?}", event),
        }
    }
}

impl std::fmt::Debug for NotificationRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRelay")
            .field("has_observer", &self.has_observer())
            .finish()
    }
}

/// Observer forwarding every event into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<ListEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ListEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ListObserver for ChannelObserver {
    fn on_list_event(&self, event: &ListEvent) {
        if let Err(e) = self.sender.send(event.clone()) {
            tracing::warn!("Dropping list event, receiver closed: {:?}", e.0);
        }
    }
}
