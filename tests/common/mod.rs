//! Common test utilities for the conversation list integration tests

#![allow(dead_code)]

pub mod assertions;
pub use assertions::*;

use convlist::list::{
    Completion, ConversationContent, ConversationId, ConversationListController,
    ConversationSource, ListChange, ListEntry, ListEvent, ListObserver, MemorySource, MessageId,
    ScrollConfig,
};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    time::Duration,
};

/// Shared, ordered record of everything a test wants to sequence.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Observer that keeps every event and mirrors it into an optional journal.
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<ListEvent>>,
    journal: Option<Journal>,
}

impl RecordingObserver {
    pub fn with_journal(journal: &Journal) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            journal: Some(journal.clone()),
        }
    }

    pub fn events(&self) -> Vec<ListEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<ListEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn selection_changes(&self) -> Vec<(ListEntry, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::SelectionChanged { entry, focus } => Some((entry.clone(), *focus)),
                _ => None,
            })
            .collect()
    }
}

impl ListObserver for RecordingObserver {
    fn on_list_event(&self, event: &ListEvent) {
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(event_label(event));
        }
        self.events.borrow_mut().push(event.clone());
    }
}

pub fn event_label(event: &ListEvent) -> String {
    match event {
        ListEvent::SelectionChanged { entry, focus } => format!("selected {} focus={}", entry, focus),
        ListEvent::WillSelectAfterDeletion { index_hint } => format!("will select row {}", index_hint),
        ListEvent::ListScrolled => "scrolled".to_string(),
        ListEvent::ActionMenuRequested { conversation, .. } => format!("menu {}", conversation),
    }
}

/// Completion that appends `label` to `journal` when fired.
pub fn journaled(journal: &Journal, label: &str) -> Completion {
    let journal = journal.clone();
    let label = label.to_string();
    Completion::new(move || journal.borrow_mut().push(label))
}

/// Completion that counts how often it fired.
pub fn counted() -> (Rc<Cell<u32>>, Completion) {
    let count = Rc::new(Cell::new(0));
    let fired = count.clone();
    (count, Completion::new(move || fired.set(fired.get() + 1)))
}

/// Content view that knows a fixed set of messages and settles on demand.
pub struct MockContent {
    positions: HashMap<MessageId, usize>,
    pending: RefCell<Vec<Completion>>,
    journal: Option<Journal>,
    settle_immediately: bool,
}

impl MockContent {
    pub fn new(messages: &[&str]) -> Self {
        Self {
            positions: messages
                .iter()
                .enumerate()
                .map(|(row, id)| (MessageId::new(*id), row * 3))
                .collect(),
            pending: RefCell::new(Vec::new()),
            journal: None,
            settle_immediately: false,
        }
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Some(journal.clone());
        self
    }

    pub fn immediate(mut self) -> Self {
        self.settle_immediately = true;
        self
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fires every pending completion, as if the content animation ended.
    pub fn settle(&self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for completion in pending {
            completion.fire();
        }
    }
}

impl ConversationContent for MockContent {
    fn message_position(&self, _conversation: &ConversationId, message: &MessageId) -> Option<usize> {
        self.positions.get(message).copied()
    }

    fn scroll_to_message(
        &self,
        conversation: &ConversationId,
        message: &MessageId,
        _animated: bool,
        completion: Completion,
    ) {
        if let Some(journal) = &self.journal {
            journal
                .borrow_mut()
                .push(format!("content {} {}", conversation, message));
        }
        if self.settle_immediately {
            completion.fire();
        } else {
            self.pending.borrow_mut().push(completion);
        }
    }
}

/// Backing list whose rows are replaced wholesale by the test.
#[derive(Default)]
pub struct ScriptedSource {
    entries: RefCell<Vec<ListEntry>>,
}

impl ScriptedSource {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }

    pub fn set(&self, entries: Vec<ListEntry>) {
        *self.entries.borrow_mut() = entries;
    }
}

impl ConversationSource for ScriptedSource {
    fn entries(&self) -> Vec<ListEntry> {
        self.entries.borrow().clone()
    }
}

pub fn entries(ids: &[&str]) -> Vec<ListEntry> {
    ids.iter().map(|id| ListEntry::conversation(*id)).collect()
}

pub fn deleted(ids: &[&str]) -> ListChange {
    ListChange {
        deleted: entries(ids),
        ..Default::default()
    }
}

pub fn animated_config() -> ScrollConfig {
    ScrollConfig {
        animation_duration: Duration::from_millis(100),
        scroll_margin: 1,
    }
}

/// A controller over `source` with a five row viewport and a recording observer.
pub struct Harness<S> {
    pub controller: ConversationListController,
    pub source: Rc<S>,
    pub observer: Rc<RecordingObserver>,
}

impl<S: ConversationSource + 'static> Harness<S> {
    pub fn new(source: S, config: ScrollConfig) -> Self {
        Self::with_observer(source, config, RecordingObserver::default())
    }

    pub fn with_observer(source: S, config: ScrollConfig, observer: RecordingObserver) -> Self {
        let source = Rc::new(source);
        let observer = Rc::new(observer);
        let mut controller = ConversationListController::new(source.clone(), config);
        controller.set_viewport_height(5);
        let dyn_observer: Rc<dyn ListObserver> = observer.clone();
        controller.set_observer(&dyn_observer);
        Self {
            controller,
            source,
            observer,
        }
    }

    pub fn attach_content(&mut self, content: &Rc<MockContent>) {
        let content: Rc<dyn ConversationContent> = content.clone();
        self.controller.set_content(Some(content));
    }

    /// Ticks until the list animation and job settle, at most `frames` times.
    pub fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.controller.tick(Duration::from_millis(16));
        }
    }
}

pub fn memory_harness(ids: &[&str]) -> Harness<MemorySource> {
    Harness::new(MemorySource::with_conversations(ids), ScrollConfig::default())
}

pub fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("c{:02}", i)).collect()
}
