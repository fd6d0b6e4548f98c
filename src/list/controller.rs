//! Selection and scroll controller for the conversation list.

use crate::list::{
    binding::ListBinding,
    completion::Completion,
    deletion::{DeletionReconciler, PendingSelection},
    entry::ListEntry,
    error::{Result, SelectionError},
    relay::{ListEvent, ListObserver, NotificationRelay},
    scroll::{ScrollConfig, ScrollCoordinator, ScrollJob, Viewport},
    selection::{Direction, SelectRequest, SelectionState},
    source::{ConversationContent, ConversationSource, ListChange},
    tracing_macros::trace_hot_path,
};
use ratatui::layout::Rect;
use std::{rc::Rc, time::Duration};

/// Decides which entry of the backing list is current and keeps it visible.
///
/// All entry points run on the UI thread. Observers are notified
/// synchronously from inside the call that caused the event, so they must
/// not re-enter the controller.
pub struct ConversationListController {
    source: Rc<dyn ConversationSource>,
    content: Option<Rc<dyn ConversationContent>>,
    binding: ListBinding,
    selection: SelectionState,
    // Last row the selection was seen at; survives a reload that dropped it
    selected_row: Option<usize>,
    scroll: ScrollCoordinator,
    reconciler: DeletionReconciler,
    relay: NotificationRelay,
    generation: u64,
}

impl ConversationListController {
    pub fn new(source: Rc<dyn ConversationSource>, config: ScrollConfig) -> Self {
        let binding = ListBinding::from_source(source.as_ref());
        tracing::debug!("Conversation list bound with {} entries", binding.len());

        Self {
            source,
            content: None,
            binding,
            selection: SelectionState::new(),
            selected_row: None,
            scroll: ScrollCoordinator::new(config),
            reconciler: DeletionReconciler::new(),
            relay: NotificationRelay::new(),
            generation: 0,
        }
    }

    pub fn with_content(mut self, content: Rc<dyn ConversationContent>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn set_content(&mut self, content: Option<Rc<dyn ConversationContent>>) {
        self.content = content;
    }

    pub fn set_observer(&mut self, observer: &Rc<dyn ListObserver>) {
        self.relay.set_observer(observer);
    }

    pub fn clear_observer(&mut self) {
        self.relay.clear_observer();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.selection.current()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
            .current()
            .and_then(|entry| self.binding.index_of(entry))
    }

    pub fn is_focused(&self) -> bool {
        self.selection.focus_requested()
    }

    pub fn viewport(&self) -> Viewport {
        self.scroll.viewport()
    }

    pub fn entries(&self) -> &[ListEntry] {
        self.binding.entries()
    }

    /// True while a programmatic scroll is animating or waiting on the content view.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_animating() || self.scroll.has_pending_job()
    }

    /// Bumped on every reload, so renderers know cached rows are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selects `entry`, returning false when it is not in the list.
    pub fn select(&mut self, entry: &ListEntry, request: SelectRequest) -> bool {
        match self.try_select(entry, request) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Select rejected: {}", e);
                false
            }
        }
    }

    /// Like [`select`](Self::select) but reports why a request was rejected.
    ///
    /// A rejected request leaves the selection untouched and drops its
    /// completion without running it.
    pub fn try_select(&mut self, entry: &ListEntry, request: SelectRequest) -> Result<()> {
        let index = self
            .binding
            .index_of(entry)
            .ok_or_else(|| SelectionError::InvalidTarget(entry.clone()))?;

        let SelectRequest {
            scroll_to,
            focus,
            animated,
            completion,
        } = request;

        if self
            .selection
            .is_same_target(entry, focus, scroll_to.as_ref())
        {
            trace_hot_path!("Reselected {} with unchanged parameters", entry);
            self.scroll.complete_with(entry, completion);
            return Ok(());
        }

        tracing::debug!(
            "Selecting {} at row {} (focus={}, animated={}, message={:?})",
            entry,
            index,
            focus,
            animated,
            scroll_to
        );
        self.selection.commit(entry.clone(), focus);
        self.selected_row = Some(index);
        self.relay.emit(ListEvent::SelectionChanged {
            entry: entry.clone(),
            focus,
        });

        let job = ScrollJob::new(entry.clone(), scroll_to, animated, completion);
        self.scroll
            .begin(job, index, self.binding.len(), self.content.as_deref());
        Ok(())
    }

    /// Clears the selection without notifying the observer.
    pub fn deselect_all(&mut self) {
        if let Some(previous) = self.selection.current() {
            tracing::debug!("Deselecting {}", previous);
        }
        self.selection.clear();
        self.selected_row = None;
    }

    /// Re-reads the backing list. The selection is left as is.
    pub fn reload(&mut self) {
        self.rebind();
        if let Some(current) = self.selection.current() {
            if !self.binding.contains(current) {
                tracing::warn!(
                    "Selected entry {} is no longer listed after reload",
                    current
                );
            }
        }
    }

    /// Brings the selected row back into view, keeping any unconsumed message target.
    ///
    /// Returns false, dropping `completion`, when nothing listed is selected.
    pub fn scroll_to_current_selection(&mut self, animated: bool, completion: Completion) -> bool {
        let Some(entry) = self.selection.current().cloned() else {
            return false;
        };
        let Some(index) = self.binding.index_of(&entry) else {
            tracing::debug!("Cannot scroll to {}, it is not listed", entry);
            return false;
        };

        let message = self.scroll.pending_message().cloned();
        let job = ScrollJob::new(entry, message, animated, completion);
        self.scroll
            .begin(job, index, self.binding.len(), self.content.as_deref());
        true
    }

    /// Selects the connection-requests entry, returning false when none is listed.
    pub fn select_inbox_and_focus_on_view(&mut self, focus: bool) -> bool {
        if self.binding.inbox_index().is_none() {
            tracing::debug!("Select rejected: {}", SelectionError::EmptyInbox);
            return false;
        }
        self.select(
            &ListEntry::ConnectionRequests,
            SelectRequest::new().focus(focus).animated(true),
        )
    }

    /// Selects the neighbour of the current entry, or the first entry when none is selected.
    pub fn select_adjacent(&mut self, direction: Direction, request: SelectRequest) -> bool {
        let target = match self.selected_index() {
            None => 0,
            Some(index) => match direction {
                Direction::Up => match index.checked_sub(1) {
                    Some(previous) => previous,
                    None => return self.reject(SelectionError::OutOfBounds),
                },
                Direction::Down => index + 1,
            },
        };

        let Some(entry) = self.binding.entry_at(target).cloned() else {
            return self.reject(SelectionError::OutOfBounds);
        };
        self.select(&entry, request)
    }

    /// Applies a change reported by the backing list.
    ///
    /// When the selected entry was removed, the observer first receives
    /// [`ListEvent::WillSelectAfterDeletion`] and then the successor is
    /// selected without animation. With no successor the selection clears.
    pub fn apply_changes(&mut self, change: ListChange) {
        if change.is_empty() {
            return;
        }

        let selected = self.selection.current().cloned();
        let previous_index = selected
            .as_ref()
            .and_then(|entry| self.binding.index_of(entry))
            .or(self.selected_row);

        let stale = self.reconciler.stale_deletions(&change, &self.binding);
        if !stale.is_empty() {
            tracing::debug!("Ignoring deletions of untracked entries: {:?}", stale);
        }

        self.rebind();

        let Some(pending) =
            self.reconciler
                .reconcile(selected.as_ref(), previous_index, &change, &self.binding)
        else {
            if let Some(index) = self.selected_index() {
                self.selected_row = Some(index);
            }
            return;
        };

        match pending {
            PendingSelection {
                next_candidate: Some(candidate),
                index_hint,
            } => {
                if let Some(index_hint) = index_hint {
                    self.relay
                        .emit(ListEvent::WillSelectAfterDeletion { index_hint });
                }
                if !self.select(&candidate, SelectRequest::new()) {
                    self.deselect_all();
                }
            }
            PendingSelection {
                next_candidate: None,
                ..
            } => self.deselect_all(),
        }
    }

    /// Advances programmatic scrolling; returns whether the viewport moved.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.scroll.tick(elapsed, self.content.as_deref())
    }

    /// Scrolls the list on behalf of the user and notifies the observer.
    pub fn user_scrolled(&mut self, delta_rows: isize) -> bool {
        let moved = self
            .scroll
            .user_scroll(delta_rows, self.binding.len(), self.content.as_deref());
        self.relay.emit(ListEvent::ListScrolled);
        moved
    }

    /// Relays a long-press on `entry` whose row occupies `anchor`.
    pub fn request_action_menu(&mut self, entry: &ListEntry, anchor: Rect) {
        let Some(conversation) = entry.conversation_id() else {
            tracing::debug!("No action menu for {}", entry);
            return;
        };
        self.relay.emit(ListEvent::ActionMenuRequested {
            conversation: conversation.clone(),
            anchor,
        });
    }

    pub fn set_viewport_height(&mut self, rows: usize) {
        self.scroll.set_viewport_height(rows, self.binding.len());
    }

    fn rebind(&mut self) {
        self.binding.reload(self.source.as_ref());
        self.scroll.clamp(self.binding.len());
        self.generation += 1;
        if let Some(index) = self.selected_index() {
            self.selected_row = Some(index);
        }
    }

    fn reject(&self, error: SelectionError) -> bool {
        tracing::debug!("Select rejected: {}", error);
        false
    }
}

impl std::fmt::Debug for ConversationListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationListController")
            .field("entries", &self.binding.len())
            .field("selection", &self.selection)
            .field("scroll", &self.scroll)
            .field("relay", &self.relay)
            .finish()
    }
}
