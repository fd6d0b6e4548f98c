use crate::list::{
    completion::Completion,
    entry::{ListEntry, MessageId},
};

/// Which entry is current, and whether focus mode was requested with it.
///
/// Only the controller mutates this; callers get read access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<ListEntry>,
    focus_requested: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ListEntry> {
        self.current.as_ref()
    }

    pub fn focus_requested(&self) -> bool {
        self.focus_requested
    }

    pub fn has_selection(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_selected(&self, entry: &ListEntry) -> bool {
        self.current.as_ref() == Some(entry)
    }

    /// True when selecting `entry` with `focus` and `scroll_to` would change nothing.
    pub fn is_same_target(
        &self,
        entry: &ListEntry,
        focus: bool,
        scroll_to: Option<&MessageId>,
    ) -> bool {
        self.is_selected(entry) && self.focus_requested == focus && scroll_to.is_none()
    }

    pub(crate) fn commit(&mut self, entry: ListEntry, focus: bool) {
        self.current = Some(entry);
        self.focus_requested = focus;
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
        self.focus_requested = false;
    }
}

/// Parameters of one selection request.
#[derive(Debug, Default)]
pub struct SelectRequest {
    pub scroll_to: Option<MessageId>,
    pub focus: bool,
    pub animated: bool,
    pub completion: Completion,
}

impl SelectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to(mut self, message: MessageId) -> Self {
        self.scroll_to = Some(message);
        self
    }

    pub fn focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.completion = Completion::new(callback);
        self
    }

    pub fn completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }
}

/// Direction for stepping through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_target_requires_matching_focus_and_no_message() {
        let mut state = SelectionState::new();
        let entry = ListEntry::conversation("a");
        state.commit(entry.clone(), true);

        assert!(state.is_same_target(&entry, true, None));
        assert!(!state.is_same_target(&entry, false, None));
        assert!(!state.is_same_target(&entry, true, Some(&MessageId::new("m1"))));
        assert!(!state.is_same_target(&ListEntry::conversation("b"), true, None));
    }

    #[test]
    fn test_clear_resets_focus() {
        let mut state = SelectionState::new();
        state.commit(ListEntry::ConnectionRequests, true);
        state.clear();

        assert!(!state.has_selection());
        assert!(!state.focus_requested());
    }
}
