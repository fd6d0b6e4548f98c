use crate::app::{
    config::UserConfig,
    tea_view::{layout, AppLayout},
    ui_components::{ActionMenu, MessagePane},
};
use convlist::list::{
    Completion, ConversationListController, ListEntry, ListObserver, MemorySource,
};
use ratatui::layout::{Margin, Rect};
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub enum AppModalState {
    Browsing,
    ActionMenu,
    Quit,
}

pub struct Model {
    pub config: UserConfig,
    pub state: AppModalState,
    // Backing list and the views that read it
    pub source: Rc<MemorySource>,
    pub message_pane: Rc<MessagePane>,
    pub list: ConversationListController,
    pub action_menu: ActionMenu,
    // Terminal area the layout was computed for
    pub area: Rect,
    pub active_task_count: usize,
    pub sync_enabled: bool,
    pub last_event: Option<String>,
    settled_scrolls: Rc<Cell<u32>>,
    // The controller only holds a weak reference
    _observer: Rc<dyn ListObserver>,
}

impl Model {
    pub fn new(config: UserConfig, source: MemorySource, observer: Rc<dyn ListObserver>) -> Self {
        let source = Rc::new(source);
        let scroll_config = config.scroll_config();
        let message_pane = Rc::new(MessagePane::new(
            source.clone(),
            scroll_config.animation_duration,
        ));

        let mut list = ConversationListController::new(source.clone(), scroll_config)
            .with_content(message_pane.clone());
        list.set_observer(&observer);

        let sync_enabled = config.sync_simulation;
        Model {
            config,
            state: AppModalState::Browsing,
            source,
            message_pane,
            list,
            action_menu: ActionMenu::new(),
            area: Rect::default(),
            active_task_count: 0,
            sync_enabled,
            last_event: None,
            settled_scrolls: Rc::new(Cell::new(0)),
            _observer: observer,
        }
    }

    pub fn layout(&self) -> AppLayout {
        layout(self.area)
    }

    /// Recomputes the layout and tells the list and the pane their new sizes.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        let layout = self.layout();

        let list_inner = layout.list.inner(Margin::new(1, 1));
        self.list.set_viewport_height(list_inner.height as usize);

        let content_inner = layout.content.inner(Margin::new(1, 1));
        self.message_pane
            .set_area(content_inner.width, content_inner.height);
    }

    /// Screen area of the row showing `entry`, when it is visible.
    pub fn row_anchor(&self, entry: &ListEntry) -> Option<Rect> {
        let index = self.list.entries().iter().position(|e| e == entry)?;
        let viewport = self.list.viewport();
        if !viewport.contains(index) {
            return None;
        }

        let inner = self.layout().list.inner(Margin::new(1, 1));
        let row = (index - viewport.offset) as u16;
        if row >= inner.height {
            return None;
        }
        Some(Rect::new(inner.x, inner.y + row, inner.width, 1))
    }

    /// Completion that counts settled scrolls, shown in the status bar.
    pub fn tracked_completion(&self) -> Completion {
        let settled = self.settled_scrolls.clone();
        Completion::new(move || settled.set(settled.get() + 1))
    }

    pub fn settled_scroll_count(&self) -> u32 {
        self.settled_scrolls.get()
    }

    pub fn is_busy(&self) -> bool {
        self.list.is_scrolling()
            || self.message_pane.is_animating()
            || (self.sync_enabled && self.active_task_count > 0)
    }

    pub fn entry_title(&self, entry: &ListEntry) -> String {
        self.source.title(entry)
    }

    pub fn selection_summary(&self) -> String {
        match (self.list.selected_entry(), self.list.selected_index()) {
            (Some(entry), Some(index)) => format!(
                "{} · {}/{}{}",
                self.entry_title(entry),
                index + 1,
                self.list.entries().len(),
                if self.list.is_focused() { " · focused" } else { "" }
            ),
            (Some(entry), None) => format!("{} · not listed", entry),
            (None, _) => format!("{} conversations", self.list.entries().len()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use convlist::list::{ChannelObserver, ListEvent};
    use tokio::sync::mpsc;

    pub(crate) fn test_model(ids: &[&str]) -> (Model, mpsc::UnboundedReceiver<ListEvent>) {
        let config = UserConfig {
            sync_simulation: false,
            animation_duration_ms: 100,
            ..Default::default()
        };
        let (observer, events) = ChannelObserver::new();
        let mut model = Model::new(config, MemorySource::with_conversations(ids), Rc::new(observer));
        model.resize(Rect::new(0, 0, 80, 12));
        (model, events)
    }

    #[test]
    fn test_resize_sets_list_viewport() {
        let (model, _events) = test_model(&["a", "b"]);
        let list_inner = model.layout().list.inner(Margin::new(1, 1));
        assert_eq!(model.list.viewport().height, list_inner.height as usize);
    }

    #[test]
    fn test_row_anchor_only_for_visible_rows() {
        let ids: Vec<String> = (0..40).map(|i| format!("c{}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let (model, _events) = test_model(&refs);

        let first = model.row_anchor(&ListEntry::conversation("c0")).unwrap();
        assert_eq!(first.height, 1);
        assert!(model.row_anchor(&ListEntry::conversation("c39")).is_none());
    }

    #[test]
    fn test_tracked_completion_counts() {
        let (model, _events) = test_model(&["a"]);
        model.tracked_completion().fire();
        model.tracked_completion().fire();
        assert_eq!(model.settled_scroll_count(), 2);
    }
}
