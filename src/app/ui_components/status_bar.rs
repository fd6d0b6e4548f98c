use crate::app::view_model_context::ViewModelContext;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use throbber_widgets_tui::Throbber;

#[derive(Debug, Clone, Default)]
pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(model) = ViewModelContext::current() else {
            return;
        };
        let model = model.get();

        let activity_label = if model.list.is_scrolling() {
            "Scrolling list"
        } else if model.message_pane.is_animating() {
            "Scrolling messages"
        } else if model.sync_enabled && model.active_task_count > 0 {
            "Syncing"
        } else if model.sync_enabled {
            "Ready"
        } else {
            "Ready (sync paused)"
        };

        let event_text = model.last_event.clone().unwrap_or_default();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22), // Activity
                Constraint::Min(10),    // Selection
                Constraint::Length(event_text.chars().count() as u16 + 1),
            ])
            .split(area);

        if model.is_busy() {
            Throbber::default()
                .label(activity_label)
                .render(chunks[0], buf);
        } else {
            Paragraph::new(activity_label).render(chunks[0], buf);
        }

        let selection = format!(
            "{} · {} settled",
            model.selection_summary(),
            model.settled_scroll_count()
        );
        Paragraph::new(Line::from(Span::styled(
            selection,
            Style::default().fg(Color::Gray),
        )))
        .render(chunks[1], buf);

        Paragraph::new(Line::from(Span::styled(
            event_text,
            Style::default().fg(Color::DarkGray),
        )))
        .render(chunks[2], buf);
    }
}
