use crate::app::{
    tea_model::AppModalState, ui_components::block::themed_block,
    view_model_context::ViewModelContext,
};
use convlist::list::ListEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Rows of the conversation list inside the controller's viewport.
#[derive(Debug, Clone, Default)]
pub struct ConversationListView;

impl ConversationListView {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for &ConversationListView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(model) = ViewModelContext::current() else {
            return;
        };
        let list = model.list();

        let border_color = match model.state() {
            AppModalState::Browsing if list.is_focused() => Color::Cyan,
            _ => Color::Gray,
        };
        let block = themed_block(format!(" Conversations ({}) ", list.entries().len()))
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let viewport = list.viewport();
        let selected = list.selected_entry();
        let rows = list
            .entries()
            .iter()
            .enumerate()
            .skip(viewport.offset)
            .take(inner.height as usize);

        for (index, entry) in rows {
            let is_selected = selected == Some(entry);
            let style = match (is_selected, list.is_focused()) {
                (true, true) => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::White).bg(Color::DarkGray),
                (false, _) if entry.is_inbox() => Style::default().fg(Color::Yellow),
                (false, _) => Style::default(),
            };

            let label = match entry {
                ListEntry::ConnectionRequests => "✉ Connection requests".to_string(),
                ListEntry::Conversation(_) => model.entry_title(entry),
            };
            let prefix = if is_selected { "> " } else { "  " };

            let row_area = Rect::new(
                inner.x,
                inner.y + (index - viewport.offset) as u16,
                inner.width,
                1,
            );
            Paragraph::new(Line::from(Span::styled(format!("{}{}", prefix, label), style)))
                .style(style)
                .render(row_area, buf);
        }

        let total = list.entries().len();
        if total > inner.height as usize {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(inner.height as usize))
                    .position(viewport.offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None)
                .render(
                    area.inner(Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    buf,
                    &mut scrollbar_state,
                );
        }
    }
}
