use crate::app::{
    tea_model::{AppModalState, Model},
    ui_components::{ConversationListView, StatusBar},
    view_model_context::ViewModelContext,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Screen regions of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub list: Rect,
    pub content: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(vertical[0]);

    AppLayout {
        list: horizontal[0],
        content: horizontal[1],
        status: vertical[1],
    }
}

pub fn view(model: &Model, frame: &mut Frame) {
    ViewModelContext::with_model(model, || {
        let regions = layout(frame.area());

        frame.render_widget(&ConversationListView::new(), regions.list);
        frame.render_widget(model.message_pane.as_ref(), regions.content);
        frame.render_widget(&StatusBar::new(), regions.status);

        if matches!(model.state, AppModalState::ActionMenu) {
            frame.render_widget(&model.action_menu, frame.area());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tea_model::tests::test_model;
    use convlist::list::{ListEntry, SelectRequest};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(model: &Model) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|f| view(model, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_layout_splits_list_and_content() {
        let regions = layout(Rect::new(0, 0, 100, 30));
        assert_eq!(regions.status.height, 1);
        assert_eq!(regions.list.height, 29);
        assert_eq!(regions.list.width + regions.content.width, 100);
    }

    #[test]
    fn test_selected_row_is_marked() {
        let (mut model, _events) = test_model(&["alpha", "beta"]);
        model
            .list
            .select(&ListEntry::conversation("beta"), SelectRequest::new());

        let screen = rendered(&model);
        assert!(screen.contains("> beta"));
        assert!(screen.contains("  alpha"));
        assert!(screen.contains("Conversations (2)"));
    }

    #[test]
    fn test_empty_pane_placeholder() {
        let (model, _events) = test_model(&["alpha"]);
        assert!(rendered(&model).contains("No conversation open"));
    }
}
