use convlist::list::ConversationId;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMenuItem {
    MoveToTop,
    Delete,
    Cancel,
}

impl ActionMenuItem {
    pub const ALL: [ActionMenuItem; 3] = [Self::MoveToTop, Self::Delete, Self::Cancel];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MoveToTop => "Move to top",
            Self::Delete => "Delete conversation",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionMenuEvent {
    Up,
    Down,
    Select,
    Cancel,
}

/// Popup of actions for one conversation, drawn next to the row it was opened from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionMenu {
    target: Option<ConversationId>,
    title: String,
    anchor: Rect,
    selected_index: usize,
}

impl ActionMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, conversation: ConversationId, title: String, anchor: Rect) {
        tracing::debug!("Opening action menu for {} at {:?}", conversation, anchor);
        self.target = Some(conversation);
        self.title = title;
        self.anchor = anchor;
        self.selected_index = 0;
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&ConversationId> {
        self.target.as_ref()
    }

    pub fn selected_item(&self) -> ActionMenuItem {
        ActionMenuItem::ALL[self.selected_index % ActionMenuItem::ALL.len()]
    }

    /// Returns the chosen item on `Select`, or `Cancel` when dismissed.
    pub fn handle_event(&mut self, event: ActionMenuEvent) -> Option<ActionMenuItem> {
        let count = ActionMenuItem::ALL.len();
        match event {
            ActionMenuEvent::Up => {
                self.selected_index = if self.selected_index == 0 {
                    count - 1
                } else {
                    self.selected_index - 1
                };
                None
            }
            ActionMenuEvent::Down => {
                self.selected_index = (self.selected_index + 1) % count;
                None
            }
            ActionMenuEvent::Select => self.is_visible().then(|| self.selected_item()),
            ActionMenuEvent::Cancel => Some(ActionMenuItem::Cancel),
        }
    }

    /// Where the popup goes inside `area`: below the anchor row, or above it when there is no room.
    pub fn popup_area(&self, area: Rect) -> Rect {
        let height = (ActionMenuItem::ALL.len() as u16 + 2).min(area.height);
        let width = 26.min(area.width);

        let below = self.anchor.y.saturating_add(self.anchor.height);
        let y = if below + height <= area.bottom() {
            below
        } else {
            self.anchor.y.saturating_sub(height).max(area.y)
        };
        let x = (self.anchor.x + 2)
            .min(area.right().saturating_sub(width))
            .max(area.x);

        Rect::new(x, y, width, height)
    }
}

impl Widget for &ActionMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_visible() {
            return;
        }

        let popup_area = self.popup_area(area);

        // Clear the popup area (overlay effect)
        for y in popup_area.y..popup_area.y + popup_area.height {
            for x in popup_area.x..popup_area.x + popup_area.width {
                if x < buf.area.width && y < buf.area.height {
                    buf[(x, y)].reset();
                }
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(Color::Blue));

        let items: Vec<ListItem> = ActionMenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.selected_index {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else {
                    Style::default().fg(Color::White)
                };

                let prefix = if i == self.selected_index { "> " } else { "  " };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", prefix, item.label()),
                    style,
                )))
            })
            .collect();

        List::new(items).block(block).render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut menu = ActionMenu::new();
        menu.open("a".into(), "A".to_string(), Rect::new(1, 1, 20, 1));

        menu.handle_event(ActionMenuEvent::Up);
        assert_eq!(menu.selected_item(), ActionMenuItem::Cancel);
        menu.handle_event(ActionMenuEvent::Down);
        menu.handle_event(ActionMenuEvent::Down);
        assert_eq!(
            menu.handle_event(ActionMenuEvent::Select),
            Some(ActionMenuItem::Delete)
        );
    }

    #[test]
    fn test_select_on_closed_menu_does_nothing() {
        let mut menu = ActionMenu::new();
        assert_eq!(menu.handle_event(ActionMenuEvent::Select), None);
        assert_eq!(
            menu.handle_event(ActionMenuEvent::Cancel),
            Some(ActionMenuItem::Cancel)
        );
    }

    #[test]
    fn test_popup_flips_above_anchor_near_bottom() {
        let area = Rect::new(0, 0, 80, 20);
        let mut menu = ActionMenu::new();

        menu.open("a".into(), "A".to_string(), Rect::new(1, 2, 20, 1));
        assert_eq!(menu.popup_area(area).y, 3);

        menu.open("a".into(), "A".to_string(), Rect::new(1, 18, 20, 1));
        assert_eq!(menu.popup_area(area).y, 13);
    }
}
