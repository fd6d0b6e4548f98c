use crate::app::{
    event_msg::{Msg, Sub},
    tea_model::{AppModalState, Model},
    ui_components::ActionMenuEvent,
};
use convlist::list::Direction;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

pub fn subscriptions(model: &Model) -> Vec<Sub> {
    match model.state {
        AppModalState::Browsing | AppModalState::ActionMenu => {
            let mut subs = vec![Sub::KeyboardInput, Sub::MouseInput, Sub::TerminalResize];
            if model.sync_enabled {
                subs.push(Sub::SyncSimulation);
            }
            subs
        }
        AppModalState::Quit => vec![],
    }
}

pub fn crossterm_to_msg(event: Event, model: &Model) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match (&model.state, key.code, key.modifiers) {
                (_, KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Msg::Quit),

                // Action menu
                (AppModalState::ActionMenu, KeyCode::Up | KeyCode::Char('k'), _) => {
                    Some(Msg::ActionMenu(ActionMenuEvent::Up))
                }
                (AppModalState::ActionMenu, KeyCode::Down | KeyCode::Char('j'), _) => {
                    Some(Msg::ActionMenu(ActionMenuEvent::Down))
                }
                (AppModalState::ActionMenu, KeyCode::Enter, _) => {
                    Some(Msg::ActionMenu(ActionMenuEvent::Select))
                }
                (AppModalState::ActionMenu, KeyCode::Esc | KeyCode::Char('a'), _) => {
                    Some(Msg::ActionMenu(ActionMenuEvent::Cancel))
                }

                // List selection
                (AppModalState::Browsing, KeyCode::Up | KeyCode::Char('k'), _) => {
                    Some(Msg::SelectAdjacent(Direction::Up))
                }
                (AppModalState::Browsing, KeyCode::Down | KeyCode::Char('j'), _) => {
                    Some(Msg::SelectAdjacent(Direction::Down))
                }
                (AppModalState::Browsing, KeyCode::Enter, _) => Some(Msg::FocusSelected),
                (AppModalState::Browsing, KeyCode::Esc, _) => Some(Msg::Deselect),
                (AppModalState::Browsing, KeyCode::Char('i'), _) => Some(Msg::SelectInbox),
                (AppModalState::Browsing, KeyCode::Char('m'), _) => Some(Msg::ScrollToLastMessage),

                // List scrolling
                (AppModalState::Browsing, KeyCode::PageUp, _) => {
                    Some(Msg::UserScroll(-page_rows(model)))
                }
                (AppModalState::Browsing, KeyCode::PageDown, _) => {
                    Some(Msg::UserScroll(page_rows(model)))
                }

                // Backing list
                (AppModalState::Browsing, KeyCode::Char('a'), _) => Some(Msg::OpenActionMenu),
                (AppModalState::Browsing, KeyCode::Char('d'), _) => Some(Msg::DeleteSelected),
                (AppModalState::Browsing, KeyCode::Char('r'), _) => Some(Msg::Reload),
                (AppModalState::Browsing, KeyCode::Char('s'), _) => Some(Msg::ToggleSync),
                (AppModalState::Browsing, KeyCode::Char('q'), _) => Some(Msg::Quit),

                _ => None,
            }
        }
        Event::Mouse(mouse) => match (&model.state, mouse.kind) {
            (AppModalState::Browsing, MouseEventKind::ScrollUp) => Some(Msg::UserScroll(-1)),
            (AppModalState::Browsing, MouseEventKind::ScrollDown) => Some(Msg::UserScroll(1)),
            _ => None,
        },
        Event::Resize(width, height) => Some(Msg::TerminalResize(width, height)),
        _ => None,
    }
}

fn page_rows(model: &Model) -> isize {
    model.list.viewport().height.max(1) as isize
}
