pub mod action_menu;
pub mod block;
pub mod conversation_list;
pub mod message_pane;
pub mod status_bar;

pub use action_menu::{ActionMenu, ActionMenuEvent, ActionMenuItem};
pub use conversation_list::ConversationListView;
pub use message_pane::MessagePane;
pub use status_bar::StatusBar;
