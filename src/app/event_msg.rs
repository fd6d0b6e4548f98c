use crate::app::{sync_simulator::SyncOp, ui_components::ActionMenuEvent};
use convlist::list::{Direction, ListEvent};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // List navigation
    SelectAdjacent(Direction),
    FocusSelected,
    Deselect,
    SelectInbox,
    ScrollToLastMessage,
    UserScroll(isize),

    // Backing list mutations
    DeleteSelected,
    Reload,

    // Action menu
    OpenActionMenu,
    ActionMenu(ActionMenuEvent),

    // Relayed from the list controller
    ListEvent(ListEvent),

    // Background sync
    SyncArrived(SyncOp),
    SyncFailed(String),
    ToggleSync,

    // Program plumbing
    Tick(Duration),
    TerminalResize(u16, u16),
    RecordActiveTaskCount(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    None,
    AsyncScheduleSync,
    AsyncCancelSync,
    TerminalAutoResize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CmdOrBatch<T> {
    Single(T),
    Batch(Vec<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sub {
    KeyboardInput,
    MouseInput,
    TerminalResize,
    SyncSimulation,
}
