use crate::app::{
    error::context,
    event_msg::*,
    sync_simulator,
    tea_model::*,
    ui_components::ActionMenuItem,
};
use convlist::list::{ConversationId, ListEntry, ListEvent, SelectRequest};

pub fn update(model: &mut Model, msg: Msg) -> CmdOrBatch<Cmd> {
    match msg {
        // List navigation
        Msg::SelectAdjacent(direction) => {
            let request = SelectRequest::new()
                .animated(true)
                .completion(model.tracked_completion());
            if !model.list.select_adjacent(direction, request) {
                tracing::debug!("No entry {:?} of the selection", direction);
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::FocusSelected => {
            if let Some(entry) = model.list.selected_entry().cloned() {
                let request = SelectRequest::new()
                    .focus(true)
                    .animated(true)
                    .completion(model.tracked_completion());
                model.list.select(&entry, request);
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::Deselect => {
            model.list.deselect_all();
            model.message_pane.show(None);
            model.last_event = Some("Selection cleared".to_string());
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::SelectInbox => {
            if !model.list.select_inbox_and_focus_on_view(true) {
                model.last_event = Some("No connection requests".to_string());
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::ScrollToLastMessage => {
            let Some(conversation) = selected_conversation(model) else {
                model.last_event = Some("Select a conversation first".to_string());
                return CmdOrBatch::Single(Cmd::None);
            };
            let last_message = model
                .source
                .conversation(&conversation)
                .and_then(|record| record.messages.last().map(|message| message.id.clone()));

            match last_message {
                Some(message) => {
                    let request = SelectRequest::new()
                        .scroll_to(message)
                        .focus(model.list.is_focused())
                        .animated(true)
                        .completion(model.tracked_completion());
                    model
                        .list
                        .select(&ListEntry::Conversation(conversation), request);
                }
                None => model.last_event = Some("Conversation has no messages".to_string()),
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::UserScroll(delta) => {
            model.list.user_scrolled(delta);
            CmdOrBatch::Single(Cmd::None)
        }

        // Backing list mutations
        Msg::DeleteSelected => {
            if let Some(entry) = model.list.selected_entry().cloned() {
                let change = model.source.remove(&entry);
                model.list.apply_changes(change);
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::Reload => {
            model.list.reload();
            CmdOrBatch::Single(Cmd::None)
        }

        // Action menu
        Msg::OpenActionMenu => {
            if let Some(entry) = model.list.selected_entry().cloned() {
                let anchor = model
                    .row_anchor(&entry)
                    .unwrap_or_else(|| model.layout().list);
                model.list.request_action_menu(&entry, anchor);
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::ActionMenu(event) => {
            let Some(item) = model.action_menu.handle_event(event) else {
                return CmdOrBatch::Single(Cmd::None);
            };
            let target = model.action_menu.target().cloned();
            model.action_menu.close();
            model.state = AppModalState::Browsing;

            match (item, target) {
                (ActionMenuItem::MoveToTop, Some(conversation)) => {
                    let position = model
                        .source
                        .conversation_ids()
                        .iter()
                        .position(|id| id == &conversation);
                    if let Some(from) = position {
                        let change = model.source.move_conversation(from, 0);
                        model.list.apply_changes(change);
                    }
                }
                (ActionMenuItem::Delete, Some(conversation)) => {
                    let change = model.source.remove(&ListEntry::Conversation(conversation));
                    model.list.apply_changes(change);
                }
                _ => {}
            }
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::ListEvent(event) => {
            model.last_event = Some(describe(model, &event));
            match event {
                ListEvent::SelectionChanged { entry, .. } => {
                    model.message_pane.show(entry.conversation_id().cloned());
                }
                ListEvent::ActionMenuRequested {
                    conversation,
                    anchor,
                } => {
                    let title = model.entry_title(&ListEntry::Conversation(conversation.clone()));
                    model.action_menu.open(conversation, title, anchor);
                    model.state = AppModalState::ActionMenu;
                }
                ListEvent::WillSelectAfterDeletion { .. } | ListEvent::ListScrolled => {}
            }
            CmdOrBatch::Single(Cmd::None)
        }

        // Background sync
        Msg::SyncArrived(op) => {
            tracing::debug!("Sync arrived: {:?}", op);
            let change = sync_simulator::apply(&op, &model.source);
            model.list.apply_changes(change);
            reschedule_sync(model)
        }

        Msg::SyncFailed(reason) => {
            let report = context::async_task(reason);
            tracing::warn!("Sync failed: {}", report);
            model.last_event = Some("Sync failed, retrying".to_string());
            reschedule_sync(model)
        }

        Msg::ToggleSync => {
            model.sync_enabled = !model.sync_enabled;
            tracing::info!("Background sync enabled: {}", model.sync_enabled);
            if model.sync_enabled {
                CmdOrBatch::Single(Cmd::AsyncScheduleSync)
            } else {
                CmdOrBatch::Single(Cmd::AsyncCancelSync)
            }
        }

        // Program plumbing
        Msg::Tick(elapsed) => {
            // The pane settles first so a finished inner scroll completes this frame
            model.message_pane.tick(elapsed);
            model.list.tick(elapsed);
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::TerminalResize(width, height) => {
            model.resize(ratatui::layout::Rect::new(0, 0, width, height));
            CmdOrBatch::Single(Cmd::TerminalAutoResize)
        }

        Msg::RecordActiveTaskCount(count) => {
            model.active_task_count = count;
            CmdOrBatch::Single(Cmd::None)
        }

        Msg::Quit => {
            model.state = AppModalState::Quit;
            CmdOrBatch::Single(Cmd::AsyncCancelSync)
        }
    }
}

fn selected_conversation(model: &Model) -> Option<ConversationId> {
    model
        .list
        .selected_entry()
        .and_then(ListEntry::conversation_id)
        .cloned()
}

fn reschedule_sync(model: &Model) -> CmdOrBatch<Cmd> {
    if model.sync_enabled {
        CmdOrBatch::Single(Cmd::AsyncScheduleSync)
    } else {
        CmdOrBatch::Single(Cmd::None)
    }
}

fn describe(model: &Model, event: &ListEvent) -> String {
    match event {
        ListEvent::SelectionChanged { entry, focus } => format!(
            "Selected {}{}",
            model.entry_title(entry),
            if *focus { " (focused)" } else { "" }
        ),
        ListEvent::WillSelectAfterDeletion { index_hint } => {
            format!("Selection moving to row {}", index_hint + 1)
        }
        ListEvent::ListScrolled => "Scrolled".to_string(),
        ListEvent::ActionMenuRequested { conversation, .. } => {
            format!("Actions for {}", conversation)
        }
    }
}
