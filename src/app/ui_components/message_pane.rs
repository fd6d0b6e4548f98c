use crate::app::ui_components::block::themed_block;
use convlist::list::{
    Animation, Completion, ConversationContent, ConversationId, ListEntry, MemorySource,
    MessageId, MessageRecord,
};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span, Text},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget, Wrap,
    },
};
use std::{cell::RefCell, rc::Rc, time::Duration};

#[derive(Debug, Default)]
struct PaneState {
    conversation: Option<ConversationId>,
    offset: usize,
    width: u16,
    height: u16,
    animation: Option<Animation>,
    // Fired once the running animation settles
    pending: Option<Completion>,
}

/// Message history of the open conversation.
///
/// The pane is the content view the list controller scrolls into when a
/// selection names a message.
pub struct MessagePane {
    source: Rc<MemorySource>,
    animation_duration: Duration,
    state: RefCell<PaneState>,
}

impl MessagePane {
    pub fn new(source: Rc<MemorySource>, animation_duration: Duration) -> Self {
        Self {
            source,
            animation_duration,
            state: RefCell::new(PaneState::default()),
        }
    }

    /// Opens `conversation` at the top. Reopening the same one keeps its position.
    pub fn show(&self, conversation: Option<ConversationId>) {
        let superseded = {
            let mut state = self.state.borrow_mut();
            if state.conversation == conversation {
                return;
            }
            state.conversation = conversation;
            state.offset = 0;
            state.animation = None;
            state.pending.take()
        };
        if let Some(completion) = superseded {
            completion.fire();
        }
    }

    pub fn conversation(&self) -> Option<ConversationId> {
        self.state.borrow().conversation.clone()
    }

    pub fn offset(&self) -> usize {
        self.state.borrow().offset
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().animation.is_some()
    }

    /// Size of the text area inside the pane border.
    pub fn set_area(&self, width: u16, height: u16) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    /// Advances a running scroll animation; returns whether the offset moved.
    pub fn tick(&self, elapsed: Duration) -> bool {
        let (moved, settled) = {
            let mut state = self.state.borrow_mut();
            let before = state.offset;
            let Some(animation) = state.animation.as_mut() else {
                return false;
            };

            let offset = animation.advance(elapsed);
            let finished = animation.is_finished();
            state.offset = offset;
            let settled = if finished {
                state.animation = None;
                state.pending.take()
            } else {
                None
            };
            (before != offset, settled)
        };

        if let Some(completion) = settled {
            tracing::debug!("Message pane scroll settled");
            completion.fire();
        }
        moved
    }

    fn width(&self) -> u16 {
        self.state.borrow().width.max(1)
    }

    fn total_rows(&self, conversation: &ConversationId) -> usize {
        let width = self.width();
        self.source
            .conversation(conversation)
            .map(|record| {
                record
                    .messages
                    .iter()
                    .map(|message| rows_for(message, width))
                    .sum()
            })
            .unwrap_or(0)
    }
}

fn message_lines(message: &MessageRecord) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("#{}", message.id),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(message.text.clone()),
        Line::from(""),
    ]
}

fn rows_for(message: &MessageRecord, width: u16) -> usize {
    Paragraph::new(message_lines(message))
        .wrap(Wrap { trim: false })
        .line_count(width)
}

impl ConversationContent for MessagePane {
    fn message_position(&self, conversation: &ConversationId, message: &MessageId) -> Option<usize> {
        let record = self.source.conversation(conversation)?;
        let width = self.width();

        let mut row = 0;
        for candidate in &record.messages {
            if &candidate.id == message {
                return Some(row);
            }
            row += rows_for(candidate, width);
        }
        None
    }

    fn scroll_to_message(
        &self,
        conversation: &ConversationId,
        message: &MessageId,
        animated: bool,
        completion: Completion,
    ) {
        let Some(row) = self.message_position(conversation, message) else {
            tracing::debug!("Message {} vanished before the pane could scroll", message);
            completion.fire();
            return;
        };
        let total = self.total_rows(conversation);

        let (superseded, settled_now) = {
            let mut state = self.state.borrow_mut();
            if state.conversation.as_ref() != Some(conversation) {
                state.conversation = Some(conversation.clone());
                state.offset = 0;
                state.animation = None;
            }

            let target = row.min(total.saturating_sub(state.height as usize));
            let superseded = state.pending.take();
            if !animated || target == state.offset || self.animation_duration.is_zero() {
                state.offset = target;
                state.animation = None;
                (superseded, Some(completion))
            } else {
                tracing::debug!(
                    "Animating message pane {} -> {} for {}",
                    state.offset,
                    target,
                    message
                );
                state.animation = Some(Animation::new(
                    state.offset,
                    target,
                    self.animation_duration,
                ));
                state.pending = Some(completion);
                (superseded, None)
            }
        };

        if let Some(completion) = superseded {
            completion.fire();
        }
        if let Some(completion) = settled_now {
            completion.fire();
        }
    }
}

impl Widget for &MessagePane {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state.borrow();

        let (title, text) = match &state.conversation {
            Some(id) => {
                let record = self.source.conversation(id);
                let lines: Vec<Line<'static>> = record
                    .as_ref()
                    .map(|record| record.messages.iter().flat_map(message_lines).collect())
                    .unwrap_or_default();
                (
                    self.source.title(&ListEntry::Conversation(id.clone())),
                    Text::from(lines),
                )
            }
            None => (
                "Messages".to_string(),
                Text::from(Line::from(Span::styled(
                    "No conversation open",
                    Style::default().fg(Color::DarkGray),
                ))),
            ),
        };

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(themed_block(format!(" {} ", title)))
            .scroll((state.offset.min(u16::MAX as usize) as u16, 0));
        paragraph.render(area, buf);

        let total = state
            .conversation
            .as_ref()
            .map(|id| self.total_rows(id))
            .unwrap_or(0);
        if total > state.height as usize {
            let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(state.height as usize))
                .position(state.offset);
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
