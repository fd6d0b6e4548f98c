use crate::app::view_model_context::ViewModelContext;
use ratatui::{
    text::Line,
    widgets::{Block, BorderType},
};

/// Bordered block following the configured corner style.
pub fn themed_block<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    let rounded = ViewModelContext::current()
        .map(|model| model.ui_is_rounded())
        .unwrap_or(false);

    Block::bordered()
        .border_type(if rounded {
            BorderType::Rounded
        } else {
            BorderType::Plain
        })
        .title(title)
}
