//! Error types for the conversation list controller

use crate::list::entry::ListEntry;
use std::fmt;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Reasons a selection request is rejected.
///
/// Every variant is local and non-fatal: the failing call leaves the prior
/// selection untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested entry is not part of the backing list
    InvalidTarget(ListEntry),

    /// No connection-requests entry is currently listed
    EmptyInbox,

    /// Adjacent selection ran past either end of the list
    OutOfBounds,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(entry) => write!(f, "Entry not in conversation list: {}", entry),
            Self::EmptyInbox => write!(f, "No connection requests to select"),
            Self::OutOfBounds => write!(f, "No entry in that direction"),
        }
    }
}

impl std::error::Error for SelectionError {}

impl SelectionError {
    /// Whether retrying after the backing list changes could succeed
    pub fn depends_on_list_contents(&self) -> bool {
        matches!(self, Self::InvalidTarget(_) | Self::EmptyInbox)
    }
}
