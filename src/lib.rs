//! Conversation list selection
//!
//! This crate provides the selection and scroll controller behind a
//! conversation list, together with an in-memory backing list. The `convlist`
//! binary wraps it in a terminal UI.

pub mod list;

pub use list::{ConversationListController, ListEntry, ListEvent, SelectRequest};
