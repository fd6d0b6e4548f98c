//! Conversation list selection core.
//!
//! [`ConversationListController`] tracks which entry of an externally owned
//! list is current, keeps it in view through the [`ScrollCoordinator`], moves
//! the selection to a neighbour when the selected entry is deleted, and reports
//! every change to a single [`ListObserver`].
//!
//! Everything here is single threaded (`Rc`/`Cell`) and meant to live on the
//! UI thread next to the renderer.

pub mod binding;
pub mod completion;
pub mod controller;
pub mod deletion;
pub mod entry;
pub mod error;
pub mod memory;
pub mod relay;
pub mod scroll;
pub mod selection;
pub mod source;
mod tracing_macros;

pub use binding::ListBinding;
pub use completion::Completion;
pub use controller::ConversationListController;
pub use deletion::{DeletionReconciler, PendingSelection};
pub use entry::{ConversationId, ListEntry, MessageId};
pub use error::{Result, SelectionError};
pub use memory::{ConversationRecord, Fixture, MemorySource, MessageRecord};
pub use relay::{ChannelObserver, ListEvent, ListObserver, NotificationRelay};
pub use scroll::{Animation, ScrollConfig, ScrollCoordinator, Viewport};
pub use selection::{Direction, SelectRequest, SelectionState};
pub use source::{ConversationContent, ConversationSource, ListChange};
