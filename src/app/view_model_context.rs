//! Read-only model access for widgets during `terminal.draw`.
//!
//! Widgets render through `Widget::render`, which has no room for the model,
//! so the view publishes it here for the length of one frame.

use crate::app::tea_model::{AppModalState, Model};
use convlist::list::{ConversationListController, ListEntry};
use std::{cell::Cell, ptr};

thread_local! {
    static FRAME_MODEL: Cell<*const Model> = const { Cell::new(ptr::null()) };
}

/// Puts the previous pointer back when the frame ends, even by unwinding.
struct Restore(*const Model);

impl Drop for Restore {
    fn drop(&mut self) {
        FRAME_MODEL.with(|slot| slot.set(self.0));
    }
}

pub struct ViewModelContext;

impl ViewModelContext {
    /// Publishes `model` while `draw` runs. Only the top-level view calls this.
    pub fn with_model<F, R>(model: &Model, draw: F) -> R
    where
        F: FnOnce() -> R,
    {
        let previous = FRAME_MODEL.with(|slot| slot.replace(model as *const Model));
        let _restore = Restore(previous);
        draw()
    }

    /// The model of the frame being drawn, if any.
    pub fn current() -> Option<ModelRef> {
        let ptr = FRAME_MODEL.with(Cell::get);
        (!ptr.is_null()).then_some(ModelRef { ptr })
    }
}

/// Handle to the frame's model; valid only inside `with_model`.
pub struct ModelRef {
    ptr: *const Model,
}

impl ModelRef {
    pub fn get(&self) -> &Model {
        // The pointer is only published while the borrowed model is alive.
        unsafe { &*self.ptr }
    }

    pub fn state(&self) -> &AppModalState {
        &self.get().state
    }

    pub fn list(&self) -> &ConversationListController {
        &self.get().list
    }

    pub fn entry_title(&self, entry: &ListEntry) -> String {
        self.get().entry_title(entry)
    }

    pub fn ui_is_rounded(&self) -> bool {
        self.get().config.ui_block_is_rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tea_model::tests::test_model;

    #[test]
    fn test_model_visible_only_inside_frame() {
        let (model, _events) = test_model(&["a", "b"]);
        assert!(ViewModelContext::current().is_none());

        let titles = ViewModelContext::with_model(&model, || {
            let frame = ViewModelContext::current().unwrap();
            assert_eq!(frame.ui_is_rounded(), model.config.ui_block_is_rounded);
            frame
                .list()
                .entries()
                .iter()
                .map(|entry| frame.entry_title(entry))
                .collect::<Vec<_>>()
        });

        assert_eq!(titles, vec!["a", "b"]);
        assert!(ViewModelContext::current().is_none());
    }

    #[test]
    fn test_nested_frames_restore_outer_model() {
        let (outer, _outer_events) = test_model(&["a"]);
        let (inner, _inner_events) = test_model(&["x", "y", "z"]);

        ViewModelContext::with_model(&outer, || {
            ViewModelContext::with_model(&inner, || {
                let frame = ViewModelContext::current().unwrap();
                assert_eq!(frame.list().entries().len(), 3);
            });
            let frame = ViewModelContext::current().unwrap();
            assert_eq!(frame.list().entries().len(), 1);
        });
    }
}
