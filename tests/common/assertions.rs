//! Custom assertion helpers for conversation list tests

#![allow(unused_imports)]
#![allow(unused_macros)]

/// Assert the controller's selection, and that a listed selection sits at its row
macro_rules! assert_selected {
    ($controller:expr, None) => {
        assert!(
            $controller.selected_entry().is_none(),
            "Expected no selection but found {:?}",
            $controller.selected_entry()
        );
    };
    ($controller:expr, $entry:expr) => {{
        let expected: convlist::list::ListEntry = $entry;
        assert_eq!(
            $controller.selected_entry(),
            Some(&expected),
            "Unexpected selection"
        );
        let index = $controller
            .selected_index()
            .unwrap_or_else(|| panic!("Selected entry {} is not listed", expected));
        assert_eq!($controller.entries()[index], expected);
    }};
}

/// Assert that the journal holds exactly the given lines, in order
macro_rules! assert_journal {
    ($journal:expr, [$($line:expr),* $(,)?]) => {
        let expected: Vec<String> = vec![$($line.to_string()),*];
        assert_eq!(*$journal.borrow(), expected, "Journal out of order");
    };
}

pub(crate) use assert_journal;
pub(crate) use assert_selected;

/// Assert that the selection, if any, is one of the listed entries
pub fn assert_selection_listed(controller: &convlist::list::ConversationListController) {
    if let Some(entry) = controller.selected_entry() {
        assert!(
            controller.entries().contains(entry),
            "Selection {} dangles outside the list {:?}",
            entry,
            controller.entries()
        );
    }
}
