//! Successor selection when the selected conversation leaves the list.

mod common;

use common::{
    animated_config, assertions::assert_selected, counted, deleted, entries, memory_harness,
    numbered, Harness, ScriptedSource,
};
use convlist::list::{
    ConversationRecord, Fixture, ListChange, ListEntry, ListEvent, MemorySource, ScrollConfig,
    SelectRequest,
};

fn selected(id: &str) -> ListEvent {
    ListEvent::SelectionChanged {
        entry: ListEntry::conversation(id),
        focus: false,
    }
}

#[test]
fn test_successor_takes_the_vacated_row() {
    let mut h = memory_harness(&["a", "b", "c"]);
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());

    let change = h.source.remove(&ListEntry::conversation("b"));
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("c"));
    assert_eq!(
        h.observer.events(),
        vec![
            selected("b"),
            ListEvent::WillSelectAfterDeletion { index_hint: 1 },
            selected("c"),
        ]
    );
}

#[test]
fn test_deleting_last_row_selects_new_last() {
    let mut h = memory_harness(&["a", "b", "c"]);
    h.controller
        .select(&ListEntry::conversation("c"), SelectRequest::new());

    let change = h.source.remove(&ListEntry::conversation("c"));
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert_eq!(
        h.observer.events()[1],
        ListEvent::WillSelectAfterDeletion { index_hint: 1 }
    );
}

#[test]
fn test_deleting_only_row_clears_selection() {
    let mut h = memory_harness(&["a"]);
    h.controller
        .select(&ListEntry::conversation("a"), SelectRequest::new());

    let change = h.source.remove(&ListEntry::conversation("a"));
    h.controller.apply_changes(change);

    assert_selected!(h.controller, None);
    assert!(h.controller.entries().is_empty());
    assert_eq!(h.observer.events(), vec![selected("a")]);

    h.controller.reload();
    assert_selected!(h.controller, None);
}

#[test]
fn test_deleting_other_rows_keeps_selection() {
    let mut h = memory_harness(&["a", "b", "c"]);
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());
    h.observer.take();

    let change = h.source.remove(&ListEntry::conversation("a"));
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert_eq!(h.controller.selected_index(), Some(0));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_removed_inbox_hands_selection_to_first_conversation() {
    let source = MemorySource::new(Fixture {
        connection_requests: true,
        conversations: vec![
            ConversationRecord::new("a", "Alice"),
            ConversationRecord::new("b", "Bob"),
        ],
    });
    let mut h = Harness::new(source, ScrollConfig::default());
    assert!(h.controller.select_inbox_and_focus_on_view(true));

    let change = h.source.set_connection_requests(false);
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("a"));
    assert!(!h.controller.is_focused());
    assert_eq!(
        h.observer.events()[1..],
        [
            ListEvent::WillSelectAfterDeletion { index_hint: 0 },
            selected("a"),
        ]
    );
}

#[test]
fn test_successor_is_selected_without_focus() {
    let mut h = memory_harness(&["a", "b", "c"]);
    h.controller
        .select(&ListEntry::conversation("a"), SelectRequest::new().focus(true));

    let change = h.source.remove(&ListEntry::conversation("a"));
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert!(!h.controller.is_focused());
}

#[test]
fn test_batch_deletion_skips_removed_neighbours() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c", "d"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());

    h.source.set(entries(&["a", "d"]));
    h.controller.apply_changes(deleted(&["b", "c"]));

    assert_selected!(h.controller, ListEntry::conversation("d"));
}

#[test]
fn test_full_clear_clears_selection_silently() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("a"), SelectRequest::new());
    h.observer.take();

    h.source.set(Vec::new());
    h.controller.apply_changes(deleted(&["a", "b"]));

    assert_selected!(h.controller, None);
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_deletion_of_untracked_entry_is_ignored() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("a"), SelectRequest::new());
    h.observer.take();

    h.controller.apply_changes(deleted(&["ghost"]));

    assert_selected!(h.controller, ListEntry::conversation("a"));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_deletion_supersedes_running_scroll() {
    let ids = numbered(30);
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut h = Harness::new(MemorySource::with_conversations(&refs), animated_config());

    let (fired, completion) = counted();
    h.controller.select(
        &ListEntry::conversation("c20"),
        SelectRequest::new().animated(true).completion(completion),
    );
    assert!(h.controller.is_scrolling());
    assert_eq!(fired.get(), 0);

    let change = h.source.remove(&ListEntry::conversation("c20"));
    h.controller.apply_changes(change);

    assert_eq!(fired.get(), 1);
    assert_selected!(h.controller, ListEntry::conversation("c21"));
    assert!(h.controller.viewport().contains(20));
}

#[test]
fn test_delete_and_reinsert_in_place_keeps_selection() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());
    h.observer.take();

    h.controller.apply_changes(ListChange {
        inserted: vec![1],
        deleted: entries(&["b"]),
        ..Default::default()
    });

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_delete_and_reinsert_elsewhere_follows_entry() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());
    h.observer.take();

    h.source.set(entries(&["b", "a", "c"]));
    h.controller.apply_changes(ListChange {
        inserted: vec![0],
        deleted: entries(&["b"]),
        ..Default::default()
    });

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert_eq!(h.controller.selected_index(), Some(0));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_moved_selection_stays_selected() {
    let mut h = memory_harness(&["a", "b", "c"]);
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());
    h.observer.take();

    let change = h.source.move_conversation(1, 2);
    h.controller.apply_changes(change);

    assert_selected!(h.controller, ListEntry::conversation("b"));
    assert_eq!(h.controller.selected_index(), Some(2));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_deleting_rows_before_selection_shifts_its_row() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c", "d"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("d"), SelectRequest::new());
    h.observer.take();

    h.source.set(entries(&["c", "d"]));
    h.controller.apply_changes(deleted(&["a", "b"]));

    assert_selected!(h.controller, ListEntry::conversation("d"));
    assert_eq!(h.controller.selected_index(), Some(1));
    assert!(h.observer.events().is_empty());
}

#[test]
fn test_selected_row_replaced_by_insert_in_same_batch() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c", "d"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("c"), SelectRequest::new());
    h.observer.take();

    h.source.set(entries(&["a", "b", "n", "d"]));
    h.controller.apply_changes(ListChange {
        inserted: vec![2],
        deleted: entries(&["c"]),
        ..Default::default()
    });

    assert_selected!(h.controller, ListEntry::conversation("n"));
    assert_eq!(
        h.observer.events(),
        vec![
            ListEvent::WillSelectAfterDeletion { index_hint: 2 },
            selected("n"),
        ]
    );
}

#[test]
fn test_selected_deletion_with_move_in_same_batch() {
    let mut h = Harness::new(
        ScriptedSource::new(entries(&["a", "b", "c", "d"])),
        ScrollConfig::default(),
    );
    h.controller
        .select(&ListEntry::conversation("b"), SelectRequest::new());
    h.observer.take();

    h.source.set(entries(&["d", "a", "c"]));
    h.controller.apply_changes(ListChange {
        deleted: entries(&["b"]),
        moved: vec![(3, 0)],
        ..Default::default()
    });

    assert_selected!(h.controller, ListEntry::conversation("a"));
    assert_eq!(
        h.observer.events(),
        vec![
            ListEvent::WillSelectAfterDeletion { index_hint: 1 },
            selected("a"),
        ]
    );
}
