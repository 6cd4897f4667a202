//! End-to-end runs of the extraction commands against an in-memory host.

mod common;

use common::MemoryHost;
use markdown_omnifocus_engine::{
    CommandError, ExtractCommand, ExtractionMode, NO_TASKS_MESSAGE, Outcome, RunOptions,
    encode_component,
};
use pretty_assertions::assert_eq;

const BASE: &str = "obsidian%3A%2F%2Fopen%3Fvault%3DNotes%26file%3Dinbox.md%0A";

fn marking() -> RunOptions {
    RunOptions {
        mark_complete: true,
        ..RunOptions::default()
    }
}

#[test]
fn test_document_tasks_are_sent_in_order() {
    // Given a document with three flat checklist items
    let mut host = MemoryHost::with_document("# List\n- [ ] One\n- [ ] Two\ntext\n* [ ] Three\n");

    // When extracting the whole document
    let outcome = ExtractCommand::document()
        .run(&mut host, &RunOptions::default())
        .unwrap();

    // Then one URL per item is opened, in document order
    assert_eq!(
        outcome,
        Outcome::Sent {
            count: 3,
            marked_complete: false
        }
    );
    assert_eq!(
        host.opened,
        vec![
            format!("omnifocus:///add?name=One&note={BASE}&due="),
            format!("omnifocus:///add?name=Two&note={BASE}&due="),
            format!("omnifocus:///add?name=Three&note={BASE}&due="),
        ]
    );
    assert!(host.notifications.is_empty());
    assert_eq!(host.document_writes, 0);
}

#[test]
fn test_wiki_link_note_uses_vault_name() {
    let mut host =
        MemoryHost::with_document("- [ ] Buy milk [[Recipes|Dinner]] #errand // tomorrow");

    ExtractCommand::document()
        .run(&mut host, &RunOptions::default())
        .unwrap();

    let expected_note = encode_component(
        "Dinner: obsidian://open?vault=Notes&file=Recipes.md\n\nobsidian://open?vault=Notes&file=inbox.md\n",
    );
    assert_eq!(
        host.opened,
        vec![format!(
            "omnifocus:///add?name=Buy%20milk%20Dinner&note={expected_note}&due=tomorrow&context=errand"
        )]
    );
}

#[test]
fn test_mark_complete_rewrites_document_after_sending() {
    let mut host =
        MemoryHost::with_document("- [ ] Plan trip\n  - book hotel\n- [x] Old\n- [ ] Pack\n");

    let outcome = ExtractCommand::document().run(&mut host, &marking()).unwrap();

    assert_eq!(
        outcome,
        Outcome::Sent {
            count: 2,
            marked_complete: true
        }
    );
    assert_eq!(
        host.document,
        "- [x] Plan trip\n  - book hotel\n- [x] Old\n- [x] Pack\n"
    );
    assert_eq!(host.document_writes, 1);
}

#[test]
fn test_running_twice_finds_nothing_the_second_time() {
    let mut host = MemoryHost::with_document("- [ ] Once\n");

    ExtractCommand::document().run(&mut host, &marking()).unwrap();
    let second = ExtractCommand::document().run(&mut host, &marking()).unwrap();

    assert_eq!(second, Outcome::NoTasks);
    assert_eq!(host.opened.len(), 1);
    assert_eq!(host.document, "- [x] Once\n");
}

#[test]
fn test_selection_only_touches_selected_text() {
    let document = "- [ ] Outside\n- [ ] Inside\n  - with note\n";
    let mut host = MemoryHost::with_selection(document, "- [ ] Inside\n  - with note\n");

    let outcome = ExtractCommand::selection().run(&mut host, &marking()).unwrap();

    assert_eq!(
        outcome,
        Outcome::Sent {
            count: 1,
            marked_complete: true
        }
    );
    assert_eq!(host.opened.len(), 1);
    assert!(host.opened[0].starts_with("omnifocus:///add?name=Inside&note=-%20with%20note"));
    assert_eq!(host.document, "- [ ] Outside\n- [x] Inside\n  - with note\n");
    assert_eq!(host.selection_writes, 1);
    assert_eq!(host.document_writes, 0);
}

#[test]
fn test_selection_without_tasks_notifies_once_and_changes_nothing() {
    let document = "- [ ] Elsewhere\nJust prose\n";
    let mut host = MemoryHost::with_selection(document, "Just prose\n");

    let outcome = ExtractCommand::selection().run(&mut host, &marking()).unwrap();

    assert_eq!(outcome, Outcome::NoTasks);
    assert_eq!(host.notifications, vec![NO_TASKS_MESSAGE.to_string()]);
    assert!(host.opened.is_empty());
    assert_eq!(host.document, document);
    assert_eq!(host.selection_writes, 0);
}

#[test]
fn test_empty_selection_finds_no_tasks() {
    let mut host = MemoryHost::with_selection("- [ ] Task\n", "");

    let outcome = ExtractCommand::selection()
        .run(&mut host, &RunOptions::default())
        .unwrap();

    assert_eq!(outcome, Outcome::NoTasks);
    assert_eq!(host.notifications.len(), 1);
}

#[test]
fn test_read_failure_aborts_before_any_command() {
    let mut host = MemoryHost::with_document("- [ ] Task\n");
    host.fail_read = true;

    let result = ExtractCommand::document().run(&mut host, &marking());

    assert!(matches!(result, Err(CommandError::Read { .. })));
    assert!(host.opened.is_empty());
    assert!(host.notifications.is_empty());
}

#[test]
fn test_open_failure_stops_batch_and_skips_rewrite() {
    let document = "- [ ] A\n- [ ] B\n- [ ] C\n";
    let mut host = MemoryHost::with_document(document);
    host.fail_open_at = Some(1);

    let result = ExtractCommand::document().run(&mut host, &marking());

    match result {
        Err(CommandError::Dispatch { index, total, .. }) => {
            assert_eq!((index, total), (2, 3));
        }
        other => panic!("expected dispatch error, got {other:?}"),
    }
    assert_eq!(host.opened.len(), 1);
    assert_eq!(host.document, document);
    assert_eq!(host.document_writes, 0);
}

#[test]
fn test_line_mode_sends_nested_items_without_notes() {
    let mut host = MemoryHost::with_document("- [ ] Parent\n  - detail\n  - [ ] Child\n");
    let options = RunOptions {
        mode: ExtractionMode::Line,
        ..RunOptions::default()
    };

    ExtractCommand::document().run(&mut host, &options).unwrap();

    assert_eq!(
        host.opened,
        vec![
            format!("omnifocus:///add?name=Parent&note={BASE}&due="),
            format!("omnifocus:///add?name=Child&note={BASE}&due="),
        ]
    );
}
