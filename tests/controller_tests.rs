// End-to-end scenarios driven through the controller's frame pipeline.

mod common;

use common::{memory_controller, ribbon_keys, Harness};
use pocket_notes::app::{DecoyMode, PANIC_COMBO, VAULT_SEQUENCE};
use pocket_notes::input::Button;
use pocket_notes::screens::browser::EMPTY_MESSAGE;
use pocket_notes::screens::{NoteRef, Screen, ScreenId};
use pocket_notes::storage::{MemoryNoteStore, NoteStore};

fn editor_text(controller: &pocket_notes::ApplicationController) -> String {
    match controller.screen() {
        Screen::Editor(editor) => editor.lines()[0].content.clone(),
        _ => panic!("editor is not active"),
    }
}

#[test]
fn empty_browser_shows_placeholder() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();
    harness.frame(&mut controller);
    assert!(harness.surface.contains_text(EMPTY_MESSAGE));
}

#[test]
fn vault_sequence_reveals_hidden_notes() {
    let mut notes = MemoryNoteStore::new().with_note("diary.txt", "secret");
    notes.move_public_to_hidden("diary.txt").unwrap();
    let mut controller = memory_controller(notes);
    let mut harness = Harness::new();

    harness.frame(&mut controller);
    assert!(!harness.surface.contains_text("[LOCKED]"));

    harness.tap(&mut controller, &VAULT_SEQUENCE);
    assert!(controller.context().vault_unlocked());
    assert_eq!(controller.active(), ScreenId::Browser);
    assert!(harness.surface.contains_text("[LOCKED]"));

    harness.tap(&mut controller, &VAULT_SEQUENCE);
    assert!(!harness.surface.contains_text("[LOCKED]"));
}

#[test]
fn broken_sequence_does_not_unlock() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();

    let mut keys = VAULT_SEQUENCE.to_vec();
    keys[4] = Button::Up;
    harness.tap(&mut controller, &keys);
    assert!(!controller.context().vault_unlocked());
}

#[test]
fn panic_combo_from_editor_shows_decoy_and_absorbs_input() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    controller.context_mut().settings.decoy_mode = DecoyMode::FakeUpdate;
    let mut harness = Harness::new();

    harness.tap(&mut controller, &[Button::X]);
    assert_eq!(controller.active(), ScreenId::Editor(NoteRef::new_document()));

    harness.hold(&mut controller, &PANIC_COMBO);
    assert_eq!(controller.active(), ScreenId::Decoy(DecoyMode::FakeUpdate));
    assert!(harness.surface.contains_text("CRITICAL UPDATE"));

    harness.tap(&mut controller, &[Button::B, Button::Menu, Button::X]);
    assert_eq!(controller.active(), ScreenId::Decoy(DecoyMode::FakeUpdate));
}

#[test]
fn editor_undo_and_redo_across_typed_characters() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();

    harness.tap(&mut controller, &[Button::X]);
    harness.tap(&mut controller, &ribbon_keys("hi"));
    assert_eq!(editor_text(&controller), "Hi");

    harness.tap(&mut controller, &[Button::L2]);
    assert_eq!(editor_text(&controller), "H");
    harness.tap(&mut controller, &[Button::L2]);
    assert_eq!(editor_text(&controller), "");

    harness.tap(&mut controller, &[Button::R2, Button::R2]);
    assert_eq!(editor_text(&controller), "Hi");
}

#[test]
fn leaving_the_editor_saves_a_new_note() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();

    harness.tap(&mut controller, &[Button::X]);
    harness.tap(&mut controller, &ribbon_keys("hi"));
    harness.tap(&mut controller, &[Button::B]);

    assert_eq!(controller.active(), ScreenId::Browser);
    let entries = controller.context().list_notes();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].name.starts_with("note-"));
}

#[test]
fn canvas_circle_add_and_undo() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();

    harness.tap(&mut controller, &[Button::R1]);
    assert_eq!(controller.active(), ScreenId::Canvas);

    harness.tap(&mut controller, &[Button::R1, Button::A]);
    let Screen::Canvas(canvas) = controller.screen() else {
        panic!("canvas is not active");
    };
    assert_eq!(canvas.snapshot().shapes.len(), 2);
    assert_eq!(canvas.snapshot().shapes[1].id, 1);

    harness.tap(&mut controller, &[Button::L2]);
    let Screen::Canvas(canvas) = controller.screen() else {
        panic!("canvas is not active");
    };
    assert_eq!(canvas.snapshot().shapes.len(), 1);

    harness.tap(&mut controller, &[Button::L2]);
    let Screen::Canvas(canvas) = controller.screen() else {
        panic!("canvas is not active");
    };
    assert_eq!(canvas.snapshot().shapes.len(), 1);
}

#[test]
fn every_transition_pairs_exit_with_enter() {
    let mut controller = memory_controller(MemoryNoteStore::new());
    let mut harness = Harness::new();

    harness.tap(&mut controller, &[Button::Menu]);
    assert_eq!(controller.active(), ScreenId::Settings);
    harness.tap(&mut controller, &[Button::B, Button::R1, Button::Menu]);
    assert_eq!(controller.active(), ScreenId::Browser);

    let (enters, exits) = controller.lifecycle_counts();
    assert_eq!(enters, exits + 1);
    assert_eq!(exits, 4);
}
