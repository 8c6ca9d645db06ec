use egui::{Key, Modifiers};
use futures_lite::future::block_on;
use quill_core::{CanvasError, Point, SceneError, Size, SurfaceError};
use quill_history::{HistoryConfig, HistoryStrategy};
use quill_ui::editor::{Command, Editor, ListenerKind, ListenerRegistry, Outcome, WindowEvent};
use quill_ui::{EditorConfig, EditorError};

fn editor_with(config: EditorConfig) -> (Editor, ListenerRegistry) {
    let registry = ListenerRegistry::new();
    let editor = Editor::headless(config, &registry).unwrap();
    (editor, registry)
}

fn run(editor: &mut Editor, command: Command) -> Outcome {
    block_on(editor.execute(command)).unwrap()
}

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        command: true,
        ..Default::default()
    }
}

fn key(key: Key, modifiers: Modifiers) -> WindowEvent {
    WindowEvent::KeyPressed { key, modifiers }
}

#[test]
fn add_text_uses_defaults_and_focuses() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());

    let Outcome::Added(id) = run(&mut editor, Command::AddText) else {
        panic!("expected an added object");
    };

    let text = editor.scene().text(id).unwrap();
    assert_eq!(text.text, "Edit me");
    assert_eq!(text.position, Point::new(100.0, 100.0));
    assert_eq!(text.style.font_size, 20);
    assert_eq!(editor.scene().active_object(), Some(id));
    assert_eq!(editor.history().as_timeline().unwrap().current(), Some(0));
}

#[test]
fn style_commands_without_active_object_are_ignored() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());

    assert_eq!(run(&mut editor, Command::ToggleBold), Outcome::Ignored);
    assert_eq!(run(&mut editor, Command::SetFontSize(30)), Outcome::Ignored);
    assert_eq!(run(&mut editor, Command::Undo), Outcome::Ignored);
    assert_eq!(run(&mut editor, Command::Redo), Outcome::Ignored);
    assert!(editor.history().as_timeline().unwrap().is_empty());
}

#[test]
fn bold_toggle_undo_redo_through_dispatcher() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());
    let Outcome::Added(id) = run(&mut editor, Command::AddText) else {
        panic!("expected an added object");
    };

    assert_eq!(run(&mut editor, Command::ToggleBold), Outcome::Applied);
    assert!(editor.scene().text(id).unwrap().style.bold);
    assert!(editor.controls().can_undo);

    assert_eq!(run(&mut editor, Command::Undo), Outcome::Applied);
    assert!(!editor.scene().text(id).unwrap().style.bold);
    assert!(editor.controls().can_redo);

    assert_eq!(run(&mut editor, Command::Redo), Outcome::Applied);
    assert!(editor.scene().text(id).unwrap().style.bold);
    assert!(!editor.controls().can_redo);
}

#[test]
fn every_completed_edit_is_one_checkpoint() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());
    run(&mut editor, Command::AddText);
    run(&mut editor, Command::ToggleItalic);
    run(&mut editor, Command::ToggleItalic);
    run(&mut editor, Command::SetFontFamily("Arial".into()));
    run(&mut editor, Command::MoveActive(Point::new(10.0, 20.0)));
    run(&mut editor, Command::ResizeActive(Size::new(300.0, 40.0)));
    run(&mut editor, Command::EditText("hello".into()));

    assert_eq!(editor.history().as_timeline().unwrap().len(), 7);

    // Selection and canvas resize are not edits.
    run(&mut editor, Command::Select(Point::new(15.0, 25.0)));
    run(&mut editor, Command::ResizeCanvas {
        width: 800,
        height: 600,
    });
    assert_eq!(editor.history().as_timeline().unwrap().len(), 7);
    assert_eq!(editor.scene().width, 800);
}

#[test]
fn zero_font_size_is_ignored() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());
    run(&mut editor, Command::AddText);
    assert_eq!(run(&mut editor, Command::SetFontSize(0)), Outcome::Ignored);
    assert_eq!(editor.history().as_timeline().unwrap().len(), 1);
}

#[test]
fn new_edit_after_undo_erases_redo() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());
    run(&mut editor, Command::AddText);
    run(&mut editor, Command::ToggleBold);
    run(&mut editor, Command::ToggleUnderline);

    run(&mut editor, Command::Undo);
    run(&mut editor, Command::Undo);
    run(&mut editor, Command::SetFontSize(40));

    let timeline = editor.history().as_timeline().unwrap();
    assert_eq!(timeline.len(), 2);
    assert!(!editor.controls().can_redo);
    assert_eq!(run(&mut editor, Command::Redo), Outcome::Ignored);
}

#[test]
fn initial_state_makes_first_add_undoable() {
    let (mut editor, _registry) = editor_with(EditorConfig {
        record_initial_state: true,
        ..EditorConfig::default()
    });
    run(&mut editor, Command::AddText);
    assert_eq!(run(&mut editor, Command::Undo), Outcome::Applied);
    assert!(editor.scene().is_empty());
    assert_eq!(editor.scene().active_object(), None);
}

#[test]
fn object_stack_strategy_undoes_whole_objects() {
    let (mut editor, _registry) = editor_with(EditorConfig {
        history: HistoryConfig {
            strategy: HistoryStrategy::ObjectStack,
            max_checkpoints: None,
        },
        ..EditorConfig::default()
    });
    run(&mut editor, Command::AddText);
    run(&mut editor, Command::AddText);
    assert_eq!(run(&mut editor, Command::ToggleBold), Outcome::Applied);

    assert_eq!(run(&mut editor, Command::Undo), Outcome::Applied);
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(run(&mut editor, Command::Redo), Outcome::Applied);
    assert_eq!(editor.scene().len(), 2);
    // The bold edit survived the round trip: style is never rolled back here.
    let top = editor.scene().objects().last().unwrap().as_text().unwrap();
    assert!(top.style.bold);
}

#[test]
fn unavailable_font_is_rejected_and_history_stays_navigable() {
    let (mut editor, _registry) = editor_with(EditorConfig {
        fonts: vec!["Times New Roman".into()],
        ..EditorConfig::default()
    });
    let Outcome::Added(id) = run(&mut editor, Command::AddText) else {
        panic!("expected an added object");
    };

    let result = block_on(editor.execute(Command::SetFontFamily("Papyrus".into())));
    assert!(matches!(
        result,
        Err(EditorError::Rejected(CanvasError::Surface(
            SurfaceError::FontUnavailable { .. }
        )))
    ));
    assert_eq!(
        editor.scene().text(id).unwrap().style.font_family,
        "Times New Roman"
    );
    assert_eq!(editor.history().as_timeline().unwrap().len(), 1);

    assert_eq!(run(&mut editor, Command::ToggleBold), Outcome::Applied);
    assert_eq!(run(&mut editor, Command::Undo), Outcome::Applied);
    assert!(!editor.scene().text(id).unwrap().style.bold);
    assert_eq!(run(&mut editor, Command::Undo), Outcome::Ignored);
    assert!(!editor.controls().can_undo);
    assert_eq!(run(&mut editor, Command::Redo), Outcome::Applied);
    assert!(editor.scene().text(id).unwrap().style.bold);
}

#[test]
fn malformed_defaults_never_reach_history() {
    let mut config = EditorConfig::default();
    config.new_text.width = -5.0;
    let (mut editor, _registry) = editor_with(config);

    let result = block_on(editor.execute(Command::AddText));
    assert!(matches!(
        result,
        Err(EditorError::Rejected(CanvasError::Scene(
            SceneError::InvalidGeometry { .. }
        )))
    ));
    assert!(editor.scene().is_empty());
    assert_eq!(editor.scene().active_object(), None);
    assert!(editor.history().as_timeline().unwrap().is_empty());
}

#[test]
fn keyboard_events_route_through_shortcuts() {
    let (mut editor, registry) = editor_with(EditorConfig::default());
    let Outcome::Added(id) = run(&mut editor, Command::AddText) else {
        panic!("expected an added object");
    };

    assert_eq!(registry.emit(&key(Key::B, ctrl())), 1);
    assert_eq!(registry.emit(&key(Key::Z, ctrl())), 1);
    // Not bound: delivered but queues nothing.
    registry.emit(&key(Key::Q, ctrl()));
    assert_eq!(editor.pending(), 2);

    let results = block_on(editor.run_pending());
    let outcomes: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(outcomes, vec![Outcome::Applied, Outcome::Applied]);
    assert!(!editor.scene().text(id).unwrap().style.bold);
    assert!(editor.controls().can_redo);
    assert_eq!(editor.pending(), 0);
}

#[test]
fn resize_events_resize_the_canvas() {
    let (mut editor, registry) = editor_with(EditorConfig::default());

    registry.emit(&WindowEvent::Resized {
        width: 1024,
        height: 768,
    });
    let results = block_on(editor.run_pending());

    assert_eq!(results.len(), 1);
    assert_eq!(editor.scene().width, 1024);
    assert_eq!(editor.scene().height, 768);
    assert!(editor.history().as_timeline().unwrap().is_empty());
}

#[test]
fn egui_frame_input_queues_shortcuts() {
    let (mut editor, _registry) = editor_with(EditorConfig::default());
    let Outcome::Added(id) = run(&mut editor, Command::AddText) else {
        panic!("expected an added object");
    };

    let input = egui::RawInput {
        modifiers: ctrl(),
        events: vec![egui::Event::Key {
            key: Key::B,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: ctrl(),
        }],
        ..Default::default()
    };
    let ctx = egui::Context::default();
    let _ = ctx.run(input, |ctx| editor.handle_input(ctx));
    assert_eq!(editor.pending(), 1);

    block_on(editor.run_pending());
    assert!(editor.scene().text(id).unwrap().style.bold);
}

#[test]
fn dispose_deregisters_listeners() {
    let (editor, registry) = editor_with(EditorConfig::default());
    assert_eq!(registry.count(ListenerKind::Resize), 1);
    assert_eq!(registry.count(ListenerKind::Keyboard), 1);

    let scene = editor.dispose();
    assert!(scene.is_empty());
    assert!(registry.is_empty());
    assert_eq!(registry.emit(&key(Key::Z, ctrl())), 0);
}
