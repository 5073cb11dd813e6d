#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
    assert!(!m.additive());
}

#[test]
fn shift_is_the_additive_modifier() {
    assert!(Modifiers { shift: true, ..Default::default() }.additive());
    assert!(!Modifiers { ctrl: true, meta: true, ..Default::default() }.additive());
}

// =============================================================
// Key
// =============================================================

#[test]
fn delete_and_backspace_both_delete() {
    assert!(Key::new("Delete").is_delete());
    assert!(Key::new("Backspace").is_delete());
    assert!(!Key::new("d").is_delete());
}

#[test]
fn escape_detected() {
    assert!(Key::new("Escape").is_escape());
    assert!(!Key::new("Esc").is_escape());
}

#[test]
fn arrows_map_to_rotate_steps() {
    assert_eq!(Key::new("ArrowLeft").rotate_step(), Some(RotateStep::FineCcw));
    assert_eq!(Key::new("ArrowRight").rotate_step(), Some(RotateStep::FineCw));
    assert_eq!(Key::new("ArrowUp").rotate_step(), Some(RotateStep::CoarseCcw));
    assert_eq!(Key::new("ArrowDown").rotate_step(), Some(RotateStep::CoarseCw));
    assert_eq!(Key::new("Enter").rotate_step(), None);
}

#[test]
fn rotate_step_degrees_are_signed() {
    assert_eq!(RotateStep::FineCcw.degrees(15.0, 45.0), -15.0);
    assert_eq!(RotateStep::FineCw.degrees(15.0, 45.0), 15.0);
    assert_eq!(RotateStep::CoarseCcw.degrees(15.0, 45.0), -45.0);
    assert_eq!(RotateStep::CoarseCw.degrees(15.0, 45.0), 45.0);
}

// =============================================================
// InputState / UiState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn active_gestures_are_not_idle() {
    let id = Uuid::new_v4();
    let states = [
        InputState::DraggingComponent { id, offset: Point::default(), origin: Point::default() },
        InputState::RubberBandSelecting { start: Point::default(), current: Point::default() },
        InputState::PendingWireFromPoint { start: PinRef::new(id, 0), current: Point::default() },
    ];
    for s in states {
        assert!(!s.is_idle(), "{s:?}");
    }
}

#[test]
fn ui_state_default_has_no_primary() {
    let ui = UiState::default();
    assert!(ui.primary.is_none());
}
