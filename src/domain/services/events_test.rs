use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;
use tui_textarea::Key;

use super::map_key_event;
use crate::domain::models::Event;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    return KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    };
}

#[test]
fn it_submits_on_plain_enter() {
    let event = map_key_event(press(KeyCode::Enter, KeyModifiers::NONE));
    assert!(matches!(event, Some(Event::KeyboardEnter())));
}

#[test]
fn it_inserts_newline_on_shift_enter() {
    let event = map_key_event(press(KeyCode::Enter, KeyModifiers::SHIFT));
    assert!(matches!(event, Some(Event::KeyboardNewline())));
}

#[test]
fn it_does_not_special_case_other_enter_modifiers() {
    let event = map_key_event(press(KeyCode::Enter, KeyModifiers::ALT));
    assert!(matches!(event, Some(Event::KeyboardEnter())));
}

#[test]
fn it_maps_function_keys_to_quick_prompts() {
    assert!(matches!(
        map_key_event(press(KeyCode::F(1), KeyModifiers::NONE)),
        Some(Event::QuickPrompt(0))
    ));
    assert!(matches!(
        map_key_event(press(KeyCode::F(4), KeyModifiers::NONE)),
        Some(Event::QuickPrompt(3))
    ));
    assert!(matches!(
        map_key_event(press(KeyCode::F(5), KeyModifiers::NONE)),
        Some(Event::KeyboardCharInput(_))
    ));
}

#[test]
fn it_maps_control_keys() {
    assert!(matches!(
        map_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Event::KeyboardCTRLC())
    ));
    assert!(matches!(
        map_key_event(press(KeyCode::Char('u'), KeyModifiers::CONTROL)),
        Some(Event::UIScrollPageUp())
    ));
    assert!(matches!(
        map_key_event(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
        Some(Event::UIScrollPageDown())
    ));
    assert!(matches!(
        map_key_event(press(KeyCode::Tab, KeyModifiers::NONE)),
        Some(Event::ScopeNext())
    ));
}

#[test]
fn it_passes_characters_to_textarea() {
    let event = map_key_event(press(KeyCode::Char('c'), KeyModifiers::NONE));
    match event {
        Some(Event::KeyboardCharInput(input)) => {
            assert!(matches!(input.key, Key::Char('c')));
            assert!(!input.ctrl);
        }
        _ => panic!("expected character input"),
    }
}

#[test]
fn it_ignores_key_release() {
    let mut keyevent = press(KeyCode::Enter, KeyModifiers::NONE);
    keyevent.kind = KeyEventKind::Release;

    assert!(map_key_event(keyevent).is_none());
}
