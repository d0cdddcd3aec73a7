//! Intuition input conversion (IDCMP -> glint_platform)

use glint_platform::{InputEvent, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent};

use crate::keys::{KeyTables, UP_PREFIX};
use crate::native::{button_code, qualifier};

/// Convert qualifier bits to glint Modifiers
pub fn convert_modifiers(bits: u16) -> Modifiers {
    Modifiers {
        shift: bits & (qualifier::LSHIFT | qualifier::RSHIFT) != 0,
        ctrl: bits & qualifier::CONTROL != 0,
        alt: bits & (qualifier::LALT | qualifier::RALT) != 0,
        meta: bits & (qualifier::LCOMMAND | qualifier::RCOMMAND) != 0,
        caps_lock: bits & qualifier::CAPSLOCK != 0,
        num_lock: false,
    }
}

/// Convert a raw key code (with up prefix) to a glint KeyboardEvent
pub fn convert_raw_key(tables: &KeyTables, code: u16, bits: u16) -> KeyboardEvent {
    let scancode = code & !UP_PREFIX;
    let state = if code & UP_PREFIX != 0 {
        KeyState::Released
    } else if bits & qualifier::REPEAT != 0 {
        KeyState::Repeated
    } else {
        KeyState::Pressed
    };

    KeyboardEvent {
        key: tables.translate(scancode),
        scancode,
        state,
        modifiers: convert_modifiers(bits),
    }
}

/// Convert a mouse button code (without up prefix)
pub fn convert_mouse_button(code: u16) -> MouseButton {
    match code {
        button_code::LBUTTON => MouseButton::Left,
        button_code::RBUTTON => MouseButton::Right,
        button_code::MBUTTON => MouseButton::Middle,
        button_code::BUTTON4 => MouseButton::Back,
        button_code::BUTTON5 => MouseButton::Forward,
        other => MouseButton::Other(other),
    }
}

/// Convert a button change to a glint InputEvent
pub fn convert_mouse_buttons(code: u16, bits: u16) -> InputEvent {
    let button = convert_mouse_button(code & !button_code::UP_PREFIX);
    let modifiers = convert_modifiers(bits);
    let event = if code & button_code::UP_PREFIX != 0 {
        MouseEvent::ButtonReleased { button, modifiers }
    } else {
        MouseEvent::ButtonPressed { button, modifiers }
    };
    InputEvent::Mouse(event)
}

/// Convert wheel movement to a glint InputEvent
///
/// Intuition reports wheel-down as a positive delta; glint uses positive
/// for scrolling up, like the other backends.
pub fn convert_wheel(wheel_x: i32, wheel_y: i32) -> InputEvent {
    InputEvent::Scroll {
        delta_x: -f64::from(wheel_x),
        delta_y: -f64::from(wheel_y),
    }
}

/// Convert pointer motion to a glint InputEvent
pub fn mouse_moved(x: f64, y: f64) -> InputEvent {
    InputEvent::Mouse(MouseEvent::Moved { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::rawkey;
    use glint_platform::Key;

    #[test]
    fn test_modifiers_from_qualifier() {
        let m = convert_modifiers(qualifier::RSHIFT | qualifier::RCOMMAND);
        assert!(m.shift && m.meta);
        assert!(!m.ctrl && !m.alt && !m.caps_lock);

        let m = convert_modifiers(qualifier::CAPSLOCK | qualifier::NUMERICPAD);
        assert!(m.is_empty());
        assert!(m.caps_lock);
    }

    #[test]
    fn test_raw_key_press_release_repeat() {
        let tables = KeyTables::build();

        let press = convert_raw_key(&tables, rawkey::ESC, 0);
        assert_eq!(press.key, Key::Escape);
        assert_eq!(press.state, KeyState::Pressed);

        let release = convert_raw_key(&tables, rawkey::ESC | UP_PREFIX, 0);
        assert_eq!(release.key, Key::Escape);
        assert_eq!(release.scancode, rawkey::ESC);
        assert_eq!(release.state, KeyState::Released);

        let repeat = convert_raw_key(&tables, rawkey::SPACE, qualifier::REPEAT);
        assert_eq!(repeat.state, KeyState::Repeated);
    }

    #[test]
    fn test_unmapped_raw_key_is_unknown() {
        let tables = KeyTables::build();
        let event = convert_raw_key(&tables, 0x7C, 0);
        assert_eq!(event.key, Key::Unknown);
        assert_eq!(event.scancode, 0x7C);
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(
            convert_mouse_buttons(button_code::LBUTTON, qualifier::CONTROL),
            InputEvent::Mouse(MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                modifiers: Modifiers {
                    ctrl: true,
                    ..Default::default()
                },
            })
        );
        assert!(matches!(
            convert_mouse_buttons(button_code::RBUTTON | button_code::UP_PREFIX, 0),
            InputEvent::Mouse(MouseEvent::ButtonReleased {
                button: MouseButton::Right,
                ..
            })
        ));
        assert_eq!(convert_mouse_button(0x70), MouseButton::Other(0x70));
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(
            convert_wheel(0, 1),
            InputEvent::Scroll {
                delta_x: -0.0,
                delta_y: -1.0
            }
        );
    }
}
