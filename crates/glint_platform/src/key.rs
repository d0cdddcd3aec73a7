//! Logical key enumeration
//!
//! [`Key`] is the platform-independent identity of a physical key. The
//! numeric codes are stable and are used directly as table indices by the
//! platform backends, so the enumeration is closed: backends map native
//! scancodes onto it but never extend it.

/// Number of slots needed for a table indexed by [`Key::code`]
pub const KEY_COUNT: usize = Key::LAST.code() as usize + 1;

/// Maximum length of a key name, including the terminator a C consumer
/// would append
pub const KEY_NAME_MAX: usize = 16;

/// Logical key codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i16)]
pub enum Key {
    /// Key not known to the platform
    Unknown = -1,

    // Printable keys
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equals = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    /// Non-US key #1
    World1 = 161,
    /// Non-US key #2
    World2 = 162,

    // Function and navigation keys
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,

    // Numeric keypad
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,

    // Modifiers
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl Key {
    /// Lowest named key code
    pub const FIRST: Key = Key::Space;

    /// Highest key code
    pub const LAST: Key = Key::Menu;

    /// Every member of the enumeration except [`Key::Unknown`], in code order
    pub const ALL: &'static [Key] = &[
        Key::Space,
        Key::Apostrophe,
        Key::Comma,
        Key::Minus,
        Key::Period,
        Key::Slash,
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
        Key::Semicolon,
        Key::Equals,
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::LeftBracket,
        Key::Backslash,
        Key::RightBracket,
        Key::GraveAccent,
        Key::World1,
        Key::World2,
        Key::Escape,
        Key::Enter,
        Key::Tab,
        Key::Backspace,
        Key::Insert,
        Key::Delete,
        Key::Right,
        Key::Left,
        Key::Down,
        Key::Up,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::CapsLock,
        Key::ScrollLock,
        Key::NumLock,
        Key::PrintScreen,
        Key::Pause,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::F13,
        Key::F14,
        Key::F15,
        Key::F16,
        Key::F17,
        Key::F18,
        Key::F19,
        Key::F20,
        Key::F21,
        Key::F22,
        Key::F23,
        Key::F24,
        Key::F25,
        Key::Kp0,
        Key::Kp1,
        Key::Kp2,
        Key::Kp3,
        Key::Kp4,
        Key::Kp5,
        Key::Kp6,
        Key::Kp7,
        Key::Kp8,
        Key::Kp9,
        Key::KpDecimal,
        Key::KpDivide,
        Key::KpMultiply,
        Key::KpSubtract,
        Key::KpAdd,
        Key::KpEnter,
        Key::KpEqual,
        Key::LeftShift,
        Key::LeftControl,
        Key::LeftAlt,
        Key::LeftSuper,
        Key::RightShift,
        Key::RightControl,
        Key::RightAlt,
        Key::RightSuper,
        Key::Menu,
    ];

    /// Numeric code of this key (`-1` for [`Key::Unknown`])
    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Table index for this key, or `None` for [`Key::Unknown`]
    pub const fn index(self) -> Option<usize> {
        match self {
            Key::Unknown => None,
            key => Some(key as i16 as usize),
        }
    }

    /// Look up a key by its numeric code
    pub fn from_code(code: i16) -> Option<Key> {
        Key::ALL.iter().copied().find(|key| key.code() == code)
    }

    /// Whether this key produces a printable character on a US layout
    pub fn is_printable(self) -> bool {
        matches!(self.code(), 32..=162)
    }

    /// Whether this key is one of the eight modifier keys
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::RightShift
                | Key::LeftControl
                | Key::RightControl
                | Key::LeftAlt
                | Key::RightAlt
                | Key::LeftSuper
                | Key::RightSuper
        )
    }

    /// Human-readable display name
    ///
    /// Identical on every platform; backends copy it into their key name
    /// tables, truncated to fit [`KEY_NAME_MAX`].
    pub fn name(self) -> &'static str {
        match self {
            // Printable keys
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
            Key::Num0 => "0",
            Key::Space => "SPACE",
            Key::Minus => "MINUS",
            Key::Equals => "EQUAL",
            Key::LeftBracket => "LEFT BRACKET",
            Key::RightBracket => "RIGHT BRACKET",
            Key::Backslash => "BACKSLASH",
            Key::Semicolon => "SEMICOLON",
            Key::Apostrophe => "APOSTROPHE",
            Key::GraveAccent => "GRAVE ACCENT",
            Key::Comma => "COMMA",
            Key::Period => "PERIOD",
            Key::Slash => "SLASH",
            Key::World1 => "WORLD 1",
            Key::World2 => "WORLD 2",

            // Function keys
            Key::Escape => "ESCAPE",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::F13 => "F13",
            Key::F14 => "F14",
            Key::F15 => "F15",
            Key::F16 => "F16",
            Key::F17 => "F17",
            Key::F18 => "F18",
            Key::F19 => "F19",
            Key::F20 => "F20",
            Key::F21 => "F21",
            Key::F22 => "F22",
            Key::F23 => "F23",
            Key::F24 => "F24",
            Key::F25 => "F25",
            Key::Up => "UP",
            Key::Down => "DOWN",
            Key::Left => "LEFT",
            Key::Right => "RIGHT",
            Key::LeftShift => "LEFT SHIFT",
            Key::RightShift => "RIGHT SHIFT",
            Key::LeftControl => "LEFT CONTROL",
            Key::RightControl => "RIGHT CONTROL",
            Key::LeftAlt => "LEFT ALT",
            Key::RightAlt => "RIGHT ALT",
            Key::Tab => "TAB",
            Key::Enter => "ENTER",
            Key::Backspace => "BACKSPACE",
            Key::Insert => "INSERT",
            Key::Delete => "DELETE",
            Key::PageUp => "PAGE UP",
            Key::PageDown => "PAGE DOWN",
            Key::Home => "HOME",
            Key::End => "END",
            Key::Kp0 => "KEYPAD 0",
            Key::Kp1 => "KEYPAD 1",
            Key::Kp2 => "KEYPAD 2",
            Key::Kp3 => "KEYPAD 3",
            Key::Kp4 => "KEYPAD 4",
            Key::Kp5 => "KEYPAD 5",
            Key::Kp6 => "KEYPAD 6",
            Key::Kp7 => "KEYPAD 7",
            Key::Kp8 => "KEYPAD 8",
            Key::Kp9 => "KEYPAD 9",
            Key::KpDivide => "KEYPAD DIVIDE",
            Key::KpMultiply => "KEYPAD MULTIPLY",
            Key::KpSubtract => "KEYPAD SUBTRACT",
            Key::KpAdd => "KEYPAD ADD",
            Key::KpDecimal => "KEYPAD DECIMAL",
            Key::KpEqual => "KEYPAD EQUAL",
            Key::KpEnter => "KEYPAD ENTER",
            Key::PrintScreen => "PRINT SCREEN",
            Key::NumLock => "NUM LOCK",
            Key::CapsLock => "CAPS LOCK",
            Key::ScrollLock => "SCROLL LOCK",
            Key::Pause => "PAUSE",
            Key::LeftSuper => "LEFT SUPER",
            Key::RightSuper => "RIGHT SUPER",
            Key::Menu => "MENU",

            Key::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_and_unique() {
        for pair in Key::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{:?} >= {:?}", pair[0], pair[1]);
        }
        assert_eq!(Key::ALL.len(), 120);
    }

    #[test]
    fn test_code_round_trip() {
        for &key in Key::ALL {
            assert_eq!(Key::from_code(key.code()), Some(key));
        }
        assert_eq!(Key::from_code(-1), None);
        assert_eq!(Key::from_code(33), None);
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(Key::Unknown.index(), None);
        assert_eq!(Key::LAST.index(), Some(KEY_COUNT - 1));
        assert!(Key::ALL.iter().all(|k| k.index().unwrap() < KEY_COUNT));
    }

    #[test]
    fn test_names_fit() {
        for &key in Key::ALL {
            let name = key.name();
            assert!(!name.is_empty());
            assert!(name.len() < KEY_NAME_MAX, "{name} too long");
        }
    }

    #[test]
    fn test_modifier_classification() {
        assert!(Key::RightControl.is_modifier());
        assert!(!Key::Menu.is_modifier());
        assert!(Key::A.is_printable());
        assert!(!Key::Escape.is_printable());
    }
}
