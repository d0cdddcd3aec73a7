//! Raw key translation tables
//!
//! Three tables are built once during init and are read-only afterwards:
//!
//! - scancode → [`Key`], from the hand-maintained [`NATIVE_KEY_MAP`]
//! - [`Key`] → scancode, derived from the first table
//! - [`Key`] → display name, derived from [`Key::name`] alone
//!
//! # Aliasing
//!
//! The association list is applied in order and a repeated scancode keeps
//! its last entry. The inverse table is derived by an ascending scancode
//! scan with last-write-wins, so when several scancodes map to one key the
//! highest scancode is the one reported by [`KeyTables::scancode`].

use glint_platform::{Key, KEY_COUNT, KEY_NAME_MAX};

/// Size of the native scancode space
pub const SCANCODE_COUNT: usize = 512;

/// Release flag carried in bit 7 of a raw key code
pub const UP_PREFIX: u16 = 0x80;

/// Raw key codes of the named (non-alphanumeric) keys
pub mod rawkey {
    pub const SPACE: u16 = 0x40;
    pub const BACKSPACE: u16 = 0x41;
    pub const TAB: u16 = 0x42;
    /// Numeric pad enter
    pub const ENTER: u16 = 0x43;
    pub const RETURN: u16 = 0x44;
    pub const ESC: u16 = 0x45;
    pub const DEL: u16 = 0x46;
    pub const INSERT: u16 = 0x47;
    pub const PAGEUP: u16 = 0x48;
    pub const PAGEDOWN: u16 = 0x49;
    pub const F11: u16 = 0x4B;
    pub const CRSRUP: u16 = 0x4C;
    pub const CRSRDOWN: u16 = 0x4D;
    pub const CRSRRIGHT: u16 = 0x4E;
    pub const CRSRLEFT: u16 = 0x4F;
    pub const F1: u16 = 0x50;
    pub const F2: u16 = 0x51;
    pub const F3: u16 = 0x52;
    pub const F4: u16 = 0x53;
    pub const F5: u16 = 0x54;
    pub const F6: u16 = 0x55;
    pub const F7: u16 = 0x56;
    pub const F8: u16 = 0x57;
    pub const F9: u16 = 0x58;
    pub const F10: u16 = 0x59;
    pub const HELP: u16 = 0x5F;
    pub const LSHIFT: u16 = 0x60;
    pub const RSHIFT: u16 = 0x61;
    pub const CAPSLOCK: u16 = 0x62;
    pub const LCTRL: u16 = 0x63;
    pub const LALT: u16 = 0x64;
    pub const RALT: u16 = 0x65;
    pub const LCOMMAND: u16 = 0x66;
    pub const RCOMMAND: u16 = 0x67;
    pub const MENU: u16 = 0x6B;
    pub const BREAK: u16 = 0x6E;
    pub const F12: u16 = 0x6F;
    pub const HOME: u16 = 0x70;
    pub const END: u16 = 0x71;
    pub const F13: u16 = 0x76;
    pub const F14: u16 = 0x77;
    pub const F15: u16 = 0x78;
}

/// Scancode → key association list for AmigaOS 4 keyboards
///
/// Applied top to bottom. Repeated scancodes are intentional: the later
/// entry is the one that takes effect.
pub static NATIVE_KEY_MAP: &[(u16, Key)] = &[
    (0x0b, Key::GraveAccent),
    (0x01, Key::Num1),
    (0x02, Key::Num2),
    (0x03, Key::Num3),
    (0x04, Key::Num4),
    (0x05, Key::Num5),
    (0x06, Key::Num6),
    (0x07, Key::Num7),
    (0x08, Key::Num8),
    (0x09, Key::Num9),
    (0x0a, Key::Num0),
    (rawkey::SPACE, Key::Space),
    (0x3a, Key::Minus),
    (0x0c, Key::Equals),
    (0x10, Key::Q),
    (0x11, Key::W),
    (0x12, Key::E),
    (0x13, Key::R),
    (0x14, Key::T),
    (0x15, Key::Y),
    (0x16, Key::U),
    (0x17, Key::I),
    (0x18, Key::O),
    (0x19, Key::P),
    (0x1a, Key::LeftBracket),
    (0x1b, Key::RightBracket),
    (0x20, Key::A),
    (0x21, Key::S),
    (0x22, Key::D),
    (0x23, Key::F),
    (0x24, Key::G),
    (0x25, Key::H),
    (0x26, Key::J),
    (0x27, Key::K),
    (0x28, Key::L),
    (0x31, Key::Z),
    (0x32, Key::X),
    (0x33, Key::C),
    (0x34, Key::V),
    (0x35, Key::B),
    (0x36, Key::N),
    (0x37, Key::M),
    (0x38, Key::Comma),
    (0x39, Key::Period),
    (0x3a, Key::Slash),
    (0x00, Key::Backslash),
    (rawkey::ESC, Key::Escape),
    (rawkey::TAB, Key::Tab),
    (rawkey::LSHIFT, Key::LeftShift),
    (rawkey::RSHIFT, Key::RightShift),
    (rawkey::LCTRL, Key::LeftControl),
    (rawkey::LCTRL, Key::RightControl),
    (rawkey::LALT, Key::LeftAlt),
    (rawkey::RALT, Key::RightAlt),
    (rawkey::LCOMMAND, Key::LeftSuper),
    (rawkey::RCOMMAND, Key::RightSuper),
    (rawkey::MENU, Key::Menu),
    (rawkey::CAPSLOCK, Key::CapsLock),
    (rawkey::BREAK, Key::PrintScreen),
    (0x5f, Key::ScrollLock),
    (rawkey::BREAK, Key::Pause),
    (rawkey::DEL, Key::Delete),
    (rawkey::BACKSPACE, Key::Backspace),
    (rawkey::RETURN, Key::Enter),
    (rawkey::HOME, Key::Home),
    (rawkey::END, Key::End),
    (rawkey::PAGEUP, Key::PageUp),
    (rawkey::PAGEDOWN, Key::PageDown),
    (rawkey::INSERT, Key::Insert),
    (rawkey::CRSRLEFT, Key::Left),
    (rawkey::CRSRRIGHT, Key::Right),
    (rawkey::CRSRDOWN, Key::Down),
    (rawkey::CRSRUP, Key::Up),
    (rawkey::F1, Key::F1),
    (rawkey::F2, Key::F2),
    (rawkey::F3, Key::F3),
    (rawkey::F4, Key::F4),
    (rawkey::F5, Key::F5),
    (rawkey::F6, Key::F6),
    (rawkey::F7, Key::F7),
    (rawkey::F8, Key::F8),
    (rawkey::F9, Key::F9),
    (rawkey::F10, Key::F10),
    (rawkey::F11, Key::F11),
    (rawkey::F12, Key::F12),
    (rawkey::F13, Key::F13),
    (rawkey::F14, Key::F14),
    (rawkey::F15, Key::F15),
    // The Help key stands in for F16
    (rawkey::HELP, Key::F16),
    (0x5c, Key::KpDivide),
    (0x5d, Key::KpMultiply),
    (0x4a, Key::KpSubtract),
    (0x5e, Key::KpAdd),
    (0x0f, Key::Kp0),
    (0x1d, Key::Kp1),
    (0x1e, Key::Kp2),
    (0x1f, Key::Kp3),
    (0x2d, Key::Kp4),
    (0x2e, Key::Kp5),
    (0x2f, Key::Kp6),
    (0x3d, Key::Kp7),
    (0x3e, Key::Kp8),
    (0x3f, Key::Kp9),
    (0x3c, Key::KpDecimal),
    (rawkey::ENTER, Key::KpEnter),
];

/// The three key translation tables
#[derive(Clone)]
pub struct KeyTables {
    keycodes: [Option<Key>; SCANCODE_COUNT],
    scancodes: [Option<u16>; KEY_COUNT],
    names: [&'static str; KEY_COUNT],
}

impl KeyTables {
    /// Build the tables from [`NATIVE_KEY_MAP`]
    pub fn build() -> Self {
        Self::from_map(NATIVE_KEY_MAP)
    }

    /// Build the tables from an arbitrary association list
    pub fn from_map(map: &[(u16, Key)]) -> Self {
        let mut tables = Self {
            keycodes: [None; SCANCODE_COUNT],
            scancodes: [None; KEY_COUNT],
            names: [""; KEY_COUNT],
        };

        for &(scancode, key) in map {
            let slot = usize::from(scancode);
            debug_assert!(slot < SCANCODE_COUNT, "scancode {scancode:#x} out of range");
            debug_assert!(key != Key::Unknown, "scancode {scancode:#x} mapped to Unknown");
            if slot >= SCANCODE_COUNT || key == Key::Unknown {
                continue;
            }
            if let Some(previous) = tables.keycodes[slot].replace(key) {
                tracing::trace!("scancode {:#x}: {:?} replaced by {:?}", scancode, previous, key);
            }
        }

        for (scancode, key) in tables.keycodes.iter().enumerate() {
            if let Some(index) = key.and_then(Key::index) {
                tables.scancodes[index] = Some(scancode as u16);
            }
        }

        for &key in Key::ALL {
            if (Key::FIRST.code()..=Key::LAST.code()).contains(&key.code()) {
                if let Some(index) = key.index() {
                    tables.names[index] = truncate_name(key.name());
                }
            }
        }

        tracing::debug!(
            "Key tables built: {} scancodes mapped, {} keys reachable",
            tables.keycodes.iter().flatten().count(),
            tables.scancodes.iter().flatten().count()
        );

        tables
    }

    /// Logical key at a scancode, `None` if unmapped or out of range
    pub fn key(&self, scancode: u16) -> Option<Key> {
        self.keycodes.get(usize::from(scancode)).copied().flatten()
    }

    /// Like [`KeyTables::key`] but reports unmapped codes as [`Key::Unknown`]
    pub fn translate(&self, scancode: u16) -> Key {
        self.key(scancode).unwrap_or(Key::Unknown)
    }

    /// Scancode that produces a key, `None` if no scancode does
    pub fn scancode(&self, key: Key) -> Option<u16> {
        key.index().and_then(|index| self.scancodes[index])
    }

    /// Display name of a key, empty for codes outside the named range
    pub fn name(&self, key: Key) -> &'static str {
        key.index().map_or("", |index| self.names[index])
    }

    /// Display name of the key at a scancode
    pub fn scancode_name(&self, scancode: u16) -> Option<&'static str> {
        self.key(scancode)
            .map(|key| self.name(key))
            .filter(|name| !name.is_empty())
    }

    /// Every mapped `(scancode, key)` pair in ascending scancode order
    pub fn mappings(&self) -> impl Iterator<Item = (u16, Key)> + '_ {
        self.keycodes
            .iter()
            .enumerate()
            .filter_map(|(scancode, key)| key.map(|key| (scancode as u16, key)))
    }
}

impl std::fmt::Debug for KeyTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyTables")
            .field("mapped", &self.mappings().count())
            .finish()
    }
}

/// Clip a name so it fits [`KEY_NAME_MAX`] bytes with a terminator
fn truncate_name(name: &'static str) -> &'static str {
    let mut end = name.len().min(KEY_NAME_MAX - 1);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mapped_scancode_has_an_inverse() {
        let tables = KeyTables::build();
        for (scancode, key) in tables.mappings() {
            assert!(
                tables.scancode(key).is_some(),
                "{key:?} at {scancode:#x} has no inverse"
            );
        }
    }

    #[test]
    fn test_inverse_round_trips() {
        let tables = KeyTables::build();
        for &key in Key::ALL {
            if let Some(scancode) = tables.scancode(key) {
                assert_eq!(tables.key(scancode), Some(key));
            }
        }
    }

    #[test]
    fn test_names_cover_named_range() {
        let tables = KeyTables::build();
        for &key in Key::ALL {
            let name = tables.name(key);
            assert!(!name.is_empty(), "{key:?} has no name");
            assert!(name.len() < KEY_NAME_MAX);
        }
        assert_eq!(tables.name(Key::Unknown), "");
        assert_eq!(tables.name(Key::KpMultiply), "KEYPAD MULTIPLY");
    }

    #[test]
    fn test_names_ignore_scancode_tables() {
        // An empty map still yields the full name table
        let tables = KeyTables::from_map(&[]);
        assert_eq!(tables.name(Key::Menu), "MENU");
        assert_eq!(tables.scancode(Key::Menu), None);
    }

    #[test]
    fn test_repeated_scancode_last_entry_wins() {
        let tables = KeyTables::build();
        assert_eq!(tables.key(0x3a), Some(Key::Slash));
        assert_eq!(tables.key(rawkey::LCTRL), Some(Key::RightControl));
        assert_eq!(tables.key(rawkey::BREAK), Some(Key::Pause));
        assert_eq!(tables.key(rawkey::HELP), Some(Key::F16));

        // The overwritten keys are unreachable
        assert_eq!(tables.scancode(Key::Minus), None);
        assert_eq!(tables.scancode(Key::LeftControl), None);
        assert_eq!(tables.scancode(Key::PrintScreen), None);
        assert_eq!(tables.scancode(Key::ScrollLock), None);
    }

    #[test]
    fn test_aliased_key_inverse_is_highest_scancode() {
        let tables = KeyTables::from_map(&[(0x63, Key::LeftControl), (0x10, Key::LeftControl), (0x41, Key::LeftControl)]);
        assert_eq!(tables.key(0x10), Some(Key::LeftControl));
        assert_eq!(tables.key(0x41), Some(Key::LeftControl));
        assert_eq!(tables.key(0x63), Some(Key::LeftControl));
        assert_eq!(tables.scancode(Key::LeftControl), Some(0x63));
    }

    #[test]
    fn test_shipped_map_is_in_range() {
        for &(scancode, key) in NATIVE_KEY_MAP {
            assert!(usize::from(scancode) < SCANCODE_COUNT);
            assert_ne!(key, Key::Unknown);
        }
    }

    #[test]
    fn test_letters_and_digits_mapped() {
        let tables = KeyTables::build();
        for key in [Key::A, Key::M, Key::Z, Key::Num0, Key::Num9, Key::Space, Key::Enter] {
            assert!(tables.scancode(key).is_some(), "{key:?} unmapped");
        }
        assert_eq!(tables.key(0x20), Some(Key::A));
        assert_eq!(tables.scancode(Key::Escape), Some(rawkey::ESC));
    }

    #[test]
    fn test_unmapped_and_out_of_range_scancodes() {
        let tables = KeyTables::build();
        assert_eq!(tables.key(0x7f), None);
        assert_eq!(tables.translate(0x7f), Key::Unknown);
        assert_eq!(tables.key(600), None);
        assert_eq!(tables.scancode_name(0x7f), None);
        assert_eq!(tables.scancode_name(0x20), Some("A"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("KEYPAD MULTIPLY"), "KEYPAD MULTIPLY");
        assert_eq!(truncate_name("A NAME THAT IS FAR TOO LONG"), "A NAME THAT IS ");
    }
}
