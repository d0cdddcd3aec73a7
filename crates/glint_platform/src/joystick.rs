//! Joystick and gamepad state types

/// Opaque joystick handle issued by a platform backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoystickId(pub u32);

/// What a joystick poll should refresh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PollMode {
    /// Only check that the device is still connected
    Presence,
    /// Refresh axes
    Axes,
    /// Refresh buttons and hats
    Buttons,
    /// Refresh everything
    #[default]
    All,
}

/// Hat switch directions, combinable as a bit set
pub mod hat {
    /// Centered
    pub const CENTERED: u8 = 0;
    /// Up
    pub const UP: u8 = 1;
    /// Right
    pub const RIGHT: u8 = 2;
    /// Down
    pub const DOWN: u8 = 4;
    /// Left
    pub const LEFT: u8 = 8;
}

/// Snapshot of a joystick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoystickState {
    /// Device name
    pub name: String,
    /// SDL-style GUID string used for gamepad mappings
    pub guid: String,
    /// Axis positions in `-1.0..=1.0`
    pub axes: Vec<f32>,
    /// Button states
    pub buttons: Vec<bool>,
    /// Hat states, see [`hat`]
    pub hats: Vec<u8>,
}
