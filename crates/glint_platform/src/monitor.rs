//! Monitor and video mode types

/// Opaque monitor handle issued by a platform backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(pub u32);

/// A display mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoMode {
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Bit depth of the red channel
    pub red_bits: u8,
    /// Bit depth of the green channel
    pub green_bits: u8,
    /// Bit depth of the blue channel
    pub blue_bits: u8,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
}

/// Axis-aligned rectangle in screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

/// Per-channel gamma lookup table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GammaRamp {
    /// Red channel
    pub red: Vec<u16>,
    /// Green channel
    pub green: Vec<u16>,
    /// Blue channel
    pub blue: Vec<u16>,
}

/// Description of a connected monitor
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorInfo {
    /// Handle to pass to monitor operations
    pub id: MonitorId,
    /// Human-readable name
    pub name: String,
    /// Physical width in millimetres, if known
    pub width_mm: u32,
    /// Physical height in millimetres, if known
    pub height_mm: u32,
}
