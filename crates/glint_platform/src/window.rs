//! Window handles, configuration and cursors

/// Opaque window handle issued by a platform backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Opaque cursor handle issued by a platform backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CursorId(pub u64);

/// Window configuration
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial content width
    pub width: u32,
    /// Initial content height
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
    /// Whether to show window decorations (title bar, borders)
    pub decorated: bool,
    /// Whether the window should stay above other windows
    pub floating: bool,
    /// Whether the window is shown on creation
    pub visible: bool,
    /// Whether the window is activated on creation
    pub focused: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Glint".to_string(),
            width: 640,
            height: 480,
            resizable: true,
            decorated: true,
            floating: false,
            visible: true,
            focused: true,
        }
    }
}

impl WindowConfig {
    /// Create a new window configuration with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set whether the window is resizable
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether to show window decorations
    pub fn decorated(mut self, decorated: bool) -> Self {
        self.decorated = decorated;
        self
    }

    /// Set whether the window floats above others
    pub fn floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    /// Set whether the window is shown on creation
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set whether the window is activated on creation
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Standard cursor shapes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StandardCursor {
    /// Default arrow cursor
    #[default]
    Arrow,
    /// Text/I-beam cursor
    IBeam,
    /// Crosshair cursor
    Crosshair,
    /// Pointing hand
    PointingHand,
    /// East-West resize cursor
    ResizeEW,
    /// North-South resize cursor
    ResizeNS,
    /// Northwest-Southeast resize cursor
    ResizeNWSE,
    /// Northeast-Southwest resize cursor
    ResizeNESW,
    /// Omni-directional resize cursor
    ResizeAll,
    /// Not allowed cursor
    NotAllowed,
}

/// RGBA image used for custom cursors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 pixel data
    pub pixels: Vec<u8>,
}

impl CursorImage {
    /// Whether the pixel buffer matches the declared dimensions
    pub fn is_valid(&self) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|area| area.checked_mul(4))
            .is_some_and(|len| len == self.pixels.len())
    }
}
