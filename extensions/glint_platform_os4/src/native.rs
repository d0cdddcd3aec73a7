//! Native AmigaOS 4 services
//!
//! [`NativeOs`] is the seam between the backend and the operating system:
//! every exec, dos, intuition, graphics, textclip and AmigaInput call the
//! backend makes goes through it. Handles are plain copyable ids; ownership
//! (who must release what, and when) is tracked by the backend, not by the
//! handle types.

use std::time::Duration;

use glint_platform::FrameSize;

/// Base pointer of an opened library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LibraryBase(pub u32);

/// Interface obtained from a library base
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interface(pub u32);

/// Exec message port
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortId(pub u32);

/// Intuition window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeWindow(pub u32);

/// Custom pointer object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativePointer(pub u32);

/// A message taken from a port; must be handed back with
/// [`NativeOs::reply_msg`] so the sender can continue
#[derive(Debug, PartialEq, Eq)]
pub struct Message {
    /// Sender-side identity used to route the reply
    pub token: u64,
    /// Payload
    pub kind: MessageKind,
}

/// Message payloads the backend understands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// IDCMP message for one of our windows
    Idcmp {
        /// Window the message was sent for
        window: NativeWindow,
        /// IDCMP class and its data
        class: IdcmpClass,
    },
    /// Workbench AppWindow/AppIcon message
    AppMessage {
        /// Application-defined id
        id: u32,
    },
    /// Wake-up posted by `post_empty_event`
    Wakeup,
}

/// IDCMP classes the event pump translates
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdcmpClass {
    /// Raw keyboard code; bit 7 set on release
    RawKey {
        /// Raw key code including the up prefix
        code: u16,
        /// Qualifier bits, see [`qualifier`]
        qualifier: u16,
    },
    /// Pointer moved, position relative to the window
    MouseMove {
        /// X position
        x: i32,
        /// Y position
        y: i32,
    },
    /// Mouse button change, see [`button_code`]
    MouseButtons {
        /// Button code including the up prefix
        code: u16,
        /// Qualifier bits
        qualifier: u16,
    },
    /// Wheel movement
    ExtendedMouse {
        /// Horizontal delta
        wheel_x: i32,
        /// Vertical delta
        wheel_y: i32,
    },
    /// Close gadget hit
    CloseWindow,
    /// Inner size changed
    NewSize {
        /// New inner width
        width: u32,
        /// New inner height
        height: u32,
    },
    /// Window moved
    ChangeWindow {
        /// New left edge of the content area
        x: i32,
        /// New top edge of the content area
        y: i32,
    },
    /// Window became active
    ActiveWindow,
    /// Window became inactive
    InactiveWindow,
    /// Damage needs repair
    RefreshWindow,
    /// Window was iconified (true) or uniconified (false)
    Iconify(bool),
}

/// Input event qualifier bits
pub mod qualifier {
    /// Left shift held
    pub const LSHIFT: u16 = 0x0001;
    /// Right shift held
    pub const RSHIFT: u16 = 0x0002;
    /// Caps lock on
    pub const CAPSLOCK: u16 = 0x0004;
    /// Control held
    pub const CONTROL: u16 = 0x0008;
    /// Left alt held
    pub const LALT: u16 = 0x0010;
    /// Right alt held
    pub const RALT: u16 = 0x0020;
    /// Left Amiga key held
    pub const LCOMMAND: u16 = 0x0040;
    /// Right Amiga key held
    pub const RCOMMAND: u16 = 0x0080;
    /// Key is on the numeric pad
    pub const NUMERICPAD: u16 = 0x0100;
    /// Auto-repeat
    pub const REPEAT: u16 = 0x0200;
}

/// Mouse button codes carried by [`IdcmpClass::MouseButtons`]
pub mod button_code {
    /// Set on release
    pub const UP_PREFIX: u16 = 0x80;
    /// Left button
    pub const LBUTTON: u16 = 0x68;
    /// Right button
    pub const RBUTTON: u16 = 0x69;
    /// Middle button
    pub const MBUTTON: u16 = 0x6A;
    /// Fourth button
    pub const BUTTON4: u16 = 0x7E;
    /// Fifth button
    pub const BUTTON5: u16 = 0x7F;
}

/// Built-in pointer shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerShape {
    /// Preferences default pointer
    Default,
    /// Text cursor
    Text,
    /// Hand
    Hand,
    /// Cross
    Cross,
    /// Horizontal resize
    HorizontalResize,
    /// Vertical resize
    VerticalResize,
    /// Diagonal resize, top-left to bottom-right
    DiagonalResizeDown,
    /// Diagonal resize, bottom-left to top-right
    DiagonalResizeUp,
    /// Move
    Move,
    /// Not available
    NotAvailable,
    /// Blank pointer
    Invisible,
    /// A custom pointer object
    Custom(NativePointer),
}

/// Everything intuition needs to open a window
#[derive(Clone, Debug, PartialEq)]
pub struct NativeWindowSpec<'a> {
    /// Title bar text
    pub title: &'a str,
    /// Left edge of the content area
    pub x: i32,
    /// Top edge of the content area
    pub y: i32,
    /// Inner width
    pub width: u32,
    /// Inner height
    pub height: u32,
    /// Size gadget present
    pub resizable: bool,
    /// Borders and title bar present
    pub decorated: bool,
    /// Stays in front
    pub floating: bool,
    /// Opened hidden
    pub hidden: bool,
    /// Activated on open
    pub activate: bool,
    /// Shared IDCMP port
    pub user_port: PortId,
}

/// A public screen, reported as a monitor
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenInfo {
    /// Screen or monitor driver name
    pub name: String,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per pixel
    pub depth: u8,
    /// Height of the screen title bar
    pub bar_height: u32,
    /// Vertical refresh in Hz
    pub refresh_rate: u32,
    /// Other display modes the monitor driver offers, as (width, height, depth)
    pub modes: Vec<(u32, u32, u8)>,
}

/// An AmigaInput device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AinDevice {
    /// AmigaInput device id
    pub id: u32,
    /// Product name
    pub name: String,
    /// Number of axes
    pub axes: usize,
    /// Number of buttons
    pub buttons: usize,
    /// Number of hats
    pub hats: usize,
}

/// One reading of an AmigaInput device
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AinSample {
    /// Axes in `-32768..=32767`
    pub axes: Vec<i32>,
    /// Buttons
    pub buttons: Vec<bool>,
    /// Hats as direction bit sets
    pub hats: Vec<u8>,
}

/// Operating-system services used by the backend
pub trait NativeOs {
    // exec

    /// `OpenLibrary(name, version)`
    fn open_library(&mut self, name: &str, version: u32) -> Option<LibraryBase>;

    /// `GetInterface(base, name, version)`
    fn get_interface(&mut self, base: LibraryBase, name: &str, version: u32)
        -> Option<Interface>;

    /// `DropInterface(iface)`
    fn drop_interface(&mut self, iface: Interface);

    /// `CloseLibrary(base)`
    fn close_library(&mut self, base: LibraryBase);

    /// `AllocSysObject(ASOT_PORT)`
    fn alloc_port(&mut self) -> Option<PortId>;

    /// `FreeSysObject(ASOT_PORT, port)`
    fn free_port(&mut self, port: PortId);

    /// `GetMsg(port)`, never blocks
    fn get_msg(&mut self, port: PortId) -> Option<Message>;

    /// `ReplyMsg(msg)`
    fn reply_msg(&mut self, msg: Message);

    /// Wait for the port's signal; `false` on timeout
    fn wait_port(&mut self, port: PortId, timeout: Option<Duration>) -> bool;

    /// Post a wake-up message to a port
    fn put_wakeup(&mut self, port: PortId);

    /// `FindTask(NULL)->tc_Node.ln_Name`
    fn current_task_name(&self) -> String;

    // dos

    /// `GetCliProgramName()`, `None` when not started from a shell
    fn cli_program_name(&self) -> Option<String>;

    // diagnostics

    /// Show a modal error requester; `false` if it could not be shown
    fn show_requester(&mut self, title: &str, body: &str) -> bool;

    /// Write to the diagnostic stream (stdout of the shell)
    fn print_diagnostic(&mut self, text: &str);

    // graphics / intuition

    /// Public screens, Workbench first
    fn screens(&self) -> Vec<ScreenInfo>;

    /// `OpenWindowTags()`
    fn open_window(&mut self, spec: &NativeWindowSpec<'_>) -> Option<NativeWindow>;

    /// `CloseWindow()`; pending messages for the window are stripped from
    /// the shared port first
    fn close_window(&mut self, window: NativeWindow);

    /// `SetWindowTitles()`
    fn set_window_title(&mut self, window: NativeWindow, title: &str);

    /// `ChangeWindowBox()` in content coordinates
    fn change_window_box(&mut self, window: NativeWindow, x: i32, y: i32, width: u32, height: u32);

    /// `WindowLimits()`
    fn set_window_limits(
        &mut self,
        window: NativeWindow,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    );

    /// `HideWindow()` / `ShowWindow()`
    fn set_window_hidden(&mut self, window: NativeWindow, hidden: bool);

    /// `WindowToFront()`
    fn window_to_front(&mut self, window: NativeWindow);

    /// `ActivateWindow()`
    fn activate_window(&mut self, window: NativeWindow);

    /// Iconify via workbench AppIcon; `false` if not possible
    fn iconify_window(&mut self, window: NativeWindow, iconify: bool) -> bool;

    /// `WA_Opacity`
    fn set_window_opacity(&mut self, window: NativeWindow, opacity: u8);

    /// Border sizes of an open window
    fn window_borders(&self, window: NativeWindow) -> FrameSize;

    /// Pointer position relative to the window content
    fn pointer_position(&self, window: NativeWindow) -> (i32, i32);

    /// Move the pointer relative to the window content
    fn move_pointer(&mut self, window: NativeWindow, x: i32, y: i32);

    /// `WA_PointerType` / `WA_Pointer`
    fn set_window_pointer(&mut self, window: NativeWindow, shape: PointerShape);

    /// Create a pointer object from RGBA pixels
    fn new_pointer(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
        xhot: i32,
        yhot: i32,
    ) -> Option<NativePointer>;

    /// Dispose a pointer object
    fn dispose_pointer(&mut self, pointer: NativePointer);

    // textclip

    /// `WriteClipVector()`
    fn write_clip_text(&mut self, text: &str) -> bool;

    /// `ReadClipVector()`
    fn read_clip_text(&mut self) -> Option<String>;

    // AmigaInput

    /// Enumerate joystick devices
    fn ain_devices(&mut self) -> Vec<AinDevice>;

    /// Read a device, `None` if it vanished
    fn ain_read(&mut self, id: u32) -> Option<AinSample>;

    /// Release a device
    fn ain_release(&mut self, id: u32);
}
