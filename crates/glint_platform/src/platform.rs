//! Platform dispatch trait and platform selection

use std::time::Duration;

use crate::error::{PlatformError, Result};
use crate::event::EventSink;
use crate::input::CursorMode;
use crate::joystick::{JoystickId, JoystickState, PollMode};
use crate::key::Key;
use crate::monitor::{GammaRamp, MonitorId, MonitorInfo, Rect, VideoMode};
use crate::window::{CursorId, CursorImage, StandardCursor, WindowConfig, WindowId};

/// Identifies a platform backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlatformId {
    /// Let selection pick the first backend that connects
    #[default]
    Any,
    /// Microsoft Windows
    Win32,
    /// macOS
    Cocoa,
    /// Wayland
    Wayland,
    /// X11
    X11,
    /// AmigaOS 4
    Os4,
    /// Headless backend
    Null,
}

/// Window frame extents around the content area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameSize {
    /// Width of the left border
    pub left: u32,
    /// Height of the title bar / top border
    pub top: u32,
    /// Width of the right border
    pub right: u32,
    /// Height of the bottom border
    pub bottom: u32,
}

/// Platform dispatch trait
///
/// One method per platform-neutral operation. Each backend implements the
/// whole set; the host only ever talks to a backend through a
/// `Box<dyn Platform>` obtained from [`select_platform`], so backend types
/// never leak into the host.
///
/// Every operation other than [`Platform::id`], [`Platform::init`] and
/// [`Platform::terminate`] returns [`PlatformError::NotInitialized`] when
/// called outside the init..terminate window.
pub trait Platform {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Which backend this is
    fn id(&self) -> PlatformId;

    /// Acquire native resources and build process-wide state
    fn init(&mut self) -> Result<()>;

    /// Release everything acquired by [`Platform::init`]
    fn terminate(&mut self);

    // ------------------------------------------------------------------
    // Cursor and keyboard
    // ------------------------------------------------------------------

    /// Cursor position relative to the window content area
    fn cursor_pos(&self, window: WindowId) -> Result<(f64, f64)>;

    /// Warp the cursor to a position relative to the window content area
    fn set_cursor_pos(&mut self, window: WindowId, x: f64, y: f64) -> Result<()>;

    /// Change cursor visibility/locking for a window
    fn set_cursor_mode(&mut self, window: WindowId, mode: CursorMode) -> Result<()>;

    /// Enable or disable raw (unaccelerated) mouse motion
    fn set_raw_mouse_motion(&mut self, window: WindowId, enabled: bool) -> Result<()>;

    /// Whether raw mouse motion is available
    fn raw_mouse_motion_supported(&self) -> bool;

    /// Create a cursor from an RGBA image
    fn create_cursor(&mut self, image: &CursorImage, xhot: i32, yhot: i32) -> Result<CursorId>;

    /// Create one of the standard cursor shapes
    fn create_standard_cursor(&mut self, shape: StandardCursor) -> Result<CursorId>;

    /// Destroy a cursor created by this backend
    fn destroy_cursor(&mut self, cursor: CursorId) -> Result<()>;

    /// Set the cursor shown over a window, `None` for the default arrow
    fn set_cursor(&mut self, window: WindowId, cursor: Option<CursorId>) -> Result<()>;

    /// Display name of the key at a native scancode
    fn scancode_name(&self, scancode: u16) -> Result<Option<&str>>;

    /// Native scancode of a logical key
    fn key_scancode(&self, key: Key) -> Result<Option<u16>>;

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Replace the system clipboard text
    fn set_clipboard_string(&mut self, text: &str) -> Result<()>;

    /// Current clipboard text, if any
    fn clipboard_string(&mut self) -> Result<Option<&str>>;

    // ------------------------------------------------------------------
    // Joysticks
    // ------------------------------------------------------------------

    /// Enumerate connected joysticks
    fn init_joysticks(&mut self) -> Result<()>;

    /// Release every joystick
    fn terminate_joysticks(&mut self);

    /// Handles of the joysticks found by [`Platform::init_joysticks`]
    fn joysticks(&self) -> Result<Vec<JoystickId>>;

    /// Refresh and return a joystick's state, `None` once disconnected
    fn poll_joystick(
        &mut self,
        joystick: JoystickId,
        mode: PollMode,
    ) -> Result<Option<&JoystickState>>;

    /// Platform name used in gamepad mapping strings
    fn mapping_name(&self) -> &'static str;

    /// Adjust a mapping GUID to this platform's GUID layout
    fn update_gamepad_guid(&self, guid: &str) -> String;

    // ------------------------------------------------------------------
    // Monitors
    // ------------------------------------------------------------------

    /// Connected monitors, primary first
    fn monitors(&self) -> Result<Vec<MonitorInfo>>;

    /// Position of the monitor's viewport on the virtual desktop
    fn monitor_pos(&self, monitor: MonitorId) -> Result<(i32, i32)>;

    /// Content scale of the monitor
    fn monitor_content_scale(&self, monitor: MonitorId) -> Result<(f32, f32)>;

    /// Area not occupied by system bars
    fn monitor_workarea(&self, monitor: MonitorId) -> Result<Rect>;

    /// All modes the monitor supports
    fn video_modes(&self, monitor: MonitorId) -> Result<Vec<VideoMode>>;

    /// The mode the monitor currently runs in
    fn video_mode(&self, monitor: MonitorId) -> Result<VideoMode>;

    /// Current gamma ramp
    fn gamma_ramp(&self, monitor: MonitorId) -> Result<GammaRamp>;

    /// Replace the gamma ramp
    fn set_gamma_ramp(&mut self, monitor: MonitorId, ramp: &GammaRamp) -> Result<()>;

    // ------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------

    /// Open a window
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId>;

    /// Close a window
    fn destroy_window(&mut self, window: WindowId) -> Result<()>;

    /// Change the window title
    fn set_window_title(&mut self, window: WindowId, title: &str) -> Result<()>;

    /// Position of the content area
    fn window_pos(&self, window: WindowId) -> Result<(i32, i32)>;

    /// Move the content area
    fn set_window_pos(&mut self, window: WindowId, x: i32, y: i32) -> Result<()>;

    /// Size of the content area
    fn window_size(&self, window: WindowId) -> Result<(u32, u32)>;

    /// Resize the content area
    fn set_window_size(&mut self, window: WindowId, width: u32, height: u32) -> Result<()>;

    /// Constrain the content area size
    fn set_window_size_limits(
        &mut self,
        window: WindowId,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    ) -> Result<()>;

    /// Size of the framebuffer in pixels
    fn framebuffer_size(&self, window: WindowId) -> Result<(u32, u32)>;

    /// Decoration extents around the content area
    fn window_frame_size(&self, window: WindowId) -> Result<FrameSize>;

    /// Content scale of the window
    fn window_content_scale(&self, window: WindowId) -> Result<(f32, f32)>;

    /// Iconify the window
    fn iconify_window(&mut self, window: WindowId) -> Result<()>;

    /// Restore an iconified or maximized window
    fn restore_window(&mut self, window: WindowId) -> Result<()>;

    /// Maximize the window
    fn maximize_window(&mut self, window: WindowId) -> Result<()>;

    /// Make the window visible
    fn show_window(&mut self, window: WindowId) -> Result<()>;

    /// Hide the window
    fn hide_window(&mut self, window: WindowId) -> Result<()>;

    /// Ask for user attention without stealing focus
    fn request_window_attention(&mut self, window: WindowId) -> Result<()>;

    /// Bring the window to front and give it input focus
    fn focus_window(&mut self, window: WindowId) -> Result<()>;

    /// Whether the window has input focus
    fn window_focused(&self, window: WindowId) -> Result<bool>;

    /// Whether the window is iconified
    fn window_iconified(&self, window: WindowId) -> Result<bool>;

    /// Whether the window is visible
    fn window_visible(&self, window: WindowId) -> Result<bool>;

    /// Whether the window is maximized
    fn window_maximized(&self, window: WindowId) -> Result<bool>;

    /// Whether the cursor is over the content area
    fn window_hovered(&self, window: WindowId) -> Result<bool>;

    /// Toggle user resizing
    fn set_window_resizable(&mut self, window: WindowId, enabled: bool) -> Result<()>;

    /// Toggle decorations
    fn set_window_decorated(&mut self, window: WindowId, enabled: bool) -> Result<()>;

    /// Toggle always-on-top
    fn set_window_floating(&mut self, window: WindowId, enabled: bool) -> Result<()>;

    /// Whole-window opacity
    fn window_opacity(&self, window: WindowId) -> Result<f32>;

    /// Set whole-window opacity in `0.0..=1.0`
    fn set_window_opacity(&mut self, window: WindowId, opacity: f32) -> Result<()>;

    // ------------------------------------------------------------------
    // Event pump
    // ------------------------------------------------------------------

    /// Process every pending event without blocking
    fn poll_events(&mut self, sink: &mut dyn EventSink) -> Result<()>;

    /// Block until at least one event arrives, then process pending events
    fn wait_events(&mut self, sink: &mut dyn EventSink) -> Result<()>;

    /// Like [`Platform::wait_events`] but gives up after `timeout`
    fn wait_events_timeout(&mut self, sink: &mut dyn EventSink, timeout: Duration) -> Result<()>;

    /// Wake a thread blocked in [`Platform::wait_events`]
    fn post_empty_event(&mut self) -> Result<()>;
}

/// Builds a backend's dispatch table
///
/// Connecting has no side effects; native resources are only acquired by
/// [`Platform::init`].
pub trait Connector {
    /// Which backend this connector produces
    fn platform_id(&self) -> PlatformId;

    /// Build the backend, or `None` if it cannot run in this process
    fn connect(self: Box<Self>) -> Option<Box<dyn Platform>>;
}

/// Pick a backend
///
/// With [`PlatformId::Any`] the first connector that connects wins; otherwise
/// only the connector with the requested id is tried.
pub fn select_platform(
    desired: PlatformId,
    connectors: Vec<Box<dyn Connector>>,
) -> Result<Box<dyn Platform>> {
    if desired == PlatformId::Any {
        for connector in connectors {
            let id = connector.platform_id();
            if let Some(platform) = connector.connect() {
                tracing::debug!("Selected platform {:?}", id);
                return Ok(platform);
            }
            tracing::debug!("Platform {:?} declined to connect", id);
        }
        return Err(PlatformError::Unsupported(
            "no supported platform found".to_string(),
        ));
    }

    let connector = connectors
        .into_iter()
        .find(|c| c.platform_id() == desired)
        .ok_or_else(|| PlatformError::Unsupported(format!("{desired:?} support not built")))?;

    connector
        .connect()
        .ok_or_else(|| PlatformError::InitFailed(format!("{desired:?} failed to connect")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declining(PlatformId);

    impl Connector for Declining {
        fn platform_id(&self) -> PlatformId {
            self.0
        }

        fn connect(self: Box<Self>) -> Option<Box<dyn Platform>> {
            None
        }
    }

    fn connectors(ids: &[PlatformId]) -> Vec<Box<dyn Connector>> {
        ids.iter()
            .map(|&id| Box::new(Declining(id)) as Box<dyn Connector>)
            .collect()
    }

    #[test]
    fn test_any_with_no_connecting_backend() {
        let err = select_platform(
            PlatformId::Any,
            connectors(&[PlatformId::X11, PlatformId::Wayland]),
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            PlatformError::Unsupported("no supported platform found".to_string())
        );
    }

    #[test]
    fn test_specific_backend_not_built() {
        let err = select_platform(PlatformId::Os4, connectors(&[PlatformId::X11]))
            .err()
            .unwrap();
        assert_eq!(
            err,
            PlatformError::Unsupported("Os4 support not built".to_string())
        );
    }

    #[test]
    fn test_specific_backend_declines() {
        let err = select_platform(PlatformId::Os4, connectors(&[PlatformId::Os4]))
            .err()
            .unwrap();
        assert!(matches!(err, PlatformError::InitFailed(_)));
    }

    #[test]
    fn test_default_id_is_any() {
        assert_eq!(PlatformId::default(), PlatformId::Any);
        assert_eq!(FrameSize::default().top, 0);
    }
}
