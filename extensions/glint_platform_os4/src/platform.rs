//! AmigaOS 4 platform context and its dispatch table

use std::ffi::CStr;
use std::time::Duration;

use glint_platform::{
    Connector, CursorId, CursorImage, CursorMode, EventSink, FrameSize, GammaRamp, JoystickId,
    JoystickState, Key, MonitorId, MonitorInfo, Platform, PlatformError, PlatformId, PollMode,
    Rect, Result, StandardCursor, VideoMode, WindowConfig, WindowId,
};
use slotmap::SlotMap;

use crate::config::Os4Config;
use crate::cursor::{CursorKey, Os4Cursor};
use crate::joystick::{Os4Joystick, MAPPING_NAME};
use crate::keys::KeyTables;
use crate::lifecycle::Lifecycle;
use crate::loader::Libraries;
use crate::monitor::Os4Monitor;
use crate::native::{NativeOs, PortId};
use crate::port::MessagePort;
use crate::window::{Os4Window, WindowKey};

/// Process-wide state of the AmigaOS 4 backend
///
/// Created inert by [`Os4Platform::new`]; [`Platform::init`] acquires
/// libraries and ports, [`Platform::terminate`] gives everything back.
pub struct Os4Platform<N: NativeOs> {
    pub(crate) native: N,
    pub(crate) config: Os4Config,
    pub(crate) state: Lifecycle,
    pub(crate) libraries: Libraries,
    pub(crate) keys: Option<Box<KeyTables>>,
    pub(crate) user_port: Option<MessagePort>,
    pub(crate) app_port: Option<MessagePort>,
    pub(crate) clipboard: Option<String>,
    pub(crate) app_name: Option<Box<CStr>>,
    pub(crate) monitors: Vec<Os4Monitor>,
    pub(crate) windows: SlotMap<WindowKey, Os4Window>,
    pub(crate) cursors: SlotMap<CursorKey, Os4Cursor>,
    pub(crate) joysticks: Vec<Os4Joystick>,
}

impl<N: NativeOs> Os4Platform<N> {
    /// Create an uninitialized backend
    pub fn new(native: N, config: Os4Config) -> Self {
        Self {
            native,
            config,
            state: Lifecycle::Uninitialized,
            libraries: Libraries::default(),
            keys: None,
            user_port: None,
            app_port: None,
            clipboard: None,
            app_name: None,
            monitors: Vec::new(),
            windows: SlotMap::with_key(),
            cursors: SlotMap::with_key(),
            joysticks: Vec::new(),
        }
    }

    /// Native OS services
    pub fn native(&self) -> &N {
        &self.native
    }

    /// Backend configuration
    pub fn config(&self) -> &Os4Config {
        &self.config
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    /// Whether init succeeded and terminate has not run yet
    pub fn is_active(&self) -> bool {
        self.state == Lifecycle::Active
    }

    /// Application name found during init
    pub fn app_name(&self) -> Option<&CStr> {
        self.app_name.as_deref()
    }

    /// Key translation tables, present while active
    pub fn key_tables(&self) -> Option<&KeyTables> {
        self.keys.as_deref()
    }

    /// Shared IDCMP port of every window
    pub fn user_port(&self) -> Option<PortId> {
        self.user_port.as_ref().map(MessagePort::id)
    }

    /// Workbench AppMessage port
    pub fn app_port(&self) -> Option<PortId> {
        self.app_port.as_ref().map(MessagePort::id)
    }

    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(PlatformError::NotInitialized)
        }
    }

    pub(crate) fn tables(&self) -> Result<&KeyTables> {
        self.ensure_active()?;
        self.keys.as_deref().ok_or(PlatformError::NotInitialized)
    }

    pub(crate) fn require_user_port(&self) -> Result<PortId> {
        self.ensure_active()?;
        self.user_port().ok_or(PlatformError::NotInitialized)
    }
}

impl<N: NativeOs> Platform for Os4Platform<N> {
    fn id(&self) -> PlatformId {
        PlatformId::Os4
    }

    fn init(&mut self) -> Result<()> {
        self.startup()
    }

    fn terminate(&mut self) {
        self.shutdown();
    }

    // Cursor and keyboard

    fn cursor_pos(&self, window: WindowId) -> Result<(f64, f64)> {
        self.pointer_pos(window)
    }

    fn set_cursor_pos(&mut self, window: WindowId, x: f64, y: f64) -> Result<()> {
        self.warp_pointer(window, x, y)
    }

    fn set_cursor_mode(&mut self, window: WindowId, mode: CursorMode) -> Result<()> {
        self.change_cursor_mode(window, mode)
    }

    fn set_raw_mouse_motion(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.lookup_window(window)?;
        if enabled {
            return Err(PlatformError::Unsupported(
                "raw mouse motion is not available on AmigaOS 4".to_string(),
            ));
        }
        Ok(())
    }

    fn raw_mouse_motion_supported(&self) -> bool {
        false
    }

    fn create_cursor(&mut self, image: &CursorImage, xhot: i32, yhot: i32) -> Result<CursorId> {
        self.new_custom_cursor(image, xhot, yhot)
    }

    fn create_standard_cursor(&mut self, shape: StandardCursor) -> Result<CursorId> {
        self.new_standard_cursor(shape)
    }

    fn destroy_cursor(&mut self, cursor: CursorId) -> Result<()> {
        self.dispose_cursor(cursor)
    }

    fn set_cursor(&mut self, window: WindowId, cursor: Option<CursorId>) -> Result<()> {
        self.assign_cursor(window, cursor)
    }

    fn scancode_name(&self, scancode: u16) -> Result<Option<&str>> {
        let tables = self.tables()?;
        if usize::from(scancode) >= crate::keys::SCANCODE_COUNT {
            return Err(PlatformError::InvalidValue(format!(
                "invalid scancode {scancode}"
            )));
        }
        Ok(tables.scancode_name(scancode))
    }

    fn key_scancode(&self, key: Key) -> Result<Option<u16>> {
        Ok(self.tables()?.scancode(key))
    }

    // Clipboard

    fn set_clipboard_string(&mut self, text: &str) -> Result<()> {
        self.write_clipboard(text)
    }

    fn clipboard_string(&mut self) -> Result<Option<&str>> {
        self.read_clipboard()
    }

    // Joysticks

    fn init_joysticks(&mut self) -> Result<()> {
        self.open_joysticks()
    }

    fn terminate_joysticks(&mut self) {
        self.close_joysticks();
    }

    fn joysticks(&self) -> Result<Vec<JoystickId>> {
        self.connected_joysticks()
    }

    fn poll_joystick(
        &mut self,
        joystick: JoystickId,
        mode: PollMode,
    ) -> Result<Option<&JoystickState>> {
        self.read_joystick(joystick, mode)
    }

    fn mapping_name(&self) -> &'static str {
        MAPPING_NAME
    }

    fn update_gamepad_guid(&self, guid: &str) -> String {
        guid.to_string()
    }

    // Monitors

    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        self.monitor_list()
    }

    fn monitor_pos(&self, monitor: MonitorId) -> Result<(i32, i32)> {
        let screen = &self.monitor(monitor)?.screen;
        Ok((screen.x, screen.y))
    }

    fn monitor_content_scale(&self, monitor: MonitorId) -> Result<(f32, f32)> {
        self.monitor(monitor)?;
        Ok((1.0, 1.0))
    }

    fn monitor_workarea(&self, monitor: MonitorId) -> Result<Rect> {
        Ok(self.monitor(monitor)?.workarea())
    }

    fn video_modes(&self, monitor: MonitorId) -> Result<Vec<VideoMode>> {
        Ok(self.monitor(monitor)?.video_modes())
    }

    fn video_mode(&self, monitor: MonitorId) -> Result<VideoMode> {
        Ok(self.monitor(monitor)?.current_mode())
    }

    fn gamma_ramp(&self, monitor: MonitorId) -> Result<GammaRamp> {
        self.monitor(monitor)?;
        Err(PlatformError::Unsupported(
            "gamma ramps are not available on AmigaOS 4".to_string(),
        ))
    }

    fn set_gamma_ramp(&mut self, monitor: MonitorId, _ramp: &GammaRamp) -> Result<()> {
        self.monitor(monitor)?;
        Err(PlatformError::Unsupported(
            "gamma ramps are not available on AmigaOS 4".to_string(),
        ))
    }

    // Windows

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId> {
        self.open_window(config)
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<()> {
        self.close_window(window)
    }

    fn set_window_title(&mut self, window: WindowId, title: &str) -> Result<()> {
        self.retitle_window(window, title)
    }

    fn window_pos(&self, window: WindowId) -> Result<(i32, i32)> {
        let w = self.window(window)?;
        Ok((w.x, w.y))
    }

    fn set_window_pos(&mut self, window: WindowId, x: i32, y: i32) -> Result<()> {
        self.move_window(window, x, y)
    }

    fn window_size(&self, window: WindowId) -> Result<(u32, u32)> {
        let w = self.window(window)?;
        Ok((w.width, w.height))
    }

    fn set_window_size(&mut self, window: WindowId, width: u32, height: u32) -> Result<()> {
        self.resize_window(window, width, height)
    }

    fn set_window_size_limits(
        &mut self,
        window: WindowId,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    ) -> Result<()> {
        self.limit_window(window, min, max)
    }

    fn framebuffer_size(&self, window: WindowId) -> Result<(u32, u32)> {
        self.window_size(window)
    }

    fn window_frame_size(&self, window: WindowId) -> Result<FrameSize> {
        let w = self.window(window)?;
        Ok(self.native.window_borders(w.native))
    }

    fn window_content_scale(&self, window: WindowId) -> Result<(f32, f32)> {
        self.window(window)?;
        Ok((1.0, 1.0))
    }

    fn iconify_window(&mut self, window: WindowId) -> Result<()> {
        self.iconify(window)
    }

    fn restore_window(&mut self, window: WindowId) -> Result<()> {
        self.restore(window)
    }

    fn maximize_window(&mut self, window: WindowId) -> Result<()> {
        self.maximize(window)
    }

    fn show_window(&mut self, window: WindowId) -> Result<()> {
        self.set_visible(window, true)
    }

    fn hide_window(&mut self, window: WindowId) -> Result<()> {
        self.set_visible(window, false)
    }

    fn request_window_attention(&mut self, window: WindowId) -> Result<()> {
        self.window(window)?;
        tracing::trace!("Window attention requests are not supported on AmigaOS 4");
        Ok(())
    }

    fn focus_window(&mut self, window: WindowId) -> Result<()> {
        self.focus(window)
    }

    fn window_focused(&self, window: WindowId) -> Result<bool> {
        Ok(self.window(window)?.focused)
    }

    fn window_iconified(&self, window: WindowId) -> Result<bool> {
        Ok(self.window(window)?.iconified)
    }

    fn window_visible(&self, window: WindowId) -> Result<bool> {
        Ok(self.window(window)?.visible)
    }

    fn window_maximized(&self, window: WindowId) -> Result<bool> {
        Ok(self.window(window)?.maximized)
    }

    fn window_hovered(&self, window: WindowId) -> Result<bool> {
        Ok(self.window(window)?.hovered)
    }

    fn set_window_resizable(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.update_style(window, |w| w.resizable = enabled)
    }

    fn set_window_decorated(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.update_style(window, |w| w.decorated = enabled)
    }

    fn set_window_floating(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.update_style(window, |w| w.floating = enabled)
    }

    fn window_opacity(&self, window: WindowId) -> Result<f32> {
        Ok(self.window(window)?.opacity)
    }

    fn set_window_opacity(&mut self, window: WindowId, opacity: f32) -> Result<()> {
        self.change_opacity(window, opacity)
    }

    // Event pump

    fn poll_events(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.dispatch_pending(sink).map(|_| ())
    }

    fn wait_events(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.wait_and_dispatch(sink, None)
    }

    fn wait_events_timeout(&mut self, sink: &mut dyn EventSink, timeout: Duration) -> Result<()> {
        self.wait_and_dispatch(sink, Some(timeout))
    }

    fn post_empty_event(&mut self) -> Result<()> {
        let port = self.require_user_port()?;
        self.native.put_wakeup(port);
        Ok(())
    }
}

/// Connects the AmigaOS 4 backend
pub struct Os4Connector<N: NativeOs> {
    native: N,
    config: Os4Config,
}

impl<N: NativeOs> Os4Connector<N> {
    /// Connector that will build an [`Os4Platform`] over `native`
    pub fn new(native: N, config: Os4Config) -> Self {
        Self { native, config }
    }
}

impl<N: NativeOs + 'static> Connector for Os4Connector<N> {
    fn platform_id(&self) -> PlatformId {
        PlatformId::Os4
    }

    fn connect(self: Box<Self>) -> Option<Box<dyn Platform>> {
        let Self { native, config } = *self;
        Some(Box::new(Os4Platform::new(native, config)))
    }
}
