//! Intuition windows

use glint_platform::{CursorMode, PlatformError, Result, WindowConfig, WindowId};
use slotmap::{new_key_type, Key as _, KeyData};

use crate::cursor::CursorKey;
use crate::native::{NativeOs, NativeWindow, NativeWindowSpec};
use crate::platform::Os4Platform;

new_key_type! {
    /// Slot of an open window
    pub struct WindowKey;
}

impl From<WindowId> for WindowKey {
    fn from(id: WindowId) -> Self {
        KeyData::from_ffi(id.0).into()
    }
}

impl From<WindowKey> for WindowId {
    fn from(key: WindowKey) -> Self {
        WindowId(key.data().as_ffi())
    }
}

/// Backend-side state of an open window
#[derive(Clone, Debug)]
pub struct Os4Window {
    pub native: NativeWindow,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub min_size: Option<(u32, u32)>,
    pub max_size: Option<(u32, u32)>,
    pub resizable: bool,
    pub decorated: bool,
    pub floating: bool,
    pub visible: bool,
    pub focused: bool,
    pub iconified: bool,
    pub maximized: bool,
    pub hovered: bool,
    pub opacity: f32,
    pub cursor_mode: CursorMode,
    pub cursor: Option<CursorKey>,
    /// Virtual cursor position while the cursor is disabled
    pub virtual_cursor: (f64, f64),
    /// Box to go back to when a maximized window is restored
    pub restore_box: Option<(i32, i32, u32, u32)>,
}

impl Os4Window {
    /// Centre of the content area, where a disabled cursor is parked
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Whether a content-relative point lies inside the window
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Clamp a size to the window's limits
    pub fn clamp_size(&self, width: u32, height: u32) -> (u32, u32) {
        let (mut width, mut height) = (width, height);
        if let Some((min_w, min_h)) = self.min_size {
            width = width.max(min_w);
            height = height.max(min_h);
        }
        if let Some((max_w, max_h)) = self.max_size {
            width = width.min(max_w);
            height = height.min(max_h);
        }
        (width, height)
    }
}

impl<N: NativeOs> Os4Platform<N> {
    pub(crate) fn lookup_window(&self, id: WindowId) -> Result<WindowKey> {
        self.ensure_active()?;
        let key = WindowKey::from(id);
        if self.windows.contains_key(key) {
            Ok(key)
        } else {
            Err(PlatformError::InvalidHandle(format!("{id:?}")))
        }
    }

    pub(crate) fn window(&self, id: WindowId) -> Result<&Os4Window> {
        let key = self.lookup_window(id)?;
        self.windows
            .get(key)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("{id:?}")))
    }

    /// Intuition window behind a handle
    pub fn native_window(&self, id: WindowId) -> Option<NativeWindow> {
        self.windows.get(WindowKey::from(id)).map(|w| w.native)
    }

    pub(crate) fn find_window(&self, native: NativeWindow) -> Option<WindowKey> {
        self.windows
            .iter()
            .find(|(_, w)| w.native == native)
            .map(|(key, _)| key)
    }

    pub(crate) fn open_window(&mut self, config: &WindowConfig) -> Result<WindowId> {
        let user_port = self.require_user_port()?;

        // Centre on the Workbench screen
        let (x, y) = self
            .monitors
            .first()
            .map(|m| {
                (
                    m.screen.x + (m.screen.width.saturating_sub(config.width) / 2) as i32,
                    m.screen.y + (m.screen.height.saturating_sub(config.height) / 2) as i32,
                )
            })
            .unwrap_or((0, 0));

        let spec = NativeWindowSpec {
            title: &config.title,
            x,
            y,
            width: config.width,
            height: config.height,
            resizable: config.resizable,
            decorated: config.decorated,
            floating: config.floating,
            hidden: !config.visible,
            activate: config.visible && config.focused,
            user_port,
        };
        let native = self
            .native
            .open_window(&spec)
            .ok_or_else(|| PlatformError::WindowCreation(config.title.clone()))?;

        let focused = spec.activate;
        if focused {
            for (_, other) in self.windows.iter_mut() {
                other.focused = false;
            }
        }

        let key = self.windows.insert(Os4Window {
            native,
            title: config.title.clone(),
            x,
            y,
            width: config.width,
            height: config.height,
            min_size: None,
            max_size: None,
            resizable: config.resizable,
            decorated: config.decorated,
            floating: config.floating,
            visible: config.visible,
            focused,
            iconified: false,
            maximized: false,
            hovered: false,
            opacity: 1.0,
            cursor_mode: CursorMode::Normal,
            cursor: None,
            virtual_cursor: (0.0, 0.0),
            restore_box: None,
        });
        tracing::debug!(
            "Opened window '{}' {}x{} at {},{}",
            config.title,
            config.width,
            config.height,
            x,
            y
        );
        Ok(key.into())
    }

    pub(crate) fn close_window(&mut self, id: WindowId) -> Result<()> {
        let key = self.lookup_window(id)?;
        if let Some(window) = self.windows.remove(key) {
            self.native.close_window(window.native);
            tracing::debug!("Closed window '{}'", window.title);
        }
        Ok(())
    }

    pub(crate) fn retitle_window(&mut self, id: WindowId, title: &str) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        self.native.set_window_title(window.native, title);
        window.title = title.to_string();
        Ok(())
    }

    pub(crate) fn move_window(&mut self, id: WindowId, x: i32, y: i32) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        self.native
            .change_window_box(window.native, x, y, window.width, window.height);
        window.x = x;
        window.y = y;
        Ok(())
    }

    pub(crate) fn resize_window(&mut self, id: WindowId, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PlatformError::InvalidValue(format!(
                "invalid window size {width}x{height}"
            )));
        }
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        let (width, height) = window.clamp_size(width, height);
        self.native
            .change_window_box(window.native, window.x, window.y, width, height);
        window.width = width;
        window.height = height;
        Ok(())
    }

    pub(crate) fn limit_window(
        &mut self,
        id: WindowId,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    ) -> Result<()> {
        if let (Some((min_w, min_h)), Some((max_w, max_h))) = (min, max) {
            if min_w > max_w || min_h > max_h {
                return Err(PlatformError::InvalidValue(format!(
                    "minimum size {min_w}x{min_h} exceeds maximum {max_w}x{max_h}"
                )));
            }
        }
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        self.native.set_window_limits(window.native, min, max);
        window.min_size = min;
        window.max_size = max;
        Ok(())
    }

    pub(crate) fn iconify(&mut self, id: WindowId) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        if window.iconified {
            return Ok(());
        }
        if !self.native.iconify_window(window.native, true) {
            return Err(PlatformError::Unsupported(format!(
                "window '{}' cannot be iconified",
                window.title
            )));
        }
        window.iconified = true;
        Ok(())
    }

    pub(crate) fn restore(&mut self, id: WindowId) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        if window.iconified {
            self.native.iconify_window(window.native, false);
            window.iconified = false;
        } else if let Some((x, y, width, height)) = window.restore_box.take() {
            self.native.change_window_box(window.native, x, y, width, height);
            window.x = x;
            window.y = y;
            window.width = width;
            window.height = height;
            window.maximized = false;
        }
        Ok(())
    }

    pub(crate) fn maximize(&mut self, id: WindowId) -> Result<()> {
        let key = self.lookup_window(id)?;
        let Some(area) = self.monitors.first().map(|m| m.workarea()) else {
            return Err(PlatformError::Unsupported("no screen to maximize on".to_string()));
        };
        let window = &mut self.windows[key];
        if window.maximized {
            return Ok(());
        }
        let borders = self.native.window_borders(window.native);
        let x = area.x + borders.left as i32;
        let y = area.y + borders.top as i32;
        let (width, height) = window.clamp_size(
            area.width.saturating_sub(borders.left + borders.right),
            area.height.saturating_sub(borders.top + borders.bottom),
        );

        window.restore_box = Some((window.x, window.y, window.width, window.height));
        self.native.change_window_box(window.native, x, y, width, height);
        window.x = x;
        window.y = y;
        window.width = width;
        window.height = height;
        window.maximized = true;
        Ok(())
    }

    pub(crate) fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        self.native.set_window_hidden(window.native, !visible);
        window.visible = visible;
        Ok(())
    }

    pub(crate) fn focus(&mut self, id: WindowId) -> Result<()> {
        let key = self.lookup_window(id)?;
        let native = self.windows[key].native;
        self.native.window_to_front(native);
        self.native.activate_window(native);
        Ok(())
    }

    /// Intuition cannot change border gadgets on an open window; the flag is
    /// recorded and applies when the window is next opened.
    pub(crate) fn update_style(
        &mut self,
        id: WindowId,
        apply: impl FnOnce(&mut Os4Window),
    ) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        apply(window);
        tracing::trace!("Style of window '{}' updated", window.title);
        Ok(())
    }

    pub(crate) fn change_opacity(&mut self, id: WindowId, opacity: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(PlatformError::InvalidValue(format!(
                "invalid window opacity {opacity}"
            )));
        }
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        self.native
            .set_window_opacity(window.native, (opacity * 255.0).round() as u8);
        window.opacity = opacity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Os4Config;
    use crate::mock::{MockOs, MOCK_BORDERS};
    use glint_platform::Platform;

    fn active() -> (MockOs, Os4Platform<MockOs>) {
        let native = MockOs::new();
        let mut platform = Os4Platform::new(native.clone(), Os4Config::default());
        platform.init().unwrap();
        (native, platform)
    }

    #[test]
    fn test_window_id_round_trip() {
        let (_native, mut platform) = active();
        let id = platform.create_window(&WindowConfig::default()).unwrap();
        assert_eq!(WindowId::from(WindowKey::from(id)), id);
        platform.terminate();
    }

    #[test]
    fn test_create_centres_on_workbench() {
        let (native, mut platform) = active();
        let id = platform
            .create_window(&WindowConfig::new("Demo").size(800, 600))
            .unwrap();
        assert_eq!(platform.window_pos(id).unwrap(), (560, 240));

        let native_window = platform.window(id).unwrap().native;
        let opened = native.window(native_window).unwrap();
        assert_eq!(opened.title, "Demo");
        assert_eq!(opened.port, platform.user_port().unwrap());
        assert!(platform.window_focused(id).unwrap());
        platform.terminate();
    }

    #[test]
    fn test_create_failure() {
        let native = MockOs::new().fail_windows();
        let mut platform = Os4Platform::new(native.clone(), Os4Config::default());
        platform.init().unwrap();
        assert_eq!(
            platform.create_window(&WindowConfig::new("X")),
            Err(PlatformError::WindowCreation("X".to_string()))
        );
        platform.terminate();
    }

    #[test]
    fn test_destroyed_handle_is_invalid() {
        let (native, mut platform) = active();
        let id = platform.create_window(&WindowConfig::default()).unwrap();
        platform.destroy_window(id).unwrap();
        assert_eq!(native.open_windows(), 0);
        assert!(matches!(
            platform.window_size(id),
            Err(PlatformError::InvalidHandle(_))
        ));
        platform.terminate();
    }

    #[test]
    fn test_size_limits_clamp_resize() {
        let (native, mut platform) = active();
        let id = platform.create_window(&WindowConfig::default()).unwrap();
        platform
            .set_window_size_limits(id, Some((200, 100)), Some((1000, 800)))
            .unwrap();
        platform.set_window_size(id, 50, 2000).unwrap();
        assert_eq!(platform.window_size(id).unwrap(), (200, 800));

        let native_window = platform.window(id).unwrap().native;
        assert_eq!(native.window(native_window).unwrap().height, 800);

        assert!(matches!(
            platform.set_window_size_limits(id, Some((500, 500)), Some((100, 100))),
            Err(PlatformError::InvalidValue(_))
        ));
        platform.terminate();
    }

    #[test]
    fn test_maximize_and_restore() {
        let (_native, mut platform) = active();
        let id = platform
            .create_window(&WindowConfig::default().size(320, 200))
            .unwrap();
        let before = (platform.window_pos(id).unwrap(), platform.window_size(id).unwrap());

        platform.maximize_window(id).unwrap();
        assert!(platform.window_maximized(id).unwrap());
        assert_eq!(
            platform.window_size(id).unwrap(),
            (
                1920 - MOCK_BORDERS.left - MOCK_BORDERS.right,
                1080 - 20 - MOCK_BORDERS.top - MOCK_BORDERS.bottom
            )
        );

        platform.restore_window(id).unwrap();
        assert!(!platform.window_maximized(id).unwrap());
        assert_eq!(
            (platform.window_pos(id).unwrap(), platform.window_size(id).unwrap()),
            before
        );
        platform.terminate();
    }

    #[test]
    fn test_iconify_and_restore() {
        let (native, mut platform) = active();
        let id = platform.create_window(&WindowConfig::default()).unwrap();
        let native_window = platform.window(id).unwrap().native;

        platform.iconify_window(id).unwrap();
        assert!(platform.window_iconified(id).unwrap());
        assert!(native.window(native_window).unwrap().iconified);

        platform.restore_window(id).unwrap();
        assert!(!platform.window_iconified(id).unwrap());
        assert!(!native.window(native_window).unwrap().iconified);
        platform.terminate();
    }

    #[test]
    fn test_visibility_and_opacity() {
        let (native, mut platform) = active();
        let id = platform
            .create_window(&WindowConfig::default().visible(false))
            .unwrap();
        let native_window = platform.window(id).unwrap().native;
        assert!(native.window(native_window).unwrap().hidden);
        assert!(!platform.window_focused(id).unwrap());

        platform.show_window(id).unwrap();
        assert!(platform.window_visible(id).unwrap());

        platform.set_window_opacity(id, 0.5).unwrap();
        assert_eq!(native.window(native_window).unwrap().opacity, 128);
        assert_eq!(platform.window_opacity(id).unwrap(), 0.5);
        assert!(platform.set_window_opacity(id, 1.5).is_err());
        platform.terminate();
    }

    #[test]
    fn test_frame_size_follows_decoration() {
        let (_native, mut platform) = active();
        let framed = platform.create_window(&WindowConfig::default()).unwrap();
        let bare = platform
            .create_window(&WindowConfig::default().decorated(false))
            .unwrap();
        assert_eq!(platform.window_frame_size(framed).unwrap(), MOCK_BORDERS);
        assert_eq!(
            platform.window_frame_size(bare).unwrap(),
            glint_platform::FrameSize::default()
        );
        platform.terminate();
    }
}
