//! Pointers and cursor modes

use glint_platform::{
    CursorId, CursorImage, CursorMode, PlatformError, Result, StandardCursor, WindowId,
};
use slotmap::{new_key_type, Key as _, KeyData};

use crate::native::{NativeOs, PointerShape};
use crate::platform::Os4Platform;
use crate::window::WindowKey;

new_key_type! {
    /// Slot of a created cursor
    pub struct CursorKey;
}

impl From<CursorId> for CursorKey {
    fn from(id: CursorId) -> Self {
        KeyData::from_ffi(id.0).into()
    }
}

impl From<CursorKey> for CursorId {
    fn from(key: CursorKey) -> Self {
        CursorId(key.data().as_ffi())
    }
}

/// A cursor: a built-in pointer type or a custom pointer object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Os4Cursor {
    pub shape: PointerShape,
}

/// Intuition pointer type for a standard cursor
pub fn standard_shape(shape: StandardCursor) -> PointerShape {
    match shape {
        StandardCursor::Arrow => PointerShape::Default,
        StandardCursor::IBeam => PointerShape::Text,
        StandardCursor::Crosshair => PointerShape::Cross,
        StandardCursor::PointingHand => PointerShape::Hand,
        StandardCursor::ResizeEW => PointerShape::HorizontalResize,
        StandardCursor::ResizeNS => PointerShape::VerticalResize,
        StandardCursor::ResizeNWSE => PointerShape::DiagonalResizeDown,
        StandardCursor::ResizeNESW => PointerShape::DiagonalResizeUp,
        StandardCursor::ResizeAll => PointerShape::Move,
        StandardCursor::NotAllowed => PointerShape::NotAvailable,
    }
}

impl<N: NativeOs> Os4Platform<N> {
    fn lookup_cursor(&self, id: CursorId) -> Result<CursorKey> {
        self.ensure_active()?;
        let key = CursorKey::from(id);
        if self.cursors.contains_key(key) {
            Ok(key)
        } else {
            Err(PlatformError::InvalidHandle(format!("{id:?}")))
        }
    }

    /// Push the pointer a window should show to intuition
    pub(crate) fn apply_pointer(&mut self, key: WindowKey) {
        let Some(window) = self.windows.get(key) else {
            return;
        };
        let shape = match window.cursor_mode {
            CursorMode::Normal => window
                .cursor
                .and_then(|c| self.cursors.get(c))
                .map_or(PointerShape::Default, |c| c.shape),
            CursorMode::Hidden | CursorMode::Disabled => PointerShape::Invisible,
        };
        self.native.set_window_pointer(window.native, shape);
    }

    pub(crate) fn pointer_pos(&self, id: WindowId) -> Result<(f64, f64)> {
        let window = self.window(id)?;
        if window.cursor_mode == CursorMode::Disabled {
            return Ok(window.virtual_cursor);
        }
        let (x, y) = self.native.pointer_position(window.native);
        Ok((f64::from(x), f64::from(y)))
    }

    pub(crate) fn warp_pointer(&mut self, id: WindowId, x: f64, y: f64) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        if window.cursor_mode == CursorMode::Disabled {
            window.virtual_cursor = (x, y);
        } else {
            self.native
                .move_pointer(window.native, x.round() as i32, y.round() as i32);
        }
        Ok(())
    }

    pub(crate) fn change_cursor_mode(&mut self, id: WindowId, mode: CursorMode) -> Result<()> {
        let key = self.lookup_window(id)?;
        let window = &mut self.windows[key];
        if window.cursor_mode == mode {
            return Ok(());
        }

        if mode == CursorMode::Disabled {
            let (x, y) = self.native.pointer_position(window.native);
            window.virtual_cursor = (f64::from(x), f64::from(y));
            let (cx, cy) = window.center();
            self.native.move_pointer(window.native, cx, cy);
        } else if window.cursor_mode == CursorMode::Disabled {
            let (x, y) = window.virtual_cursor;
            self.native
                .move_pointer(window.native, x.round() as i32, y.round() as i32);
        }
        window.cursor_mode = mode;

        self.apply_pointer(key);
        Ok(())
    }

    pub(crate) fn new_custom_cursor(
        &mut self,
        image: &CursorImage,
        xhot: i32,
        yhot: i32,
    ) -> Result<CursorId> {
        self.ensure_active()?;
        if !image.is_valid() {
            return Err(PlatformError::InvalidValue(format!(
                "cursor image {}x{} with {} bytes",
                image.width,
                image.height,
                image.pixels.len()
            )));
        }
        let pointer = self
            .native
            .new_pointer(image.width, image.height, &image.pixels, xhot, yhot)
            .ok_or_else(|| PlatformError::Other("failed to create pointer object".to_string()))?;
        let key = self.cursors.insert(Os4Cursor {
            shape: PointerShape::Custom(pointer),
        });
        Ok(key.into())
    }

    pub(crate) fn new_standard_cursor(&mut self, shape: StandardCursor) -> Result<CursorId> {
        self.ensure_active()?;
        let key = self.cursors.insert(Os4Cursor {
            shape: standard_shape(shape),
        });
        Ok(key.into())
    }

    pub(crate) fn dispose_cursor(&mut self, id: CursorId) -> Result<()> {
        let key = self.lookup_cursor(id)?;
        let Some(cursor) = self.cursors.remove(key) else {
            return Ok(());
        };

        let users: Vec<WindowKey> = self
            .windows
            .iter()
            .filter(|(_, w)| w.cursor == Some(key))
            .map(|(k, _)| k)
            .collect();
        for window in users {
            self.windows[window].cursor = None;
            self.apply_pointer(window);
        }

        if let PointerShape::Custom(pointer) = cursor.shape {
            self.native.dispose_pointer(pointer);
        }
        Ok(())
    }

    pub(crate) fn assign_cursor(&mut self, id: WindowId, cursor: Option<CursorId>) -> Result<()> {
        let key = self.lookup_window(id)?;
        let cursor = cursor.map(|c| self.lookup_cursor(c)).transpose()?;
        self.windows[key].cursor = cursor;
        self.apply_pointer(key);
        Ok(())
    }

    /// Dispose every custom pointer; used by terminate after windows close
    pub(crate) fn release_cursors(&mut self) {
        for (_, cursor) in self.cursors.drain() {
            if let PointerShape::Custom(pointer) = cursor.shape {
                self.native.dispose_pointer(pointer);
            }
        }
    }
}
