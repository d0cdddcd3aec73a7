//! textclip.library clipboard

use glint_platform::{PlatformError, Result};

use crate::native::NativeOs;
use crate::platform::Os4Platform;

impl<N: NativeOs> Os4Platform<N> {
    pub(crate) fn write_clipboard(&mut self, text: &str) -> Result<()> {
        self.ensure_active()?;
        if !self.native.write_clip_text(text) {
            return Err(PlatformError::Other(
                "failed to write the clipboard".to_string(),
            ));
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    /// The returned text stays valid until the next clipboard call or
    /// terminate; each read replaces the previous buffer.
    pub(crate) fn read_clipboard(&mut self) -> Result<Option<&str>> {
        self.ensure_active()?;
        self.clipboard = self.native.read_clip_text();
        if self.clipboard.is_none() {
            tracing::debug!("Clipboard is empty or holds no text");
        }
        Ok(self.clipboard.as_deref())
    }
}
