//! Backend init and terminate
//!
//! Init acquires, in order: libraries, key tables, the user port, the app
//! port, the monitor list and the application name. A failure part way
//! leaves the backend [`Lifecycle::Failed`] with whatever was acquired still
//! held; terminate releases it, so a failed init must still be followed by
//! terminate.

use glint_platform::{PlatformError, Result};

use crate::app_name::find_application_name;
use crate::keys::KeyTables;
use crate::monitor::poll_monitors;
use crate::native::NativeOs;
use crate::platform::Os4Platform;
use crate::port::MessagePort;

/// Where the backend is in its init..terminate cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Nothing held
    #[default]
    Uninitialized,
    /// Init completed
    Active,
    /// Init stopped part way; some resources may be held
    Failed,
}

impl<N: NativeOs> Os4Platform<N> {
    pub(crate) fn startup(&mut self) -> Result<()> {
        match self.state {
            Lifecycle::Active => {
                return Err(PlatformError::InitFailed(
                    "AmigaOS 4 backend is already initialized".to_string(),
                ))
            }
            Lifecycle::Failed => {
                tracing::warn!("Re-initializing after a failed init; releasing leftovers");
                self.shutdown();
            }
            Lifecycle::Uninitialized => {}
        }

        tracing::debug!("Initializing AmigaOS 4 backend");

        if let Err(e) = self.acquire_all() {
            self.state = Lifecycle::Failed;
            tracing::error!("AmigaOS 4 init failed: {}", e);
            return Err(e);
        }

        self.state = Lifecycle::Active;
        tracing::info!(
            "AmigaOS 4 backend ready: {} libraries, {} monitors",
            self.libraries.len(),
            self.monitors.len()
        );
        Ok(())
    }

    fn acquire_all(&mut self) -> Result<()> {
        self.libraries.load_all(
            &mut self.native,
            &self.config.libraries,
            &self.config.requester_title,
        )?;

        self.keys = Some(Box::new(KeyTables::build()));

        self.user_port = Some(MessagePort::alloc(&mut self.native, "user")?);
        self.app_port = Some(MessagePort::alloc(&mut self.native, "app")?);

        self.monitors = poll_monitors(&self.native);

        self.app_name = find_application_name(&self.native, self.config.app_name.as_deref());

        Ok(())
    }

    pub(crate) fn shutdown(&mut self) {
        if self.state == Lifecycle::Uninitialized {
            tracing::debug!("Terminate without a prior init");
            return;
        }

        tracing::debug!("Terminating AmigaOS 4 backend");

        let window_count = self.windows.len();
        for (_, window) in self.windows.drain() {
            self.native.close_window(window.native);
        }
        if window_count > 0 {
            tracing::debug!("Closed {} windows left open", window_count);
        }

        self.release_cursors();
        self.close_joysticks();

        if let Some(port) = self.app_port.take() {
            port.free(&mut self.native);
        }
        if let Some(port) = self.user_port.take() {
            port.free(&mut self.native);
        }

        self.clipboard = None;
        self.libraries.release_all(&mut self.native);

        self.keys = None;
        self.monitors.clear();
        self.app_name = None;
        self.state = Lifecycle::Uninitialized;

        tracing::info!("AmigaOS 4 backend terminated");
    }

    fn holds_resources(&self) -> bool {
        !self.libraries.is_empty()
            || self.user_port.is_some()
            || self.app_port.is_some()
            || !self.windows.is_empty()
            || !self.cursors.is_empty()
            || !self.joysticks.is_empty()
    }
}

impl<N: NativeOs> Drop for Os4Platform<N> {
    fn drop(&mut self) {
        if self.holds_resources() {
            tracing::warn!(
                "AmigaOS 4 backend dropped without terminate; {} libraries, {} windows, {} cursors and {} joysticks leaked",
                self.libraries.len(),
                self.windows.len(),
                self.cursors.len(),
                self.joysticks.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Os4Config;
    use crate::mock::MockOs;
    use crate::cursor::Os4Cursor;
    use crate::joystick::Os4Joystick;
    use crate::native::{AinDevice, MessageKind, PointerShape};
    use glint_platform::{Key, Platform, WindowConfig};

    fn platform(native: &MockOs) -> Os4Platform<MockOs> {
        Os4Platform::new(native.clone(), Os4Config::default())
    }

    #[test]
    fn test_init_then_terminate_releases_everything() {
        let native = MockOs::new().cli_name("MyApp");
        let mut platform = platform(&native);

        platform.init().unwrap();
        assert!(platform.is_active());
        assert_eq!(native.open_library_count(), 8);
        assert_eq!(native.ports_allocated(), 2);
        assert_eq!(platform.app_name().unwrap().to_bytes_with_nul(), b"MyApp\0");
        assert!(platform.key_tables().is_some());

        platform.terminate();
        assert_eq!(platform.lifecycle(), Lifecycle::Uninitialized);
        assert_eq!(native.open_library_count(), 0);
        assert_eq!(native.live_interfaces(), 0);
        assert_eq!(native.ports_freed(), 2);
        assert_eq!(native.double_releases(), 0);
        assert!(platform.app_name().is_none());
        assert!(platform.key_tables().is_none());
    }

    #[test]
    fn test_partial_library_failure() {
        let native = MockOs::new().fail_library("intuition.library");
        let mut platform = platform(&native);

        let err = platform.init().unwrap_err();
        assert!(matches!(err, PlatformError::LibraryUnavailable { .. }));
        assert_eq!(platform.lifecycle(), Lifecycle::Failed);
        assert_eq!(native.ports_allocated(), 0);
        assert!(platform.key_tables().is_none());

        platform.terminate();
        assert_eq!(native.closed_libraries().len(), 2);
        assert_eq!(native.dropped_interfaces(), 2);
        assert_eq!(native.open_library_count(), 0);
        assert_eq!(native.double_releases(), 0);

        // A second terminate finds nothing left to release
        platform.terminate();
        assert_eq!(native.closed_libraries().len(), 2);
        assert_eq!(native.double_releases(), 0);
    }

    #[test]
    fn test_app_port_failure_frees_user_port() {
        let native = MockOs::new().fail_port_after(1);
        let mut platform = platform(&native);

        let err = platform.init().unwrap_err();
        assert_eq!(err, PlatformError::PortAllocation("app"));
        assert!(platform.user_port().is_some());

        platform.terminate();
        assert_eq!(native.ports_freed(), 1);
        assert_eq!(native.open_library_count(), 0);
        assert_eq!(native.double_releases(), 0);
    }

    #[test]
    fn test_operations_outside_active_window() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        assert_eq!(
            platform.key_scancode(Key::A),
            Err(PlatformError::NotInitialized)
        );

        platform.init().unwrap();
        assert!(platform.key_scancode(Key::A).unwrap().is_some());

        platform.terminate();
        assert_eq!(
            platform.create_window(&WindowConfig::default()),
            Err(PlatformError::NotInitialized)
        );
        assert_eq!(platform.post_empty_event(), Err(PlatformError::NotInitialized));
    }

    #[test]
    fn test_terminate_without_init_is_noop() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        platform.terminate();
        assert!(native.closed_libraries().is_empty());
        assert_eq!(native.ports_freed(), 0);
    }

    #[test]
    fn test_double_init_rejected() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        platform.init().unwrap();
        assert!(matches!(platform.init(), Err(PlatformError::InitFailed(_))));
        assert_eq!(native.opened_libraries().len(), 8);
        platform.terminate();
    }

    #[test]
    fn test_reinit_after_failure_releases_leftovers() {
        let native = MockOs::new().fail_port_after(1);
        let mut platform = platform(&native);
        assert!(platform.init().is_err());
        assert!(platform.init().is_err());

        // The second attempt released the first one's libraries and port
        assert_eq!(native.closed_libraries().len(), 8);
        assert_eq!(native.ports_freed(), 1);
        platform.terminate();
        assert_eq!(native.open_library_count(), 0);
    }

    #[test]
    fn test_terminate_closes_windows_and_ports() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        platform.init().unwrap();
        platform.create_window(&WindowConfig::default()).unwrap();
        platform.create_window(&WindowConfig::new("Second")).unwrap();
        assert_eq!(native.open_windows(), 2);

        platform.terminate();
        assert_eq!(native.open_windows(), 0);
        assert_eq!(native.windows_closed(), 2);
    }

    #[test]
    fn test_terminate_replies_to_queued_messages() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        platform.init().unwrap();
        let user_port = platform.user_port().unwrap();
        let app_port = platform.app_port().unwrap();

        for id in 0..3 {
            native.queue(app_port, MessageKind::AppMessage { id });
        }
        native.queue(user_port, MessageKind::Wakeup);
        native.queue(user_port, MessageKind::Wakeup);
        assert_eq!(native.pending(), 5);

        platform.terminate();
        assert_eq!(native.replies(), 5);
        assert_eq!(native.pending(), 0);
        assert_eq!(native.ports_freed(), 2);
        assert_eq!(native.double_releases(), 0);
    }

    #[test]
    fn test_cursors_and_joysticks_count_as_held() {
        let native = MockOs::new();
        let mut platform = platform(&native);
        assert!(!platform.holds_resources());

        platform.cursors.insert(Os4Cursor {
            shape: PointerShape::Hand,
        });
        assert!(platform.holds_resources());
        platform.cursors.clear();

        platform.joysticks.push(Os4Joystick::new(&AinDevice {
            id: 3,
            name: "Pad".to_string(),
            axes: 2,
            buttons: 2,
            hats: 0,
        }));
        assert!(platform.holds_resources());
        platform.joysticks.clear();
        assert!(!platform.holds_resources());
    }
}
