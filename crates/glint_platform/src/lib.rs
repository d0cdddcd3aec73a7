//! Glint Platform Abstraction Layer
//!
//! This crate provides the platform-neutral contract between the Glint
//! windowing library and its operating-system backends.
//!
//! # Architecture
//!
//! - [`Key`] - The closed logical key enumeration every backend maps onto
//! - [`Platform`] - The dispatch trait, one method per platform operation
//! - [`Connector`] / [`select_platform`] - How the host picks a backend
//! - [`EventSink`] - Where backends deliver translated events
//!
//! # Platform Implementations
//!
//! - `glint_platform_os4` - AmigaOS 4 (exec, intuition, AmigaInput)
//!
//! # Example
//!
//! `native` is any `glint_platform_os4::NativeOs` implementor, such as the
//! bundled `MockOs`.
//!
//! ```ignore
//! use glint_platform::prelude::*;
//! use glint_platform_os4::{MockOs, Os4Config, Os4Connector};
//!
//! fn main() -> Result<()> {
//!     let native = MockOs::new();
//!     let connector = Os4Connector::new(native, Os4Config::default());
//!     let connectors: Vec<Box<dyn Connector>> = vec![Box::new(connector)];
//!     let mut platform = select_platform(PlatformId::Any, connectors)?;
//!     platform.init()?;
//!     let window = platform.create_window(&WindowConfig::new("Hello"))?;
//!
//!     let mut events: Vec<Event> = Vec::new();
//!     platform.wait_events(&mut events)?;
//!
//!     platform.destroy_window(window)?;
//!     platform.terminate();
//!     Ok(())
//! }
//! ```

mod error;
mod event;
mod input;
pub mod joystick;
mod key;
mod monitor;
mod platform;
mod window;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{Event, EventSink, WindowEvent};
pub use input::{CursorMode, InputEvent, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent};
pub use joystick::{JoystickId, JoystickState, PollMode};
pub use key::{Key, KEY_COUNT, KEY_NAME_MAX};
pub use monitor::{GammaRamp, MonitorId, MonitorInfo, Rect, VideoMode};
pub use platform::{select_platform, Connector, FrameSize, Platform, PlatformId};
pub use window::{CursorId, CursorImage, StandardCursor, WindowConfig, WindowId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, EventSink, WindowEvent};
    pub use crate::input::{
        CursorMode, InputEvent, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent,
    };
    pub use crate::key::Key;
    pub use crate::platform::{select_platform, Connector, Platform, PlatformId};
    pub use crate::window::{CursorId, StandardCursor, WindowConfig, WindowId};
}
