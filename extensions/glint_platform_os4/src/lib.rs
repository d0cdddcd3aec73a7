//! Glint AmigaOS 4 Platform
//!
//! Windowing, input and process lifecycle for AmigaOS 4 on top of exec,
//! intuition, graphics, textclip and AmigaInput.
//!
//! This crate implements the `glint_platform` dispatch trait. Every OS call
//! goes through [`NativeOs`], so the whole backend runs against [`MockOs`]
//! in tests.
//!
//! # Example
//!
//! Any [`NativeOs`] implementor plugs in the same way; [`MockOs`] is used
//! here.
//!
//! ```no_run
//! use glint_platform::prelude::*;
//! use glint_platform_os4::{MockOs, Os4Config, Os4Connector};
//!
//! fn main() -> Result<()> {
//!     glint_platform_os4::init_logging();
//!
//!     let connector = Os4Connector::new(MockOs::new(), Os4Config::default());
//!     let connectors: Vec<Box<dyn Connector>> = vec![Box::new(connector)];
//!     let mut platform = select_platform(PlatformId::Os4, connectors)?;
//!     platform.init()?;
//!
//!     let window = platform.create_window(&WindowConfig::new("Hello Amiga"))?;
//!     let mut events: Vec<Event> = Vec::new();
//!     loop {
//!         platform.wait_events(&mut events)?;
//!         if events.drain(..).any(|e| matches!(e, Event::Window { event: WindowEvent::CloseRequested, .. })) {
//!             break;
//!         }
//!     }
//!
//!     platform.destroy_window(window)?;
//!     platform.terminate();
//!     Ok(())
//! }
//! ```

pub mod app_name;
pub mod clipboard;
pub mod config;
pub mod cursor;
pub mod event_loop;
pub mod input;
pub mod joystick;
pub mod keys;
pub mod lifecycle;
pub mod loader;
pub mod mock;
pub mod monitor;
pub mod native;
pub mod platform;
pub mod port;
pub mod window;

pub use config::{LibraryVersions, Os4Config};
pub use keys::{KeyTables, NATIVE_KEY_MAP};
pub use lifecycle::Lifecycle;
pub use loader::{Libraries, Library, Report};
pub use mock::MockOs;
pub use native::NativeOs;
pub use platform::{Os4Connector, Os4Platform};

/// Install a `tracing` subscriber writing to the shell
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    let _ = tracing::subscriber::set_global_default(subscriber);
}
