//! Backend configuration
//!
//! Defaults match a stock AmigaOS 4.1 installation. A TOML file can raise
//! library versions or override the application name:
//!
//! ```toml
//! requester_title = "MyGame: fatal error"
//! app_name = "MyGame"
//!
//! [libraries]
//! graphics = 54
//! intuition = 53
//! ```

use std::fs;
use std::path::Path;

use glint_platform::{PlatformError, Result};
use serde::{Deserialize, Serialize};

/// AmigaOS 4 backend configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Os4Config {
    /// Minimum library versions
    pub libraries: LibraryVersions,
    /// Title of the fatal error requester
    pub requester_title: String,
    /// Application name to use instead of asking the OS
    pub app_name: Option<String>,
}

impl Default for Os4Config {
    fn default() -> Self {
        Self {
            libraries: LibraryVersions::default(),
            requester_title: "Glint: FATAL ERROR".to_string(),
            app_name: None,
        }
    }
}

impl Os4Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PlatformError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Set the requester title
    pub fn requester_title(mut self, title: impl Into<String>) -> Self {
        self.requester_title = title.into();
        self
    }

    /// Override the application name
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Replace the library version table
    pub fn libraries(mut self, libraries: LibraryVersions) -> Self {
        self.libraries = libraries;
        self
    }
}

/// Minimum version of every library the backend opens
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryVersions {
    pub dos: u32,
    pub graphics: u32,
    pub intuition: u32,
    pub keymap: u32,
    pub workbench: u32,
    pub icon: u32,
    pub amigainput: u32,
    pub textclip: u32,
}

/// Version required by every library unless stated otherwise
pub const MIN_LIB_VERSION: u32 = 51;

impl Default for LibraryVersions {
    fn default() -> Self {
        Self {
            dos: MIN_LIB_VERSION,
            graphics: 54,
            intuition: MIN_LIB_VERSION,
            keymap: MIN_LIB_VERSION,
            workbench: MIN_LIB_VERSION,
            icon: MIN_LIB_VERSION,
            amigainput: MIN_LIB_VERSION,
            textclip: MIN_LIB_VERSION,
        }
    }
}
