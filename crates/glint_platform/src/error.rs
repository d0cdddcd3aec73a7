//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Failed to initialize platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// A required native library could not be opened
    #[error("Couldn't open {name} version {version}+")]
    LibraryUnavailable {
        /// Library name, e.g. `intuition.library`
        name: String,
        /// Minimum version that was requested
        version: u32,
    },

    /// A native message port could not be allocated
    #[error("Failed to allocate message port: {0}")]
    PortAllocation(&'static str),

    /// Operation called outside the init..terminate window
    #[error("Platform is not initialized")]
    NotInitialized,

    /// Failed to create window
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// A window, cursor, monitor or joystick id that does not exist
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// An argument outside the accepted range
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Platform or operation not supported
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Configuration could not be read or parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_unavailable_message() {
        let err = PlatformError::LibraryUnavailable {
            name: "keymap.library".to_string(),
            version: 51,
        };
        assert_eq!(err.to_string(), "Couldn't open keymap.library version 51+");
    }
}
