//! Application name discovery

use std::ffi::{CStr, CString};

use crate::native::NativeOs;

/// Longest path dos.library hands back, terminator included
pub const MAX_PATH_LEN: usize = 1024;

/// Work out the application's name
///
/// An explicit override wins; otherwise the shell command name, falling back
/// to the name of the running task when started from Workbench. The result
/// is stored exactly sized with its terminator. `None` only if the name
/// contains an interior NUL, which is not fatal.
pub fn find_application_name<N: NativeOs>(
    native: &N,
    name_override: Option<&str>,
) -> Option<Box<CStr>> {
    let mut name = match name_override {
        Some(name) => name.to_string(),
        None => match native.cli_program_name().filter(|n| !n.is_empty()) {
            Some(name) => {
                tracing::debug!("GetCliProgramName: '{}'", name);
                name
            }
            None => {
                tracing::debug!("Failed to get CLI program name, checking task node");
                native.current_task_name()
            }
        },
    };

    if name.len() >= MAX_PATH_LEN {
        let mut end = MAX_PATH_LEN - 1;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }

    match CString::new(name) {
        Ok(name) => {
            tracing::debug!("Application name: '{}'", name.to_string_lossy());
            Some(name.into_boxed_c_str())
        }
        Err(e) => {
            tracing::warn!("Application name unusable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockOs;

    #[test]
    fn test_cli_name_preferred() {
        let native = MockOs::new().cli_name("MyApp").task_name("Shell Process");
        let name = find_application_name(&native, None).unwrap();
        assert_eq!(name.to_bytes_with_nul(), b"MyApp\0");
    }

    #[test]
    fn test_task_name_fallback() {
        let native = MockOs::new().task_name("Workbench Task");
        let name = find_application_name(&native, None).unwrap();
        assert_eq!(name.to_str().unwrap(), "Workbench Task");
    }

    #[test]
    fn test_empty_cli_name_falls_back() {
        let native = MockOs::new().cli_name("").task_name("Task");
        let name = find_application_name(&native, None).unwrap();
        assert_eq!(name.to_str().unwrap(), "Task");
    }

    #[test]
    fn test_override_wins() {
        let native = MockOs::new().cli_name("MyApp");
        let name = find_application_name(&native, Some("Configured")).unwrap();
        assert_eq!(name.to_str().unwrap(), "Configured");
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "x".repeat(MAX_PATH_LEN * 2);
        let native = MockOs::new().cli_name(&long);
        let name = find_application_name(&native, None).unwrap();
        assert_eq!(name.to_bytes_with_nul().len(), MAX_PATH_LEN);
    }

    #[test]
    fn test_interior_nul_is_not_fatal() {
        let native = MockOs::new().cli_name("bad\0name");
        assert!(find_application_name(&native, None).is_none());
    }
}
