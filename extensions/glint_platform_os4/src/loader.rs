//! Native library loading
//!
//! Libraries are opened in [`Library::LOAD_ORDER`]; the first failure stops
//! the sequence. Whatever was opened stays open until
//! [`Libraries::release_all`], which closes in reverse order.

use std::fmt;

use glint_platform::{PlatformError, Result};

use crate::config::LibraryVersions;
use crate::native::{Interface, LibraryBase, NativeOs};

/// Name and version of the interface every library exposes
const MAIN_INTERFACE: &str = "main";
const MAIN_INTERFACE_VERSION: u32 = 1;

/// Libraries the backend depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Library {
    Dos,
    Graphics,
    Intuition,
    Keymap,
    Workbench,
    Icon,
    AmigaInput,
    TextClip,
}

impl Library {
    /// Dependency order. dos.library comes first; intuition.library must
    /// precede the rest because error requesters need it.
    pub const LOAD_ORDER: [Library; 8] = [
        Library::Dos,
        Library::Graphics,
        Library::Intuition,
        Library::Keymap,
        Library::Workbench,
        Library::Icon,
        Library::AmigaInput,
        Library::TextClip,
    ];

    /// Library file name
    pub fn name(self) -> &'static str {
        match self {
            Library::Dos => "dos.library",
            Library::Graphics => "graphics.library",
            Library::Intuition => "intuition.library",
            Library::Keymap => "keymap.library",
            Library::Workbench => "workbench.library",
            Library::Icon => "icon.library",
            Library::AmigaInput => "AmigaInput.library",
            Library::TextClip => "textclip.library",
        }
    }

    /// Minimum version from the configuration
    pub fn min_version(self, versions: &LibraryVersions) -> u32 {
        match self {
            Library::Dos => versions.dos,
            Library::Graphics => versions.graphics,
            Library::Intuition => versions.intuition,
            Library::Keymap => versions.keymap,
            Library::Workbench => versions.workbench,
            Library::Icon => versions.icon,
            Library::AmigaInput => versions.amigainput,
            Library::TextClip => versions.textclip,
        }
    }
}

/// A library base together with its main interface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenedLibrary {
    pub library: Library,
    pub base: LibraryBase,
    pub iface: Interface,
}

/// Fatal error messages shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report<'a> {
    /// A library could not be opened at the required version
    LibraryUnavailable { name: &'a str, version: u32 },
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::LibraryUnavailable { name, version } => {
                writeln!(f, "Couldn't open {name} version {version}+.")
            }
        }
    }
}

/// Show a report in a requester, or print it when that is impossible
///
/// Requesters need intuition.library, so `requester_available` must be
/// false until it is open. Returns whether the requester was shown.
pub fn report_error<N: NativeOs>(
    native: &mut N,
    title: &str,
    requester_available: bool,
    report: Report<'_>,
) -> bool {
    let body = report.to_string();
    tracing::error!("{}", body.trim_end());

    if requester_available && native.show_requester(title, &body) {
        return true;
    }
    native.print_diagnostic(&body);
    false
}

/// Open one library and obtain its main interface
///
/// On interface failure the base is closed again before returning, so a
/// failed acquire never leaves anything behind.
pub fn acquire<N: NativeOs>(
    native: &mut N,
    library: Library,
    version: u32,
    title: &str,
    requester_available: bool,
) -> Result<OpenedLibrary> {
    let name = library.name();
    let unavailable = || PlatformError::LibraryUnavailable {
        name: name.to_string(),
        version,
    };

    let Some(base) = native.open_library(name, version) else {
        report_error(
            native,
            title,
            requester_available,
            Report::LibraryUnavailable { name, version },
        );
        return Err(unavailable());
    };

    let Some(iface) = native.get_interface(base, MAIN_INTERFACE, MAIN_INTERFACE_VERSION) else {
        native.close_library(base);
        report_error(
            native,
            title,
            requester_available,
            Report::LibraryUnavailable { name, version },
        );
        return Err(unavailable());
    };

    tracing::debug!("Opened {} v{}+", name, version);
    Ok(OpenedLibrary {
        library,
        base,
        iface,
    })
}

/// The set of opened libraries, in acquisition order
#[derive(Debug, Default)]
pub struct Libraries {
    opened: Vec<OpenedLibrary>,
}

impl Libraries {
    /// Open every library in [`Library::LOAD_ORDER`], stopping at the first
    /// failure. Libraries opened before the failure stay open.
    pub fn load_all<N: NativeOs>(
        &mut self,
        native: &mut N,
        versions: &LibraryVersions,
        requester_title: &str,
    ) -> Result<()> {
        for library in Library::LOAD_ORDER {
            if self.is_open(library) {
                continue;
            }
            let requester_available = self.is_open(Library::Intuition);
            let opened = acquire(
                native,
                library,
                library.min_version(versions),
                requester_title,
                requester_available,
            )?;
            self.opened.push(opened);
        }
        Ok(())
    }

    /// Whether a library is currently open
    pub fn is_open(&self, library: Library) -> bool {
        self.opened.iter().any(|l| l.library == library)
    }

    /// Main interface of an open library
    pub fn interface(&self, library: Library) -> Option<Interface> {
        self.opened
            .iter()
            .find(|l| l.library == library)
            .map(|l| l.iface)
    }

    /// Number of open libraries
    pub fn len(&self) -> usize {
        self.opened.len()
    }

    /// Whether nothing is open
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty()
    }

    /// Drop interfaces and close bases, newest first
    pub fn release_all<N: NativeOs>(&mut self, native: &mut N) {
        while let Some(opened) = self.opened.pop() {
            native.drop_interface(opened.iface);
            native.close_library(opened.base);
            tracing::debug!("Closed {}", opened.library.name());
        }
    }
}
