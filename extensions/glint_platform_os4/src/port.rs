//! Exec message ports

use glint_platform::{PlatformError, Result};

use crate::native::{NativeOs, PortId};

/// An allocated message port
///
/// Not freed on drop: [`MessagePort::free`] needs the native OS handle, and
/// the lifecycle manager decides when teardown happens.
#[derive(Debug, PartialEq, Eq)]
pub struct MessagePort {
    id: PortId,
    label: &'static str,
}

impl MessagePort {
    /// Allocate a port; `label` names it in errors and logs
    pub fn alloc<N: NativeOs>(native: &mut N, label: &'static str) -> Result<Self> {
        let id = native
            .alloc_port()
            .ok_or(PlatformError::PortAllocation(label))?;
        tracing::debug!("Allocated {} port {:?}", label, id);
        Ok(Self { id, label })
    }

    /// Native port id
    pub fn id(&self) -> PortId {
        self.id
    }

    /// Reply to every message queued right now; returns how many
    pub fn drain<N: NativeOs>(&self, native: &mut N) -> usize {
        let mut replied = 0;
        while let Some(msg) = native.get_msg(self.id) {
            native.reply_msg(msg);
            replied += 1;
        }
        replied
    }

    /// Drain and free the port
    pub fn free<N: NativeOs>(self, native: &mut N) -> usize {
        let replied = self.drain(native);
        native.free_port(self.id);
        tracing::debug!("Freed {} port after replying to {} messages", self.label, replied);
        replied
    }
}
