//! AmigaInput joysticks

use std::fmt::Write as _;

use glint_platform::joystick::hat;
use glint_platform::{JoystickId, JoystickState, PlatformError, PollMode, Result};

use crate::native::{AinDevice, AinSample, NativeOs};
use crate::platform::Os4Platform;

/// Platform name in gamepad mapping strings
pub const MAPPING_NAME: &str = "AmigaOS4";

/// Bus type prefix of generated GUIDs
const GUID_BUS: &str = "03000000";

/// An AmigaInput device and its last known state
#[derive(Clone, Debug, PartialEq)]
pub struct Os4Joystick {
    pub device: u32,
    pub connected: bool,
    pub state: JoystickState,
}

impl Os4Joystick {
    pub(crate) fn new(device: &AinDevice) -> Self {
        Self {
            device: device.id,
            connected: true,
            state: JoystickState {
                name: device.name.clone(),
                guid: guid_for(&device.name),
                axes: vec![0.0; device.axes],
                buttons: vec![false; device.buttons],
                hats: vec![hat::CENTERED; device.hats],
            },
        }
    }

    fn apply(&mut self, sample: &AinSample, mode: PollMode) {
        if matches!(mode, PollMode::Axes | PollMode::All) {
            for (axis, &raw) in self.state.axes.iter_mut().zip(&sample.axes) {
                *axis = normalize_axis(raw);
            }
        }
        if matches!(mode, PollMode::Buttons | PollMode::All) {
            for (button, &pressed) in self.state.buttons.iter_mut().zip(&sample.buttons) {
                *button = pressed;
            }
            for (slot, &bits) in self.state.hats.iter_mut().zip(&sample.hats) {
                *slot = bits & (hat::UP | hat::RIGHT | hat::DOWN | hat::LEFT);
            }
        }
    }
}

/// Map an AmigaInput axis reading onto `-1.0..=1.0`
pub fn normalize_axis(raw: i32) -> f32 {
    (raw as f32 / 32767.0).clamp(-1.0, 1.0)
}

/// SDL-style GUID for a device without vendor/product ids: bus type
/// followed by the first 12 bytes of the name
pub fn guid_for(name: &str) -> String {
    let mut guid = String::with_capacity(32);
    guid.push_str(GUID_BUS);
    for byte in name.bytes().chain(std::iter::repeat(0)).take(12) {
        let _ = write!(guid, "{byte:02x}");
    }
    guid
}

impl<N: NativeOs> Os4Platform<N> {
    pub(crate) fn open_joysticks(&mut self) -> Result<()> {
        self.ensure_active()?;
        if !self.joysticks.is_empty() {
            return Ok(());
        }
        self.joysticks = self
            .native
            .ain_devices()
            .iter()
            .map(Os4Joystick::new)
            .collect();
        tracing::info!("Found {} AmigaInput devices", self.joysticks.len());
        Ok(())
    }

    pub(crate) fn close_joysticks(&mut self) {
        for joystick in self.joysticks.drain(..) {
            self.native.ain_release(joystick.device);
        }
    }

    pub(crate) fn connected_joysticks(&self) -> Result<Vec<JoystickId>> {
        self.ensure_active()?;
        Ok(self
            .joysticks
            .iter()
            .enumerate()
            .filter(|(_, j)| j.connected)
            .map(|(index, _)| JoystickId(index as u32))
            .collect())
    }

    pub(crate) fn read_joystick(
        &mut self,
        id: JoystickId,
        mode: PollMode,
    ) -> Result<Option<&JoystickState>> {
        self.ensure_active()?;
        let joystick = self
            .joysticks
            .get_mut(id.0 as usize)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("{id:?}")))?;
        if !joystick.connected {
            return Ok(None);
        }

        match self.native.ain_read(joystick.device) {
            Some(sample) => {
                joystick.apply(&sample, mode);
                Ok(Some(&joystick.state))
            }
            None => {
                joystick.connected = false;
                tracing::info!("Joystick '{}' disconnected", joystick.state.name);
                Ok(None)
            }
        }
    }
}
