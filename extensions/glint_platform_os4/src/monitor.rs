//! Public screens reported as monitors

use glint_platform::{MonitorId, MonitorInfo, PlatformError, Rect, Result, VideoMode};

use crate::native::{NativeOs, ScreenInfo};
use crate::platform::Os4Platform;

/// A monitor backed by a public screen
#[derive(Clone, Debug, PartialEq)]
pub struct Os4Monitor {
    pub screen: ScreenInfo,
}

impl Os4Monitor {
    /// Screen area below the title bar
    pub fn workarea(&self) -> Rect {
        let bar = self.screen.bar_height.min(self.screen.height);
        Rect {
            x: self.screen.x,
            y: self.screen.y + bar as i32,
            width: self.screen.width,
            height: self.screen.height - bar,
        }
    }

    /// The mode the screen runs in
    pub fn current_mode(&self) -> VideoMode {
        self.mode(self.screen.width, self.screen.height, self.screen.depth)
    }

    /// Every mode the driver offers plus the current one, sorted by colour
    /// depth then area, without duplicates
    pub fn video_modes(&self) -> Vec<VideoMode> {
        let mut modes: Vec<VideoMode> = self
            .screen
            .modes
            .iter()
            .map(|&(width, height, depth)| self.mode(width, height, depth))
            .collect();
        modes.push(self.current_mode());

        modes.sort_by_key(|m| {
            (
                u32::from(m.red_bits) + u32::from(m.green_bits) + u32::from(m.blue_bits),
                u64::from(m.width) * u64::from(m.height),
                m.width,
            )
        });
        modes.dedup();
        modes
    }

    /// Physical size assuming 96 dpi; screens don't report one
    pub fn physical_size(&self) -> (u32, u32) {
        let mm = |pixels: u32| (f64::from(pixels) * 25.4 / 96.0).round() as u32;
        (mm(self.screen.width), mm(self.screen.height))
    }

    fn mode(&self, width: u32, height: u32, depth: u8) -> VideoMode {
        let (red_bits, green_bits, blue_bits) = split_bpp(depth);
        VideoMode {
            width,
            height,
            red_bits,
            green_bits,
            blue_bits,
            refresh_rate: self.screen.refresh_rate,
        }
    }
}

/// Split a pixel depth into red, green and blue channel widths
///
/// Alpha in 32-bit modes is ignored; leftover bits go to green first.
pub fn split_bpp(depth: u8) -> (u8, u8, u8) {
    let bpp = if depth == 32 { 24 } else { depth };
    let base = bpp / 3;
    let (mut red, mut green, blue) = (base, base, base);
    let delta = bpp - base * 3;
    if delta >= 1 {
        green += 1;
    }
    if delta == 2 {
        red += 1;
    }
    (red, green, blue)
}

/// Enumerate public screens, Workbench first
pub fn poll_monitors<N: NativeOs>(native: &N) -> Vec<Os4Monitor> {
    let monitors: Vec<Os4Monitor> = native
        .screens()
        .into_iter()
        .map(|screen| Os4Monitor { screen })
        .collect();
    for monitor in &monitors {
        tracing::debug!(
            "Monitor '{}' {}x{}x{}",
            monitor.screen.name,
            monitor.screen.width,
            monitor.screen.height,
            monitor.screen.depth
        );
    }
    if monitors.is_empty() {
        tracing::warn!("No public screens found");
    }
    monitors
}

impl<N: NativeOs> Os4Platform<N> {
    pub(crate) fn monitor(&self, id: MonitorId) -> Result<&Os4Monitor> {
        self.ensure_active()?;
        self.monitors
            .get(id.0 as usize)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("{id:?}")))
    }

    pub(crate) fn monitor_list(&self) -> Result<Vec<MonitorInfo>> {
        self.ensure_active()?;
        Ok(self
            .monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| {
                let (width_mm, height_mm) = monitor.physical_size();
                MonitorInfo {
                    id: MonitorId(index as u32),
                    name: monitor.screen.name.clone(),
                    width_mm,
                    height_mm,
                }
            })
            .collect())
    }
}
