use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use tracing::debug;
use xcap::Monitor;

use super::ScreenCapturer;

/// Captures the primary monitor through the `xcap` crate.
pub struct XcapScreenCapturer;

impl XcapScreenCapturer {
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor> {
        let monitors = Monitor::all().context("Failed to enumerate monitors")?;
        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(monitor);
            }
            fallback.get_or_insert(monitor);
        }
        fallback.ok_or_else(|| anyhow!("No monitor available for capture"))
    }
}

impl Default for XcapScreenCapturer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenCapturer for XcapScreenCapturer {
    fn capture(&mut self) -> Result<RgbaImage> {
        let monitor = Self::primary_monitor()?;
        let captured = monitor.capture_image().context("Failed to capture monitor")?;
        let (width, height) = (captured.width(), captured.height());
        debug!("Captured screen {width}x{height}");
        // xcap may be built against another `image` release, hand the pixels over raw.
        RgbaImage::from_raw(width, height, captured.into_raw())
            .ok_or_else(|| anyhow!("Captured buffer doesn't match {width}x{height}"))
    }
}
