//! Contains logic for grabbing the screen. [GenericScreenCapturer] is the main artifact of this
//! module that abstracts the platform backend.

pub mod encode;
#[cfg(feature = "xcap")]
pub mod xcap_backend;

use anyhow::Result;
use image::RgbaImage;

/// Contract every screen backend must implement.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenCapturer: Send {
    /// Takes a snapshot of the whole primary screen.
    fn capture(&mut self) -> Result<RgbaImage>;
}

/// Serves as a cross-platform [ScreenCapturer] implementation.
pub struct GenericScreenCapturer {
    inner: Box<dyn ScreenCapturer>,
}

impl GenericScreenCapturer {
    pub fn new() -> Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "xcap")] {
                use self::xcap_backend::XcapScreenCapturer;
                Ok(Self {
                    inner: Box::new(XcapScreenCapturer::new()),
                })
            } else {
                Err(anyhow::anyhow!(
                    "No screen capture backend was compiled in. Rebuild with `--features xcap`"
                ))
            }
        }
    }
}

impl ScreenCapturer for GenericScreenCapturer {
    fn capture(&mut self) -> Result<RgbaImage> {
        self.inner.capture()
    }
}
