//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
};

use crate::services::HourFormat;

pub mod canyon_watchface;
pub mod clock_text;
pub mod layer;
pub mod resources;
pub mod transition;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use canyon_watchface::CanyonWatchface;
pub use window::{Window, WindowEvent};

/// Color mode of the display
pub type ColorMode = Rgb565;

/// Watchface background
pub const COLOR_BACKGROUND: ColorMode = ColorMode::BLACK;
/// Text color, Pebble-style orange (#FF5500)
pub const COLOR_FOREGROUND: ColorMode = ColorMode::new(31, 21, 0);

pub trait WatchFace: Sized {
    /// Build all elements inside the window bounds
    fn load(bounds: Rectangle) -> Result<Self, window::Error>;

    /// Update watchface with state
    fn update(&mut self, state: &WatchFaceState) -> Result<(), window::Error>;

    /// Show the Bluetooth connection status
    fn set_connected(&mut self, connected: bool) -> Result<(), window::Error>;

    /// Draw all elements
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;

    /// Release all elements, in dependency order
    fn unload(self) -> layer::ReleaseLog;
}

/// State for the watch face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchFaceState {
    pub time: NaiveDateTime,
    pub hour_format: HourFormat,
    pub connected: bool,
}
