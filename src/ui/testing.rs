//! Test doubles: simulator display helpers and host services

use core::cell::Cell;

use chrono::NaiveDateTime;
use embedded_graphics::{
    geometry::Size,
    pixelcolor::RgbColor,
    primitives::{PointsIter, Rectangle},
};
use embedded_graphics_simulator::SimulatorDisplay;

use super::ColorMode;
use crate::services::{Clock, ConnectionService, HourFormat};

/// Fill color of a fresh display, never used by the watchface
pub(crate) const UNTOUCHED: ColorMode = ColorMode::MAGENTA;

/// Simulator display filled with [`UNTOUCHED`]
pub(crate) fn blank_display(size: Size) -> SimulatorDisplay<ColorMode> {
    SimulatorDisplay::with_default_color(size, UNTOUCHED)
}

/// Pixels of `color` inside `area`
pub(crate) fn count(
    display: &SimulatorDisplay<ColorMode>,
    area: &Rectangle,
    color: ColorMode,
) -> usize {
    area.points()
        .filter(|&p| display.get_pixel(p) == color)
        .count()
}

/// Drawn pixels inside `area`
pub(crate) fn touched_in(display: &SimulatorDisplay<ColorMode>, area: &Rectangle) -> usize {
    area.points().count() - count(display, area, UNTOUCHED)
}

/// Clock that counts how often it was read
pub(crate) struct CountingClock {
    time: Cell<NaiveDateTime>,
    hour_format: HourFormat,
    reads: Cell<usize>,
}

impl CountingClock {
    pub fn new(time: NaiveDateTime, hour_format: HourFormat) -> Self {
        Self {
            time: Cell::new(time),
            hour_format,
            reads: Cell::new(0),
        }
    }

    pub fn set(&self, time: NaiveDateTime) {
        self.time.set(time);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Clock for CountingClock {
    fn now(&self) -> NaiveDateTime {
        self.reads.set(self.reads.get() + 1);
        self.time.get()
    }

    fn hour_format(&self) -> HourFormat {
        self.hour_format
    }
}

pub(crate) struct FixedConnection(pub bool);

impl ConnectionService for FixedConnection {
    fn is_connected(&self) -> bool {
        self.0
    }
}
