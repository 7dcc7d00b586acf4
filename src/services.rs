//! Host services consumed by the watchface
//!
//! The window never reads hardware directly. The firmware implements these
//! traits on top of the RTC-backed time reference and the BLE stack.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Hour display style selected by the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 00–23
    H24,
    /// 01–12
    H12,
}

/// Source of local wall-clock time.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;

    /// Whether hours are shown in 12 or 24 hour style.
    fn hour_format(&self) -> HourFormat;
}

/// Bluetooth connection status.
pub trait ConnectionService {
    /// Return whether a phone is currently connected.
    fn is_connected(&self) -> bool;
}

/// Detects minute boundaries from successive clock readings.
#[derive(Default, Debug)]
pub struct MinuteTicker {
    last: Option<(i32, u32, u32, u32)>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Return `true` once for every change of the current minute.
    ///
    /// The first reading only primes the ticker.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let minute = (now.year(), now.ordinal(), now.hour(), now.minute());
        match self.last.replace(minute) {
            Some(previous) => previous != minute,
            None => false,
        }
    }
}
