//! Time keeping for PineTime
//!
//! Wall-clock time is derived from a reference point (a known UTC time and
//! the uptime instant it was taken at) plus the uptime elapsed since then.

use core::cell::Cell;

use chrono::{DateTime, Duration, NaiveDateTime};
use embassy_sync::blocking_mutex::{raw::ThreadModeRawMutex, Mutex};
use embassy_time::Instant;

use canyon_watchface::services::{Clock, HourFormat};

use super::config::{HOUR_FORMAT, TIMEZONE_OFFSET_SECS};

/// Reference shared by every reader of the clock
static REFERENCE: Mutex<ThreadModeRawMutex, Cell<TimeReference>> =
    Mutex::new(Cell::new(TimeReference::UNIX_EPOCH));

#[derive(Clone, Copy, Debug)]
pub struct TimeReference {
    /// UTC time
    time: NaiveDateTime,
    /// Uptime at `time`
    instant: Instant,
}

impl TimeReference {
    const UNIX_EPOCH: Self = Self {
        time: NaiveDateTime::UNIX_EPOCH,
        instant: Instant::from_ticks(0),
    };

    /// Reference for `secs` seconds after the Unix epoch, taken now
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        let time = DateTime::from_timestamp(secs, 0)?.naive_utc();
        Some(Self {
            time,
            instant: Instant::now(),
        })
    }

    /// UTC time at uptime `now`
    pub fn at(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now.saturating_duration_since(self.instant).as_micros();
        self.time + Duration::microseconds(elapsed as i64)
    }
}

pub struct TimeManager;

impl TimeManager {
    /// Set the clock from the UTC epoch seconds known at boot
    pub fn init(utc_epoch: i64) {
        match TimeReference::from_timestamp(utc_epoch) {
            Some(reference) => Self::set_time(reference),
            None => defmt::warn!("Invalid boot epoch {}, clock starts at 1970", utc_epoch),
        }
    }

    /// Current UTC time
    pub fn get_time() -> NaiveDateTime {
        REFERENCE.lock(|reference| reference.get()).at(Instant::now())
    }

    /// Update time reference
    pub fn set_time(reference: TimeReference) {
        REFERENCE.lock(|cell| cell.set(reference));
    }
}

/// Local time as seen by the watchface
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        TimeManager::get_time() + Duration::seconds(TIMEZONE_OFFSET_SECS)
    }

    fn hour_format(&self) -> HourFormat {
        HOUR_FORMAT
    }
}
