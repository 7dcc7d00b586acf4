//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

use canyon_watchface::services::HourFormat;

/// Hour style of the time fields
pub const HOUR_FORMAT: HourFormat = HourFormat::H24;

/// Offset of local time from UTC
pub const TIMEZONE_OFFSET_SECS: i64 = 3_600;

/// Backlight level after boot (0–7)
pub const BACKLIGHT_LEVEL: u8 = 2;

/// Delay between frames of the push transition
pub const TRANSITION_FRAME_MS: u64 = 16;

/// Interrupt priority for peripherals used next to the SoftDevice
pub const APP_INTERRUPT_PRIORITY: Priority = Priority::P2;

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Config is `non_exhaustive`
        let mut config = Config::default();

        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // DC/DC regulator cuts runtime current consumption
        config.dcdc.reg1 = true;

        // Priorities 0, 1 and 4 are reserved for the SoftDevice
        config.gpiote_interrupt_priority = APP_INTERRUPT_PRIORITY;
        config.time_interrupt_priority = APP_INTERRUPT_PRIORITY;

        config.debug = Debug::Allowed;

        config
    }
}
