//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};

/// Highest brightness level
pub const MAX_LEVEL: u8 = 7;

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct Backlight {
    low: Output<'static, AnyPin>,
    mid: Output<'static, AnyPin>,
    high: Output<'static, AnyPin>,
}

impl Backlight {
    /// Take the backlight pins, starting switched off.
    pub fn init(
        low: Output<'static, AnyPin>,
        mid: Output<'static, AnyPin>,
        high: Output<'static, AnyPin>,
    ) -> Self {
        let mut backlight = Self { low, mid, high };
        backlight.drive(0);
        backlight
    }

    /// Set the brightness level between 0 (off) and 7 (max brightness).
    pub fn set(&mut self, level: u8) -> Result<(), Error> {
        if level > MAX_LEVEL {
            return Err(Error::OutOfBounds(level));
        }
        defmt::debug!("Setting backlight brightness to {}", level);
        self.drive(level);
        Ok(())
    }

    fn drive(&mut self, level: u8) {
        for (bit, pin) in [&mut self.low, &mut self.mid, &mut self.high]
            .into_iter()
            .enumerate()
        {
            // Active low
            if level & (1 << bit) != 0 {
                pin.set_low();
            } else {
                pin.set_high();
            }
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    OutOfBounds(u8),
}
