//! Canyon watchface
//!
//! Hardware independent part of the firmware: the window and layer model,
//! the watchface itself and the seams to the clock and Bluetooth services.
//! The device binary in `main.rs` binds these to the PineTime peripherals.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod services;
pub mod ui;
