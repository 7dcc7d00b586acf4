//! Formatting of the displayed time and date strings

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use core::fmt;
use heapless::String;

use super::layer::TEXT_CAPACITY;
use crate::services::HourFormat;

/// Strings shown by the watchface for one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceText {
    /// `HH:`
    pub hour: String<TEXT_CAPACITY>,
    /// `MM`
    pub minute: String<TEXT_CAPACITY>,
    /// `Wkd      /MM`
    pub date: String<TEXT_CAPACITY>,
    /// `DD`
    pub day: String<TEXT_CAPACITY>,
}

impl FaceText {
    pub fn new(time: &NaiveDateTime, hour_format: HourFormat) -> Result<Self, Error> {
        let hour = match hour_format {
            HourFormat::H24 => time.hour(),
            HourFormat::H12 => time.hour12().1,
        };

        Ok(Self {
            hour: show(format_args!("{:02}:", hour))?,
            minute: show(format_args!("{:02}", time.minute()))?,
            date: show(format_args!(
                "{}      /{:02}",
                weekday_abbreviation(time.weekday()),
                time.month()
            ))?,
            day: show(format_args!("{:02}", time.day()))?,
        })
    }
}

/// English three letter weekday name
pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn show(args: fmt::Arguments) -> Result<String<TEXT_CAPACITY>, Error> {
    let mut buf = [0u8; TEXT_CAPACITY];
    let text = format_no_std::show(&mut buf, args).map_err(|_| Error::Format)?;

    let mut out = String::new();
    out.push_str(text).map_err(|_| Error::Format)?;
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text does not fit its buffer
    Format,
}
