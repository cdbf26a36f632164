//! Civil timestamps and the chrono-backed `Jalaali` wrapper.

use crate::format::format;
use crate::prelude::*;
use crate::types::Weekday;
use crate::{Error, FormatError, JalaaliDate, Result};
use chrono::{DateTime, Datelike, Local, LocalResult, TimeZone, Timelike, Utc};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A wall-clock timestamp broken into civil (Gregorian) fields.
pub trait CivilTime {
    /// Gregorian year
    fn year(&self) -> i32;
    /// Gregorian month, 1-12
    fn month(&self) -> u32;
    /// Day of month, 1-31
    fn day(&self) -> u32;
    /// Hour of the day, 0-23
    fn hour(&self) -> u32;
    /// Minute of the hour, 0-59
    fn minute(&self) -> u32;
    /// Second of the minute, 0-59
    fn second(&self) -> u32;
    /// Nanoseconds within the second, below one billion
    fn nanosecond(&self) -> u32;
    /// Day of the Jalaali week
    fn weekday(&self) -> Weekday;
}

impl<T: Datelike + Timelike> CivilTime for T {
    fn year(&self) -> i32 {
        Datelike::year(self)
    }

    fn month(&self) -> u32 {
        Datelike::month(self)
    }

    fn day(&self) -> u32 {
        Datelike::day(self)
    }

    fn hour(&self) -> u32 {
        Timelike::hour(self)
    }

    fn minute(&self) -> u32 {
        Timelike::minute(self)
    }

    fn second(&self) -> u32 {
        Timelike::second(self)
    }

    // chrono encodes a leap second as an overflowing nanosecond count.
    fn nanosecond(&self) -> u32 {
        Timelike::nanosecond(self) % NANOS_PER_SECOND
    }

    fn weekday(&self) -> Weekday {
        Datelike::weekday(self).into()
    }
}

/// A point in time read through the Jalaali calendar.
///
/// Dereferences to the wrapped `DateTime`, so every chrono accessor stays
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Deref, From)]
pub struct Jalaali<Tz: TimeZone>(DateTime<Tz>);

impl Jalaali<Local> {
    /// The current local time
    pub fn now() -> Self {
        Self(Local::now())
    }
}

impl Jalaali<Utc> {
    /// The current time in UTC
    pub fn now_utc() -> Self {
        Self(Utc::now())
    }
}

impl<Tz: TimeZone> Jalaali<Tz> {
    /// Builds a timestamp from a Jalaali date and a wall-clock time in `tz`.
    ///
    /// # Errors
    /// Returns `Error::InvalidDay` if the date does not exist, `Error::InvalidYear`
    /// if the year is unsupported, and `Error::InvalidTime` if the wall-clock time
    /// is missing or ambiguous in `tz`.
    pub fn from_jalaali(
        date: JalaaliDate,
        hour: u32,
        minute: u32,
        second: u32,
        tz: &Tz,
    ) -> Result<Self> {
        let greg = date.to_gregorian()?;
        let invalid_time = || Error::InvalidTime {
            hour,
            minute,
            second,
        };
        let naive = greg
            .to_naive_date()
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or_else(invalid_time)?;
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(Self(dt)),
            LocalResult::Ambiguous(..) | LocalResult::None => Err(invalid_time()),
        }
    }

    /// Returns the wrapped `DateTime`
    pub const fn inner(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// Returns the Jalaali date of this timestamp
    ///
    /// # Errors
    /// Returns `Error::InvalidYear` if the date is outside the supported years.
    pub fn date(&self) -> Result<JalaaliDate> {
        let dt = &self.0;
        JalaaliDate::from_gregorian(
            Datelike::year(dt),
            Datelike::month(dt).cast_signed(),
            Datelike::day(dt).cast_signed(),
        )
    }

    /// Returns the day of the Jalaali week
    pub fn weekday(&self) -> Weekday {
        Datelike::weekday(&self.0).into()
    }

    /// Formats this timestamp with a reference-date layout.
    ///
    /// # Errors
    /// Returns a `FormatError` carrying the partial output if the date is
    /// outside the supported years.
    pub fn format(&self, layout: &str) -> Result<String, FormatError> {
        format(&self.0, layout)
    }
}
