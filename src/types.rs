use crate::Error;
use crate::consts::{MAX_MONTH, MONTH_NAMES, WEEKDAY_NAMES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A month of the Jalaali year (Farvardin = 1, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Month {
    Farvardin = 1,
    Ordibehesht,
    Khordad,
    Tir,
    Mordad,
    Shahrivar,
    Mehr,
    Aban,
    Azar,
    Dey,
    Bahman,
    Esfand,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Self; 12] = [
        Self::Farvardin,
        Self::Ordibehesht,
        Self::Khordad,
        Self::Tir,
        Self::Mordad,
        Self::Shahrivar,
        Self::Mehr,
        Self::Aban,
        Self::Azar,
        Self::Dey,
        Self::Bahman,
        Self::Esfand,
    ];

    /// Creates a Month from its 1-based number
    ///
    /// # Errors
    /// Returns `Error::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, Error> {
        if value == 0 || value > MAX_MONTH {
            return Err(Error::InvalidMonth(i32::from(value)));
        }
        Ok(Self::ALL[usize::from(value - 1)])
    }

    /// Returns the 1-based month number
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the Persian name of the month
    #[inline]
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self as usize - 1]
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Month {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Error::InvalidMonth(value))
            .and_then(Self::new)
    }
}

impl TryFrom<i64> for Month {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Error::InvalidMonth(i32::try_from(value).unwrap_or(i32::MAX)))
            .and_then(Self::new)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl From<Month> for i32 {
    fn from(month: Month) -> Self {
        Self::from(month.number())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A day of the Jalaali week (Shanbe = 0, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    Shanbe = 0,
    Yekshanbe,
    Doshanbe,
    Seshanbe,
    Chaharshanbe,
    Panjshanbe,
    Jome,
}

impl Weekday {
    /// All weekdays, Shanbe first
    pub const ALL: [Self; 7] = [
        Self::Shanbe,
        Self::Yekshanbe,
        Self::Doshanbe,
        Self::Seshanbe,
        Self::Chaharshanbe,
        Self::Panjshanbe,
        Self::Jome,
    ];

    /// Maps a Sunday-based weekday number (Sunday = 0) onto the Jalaali week.
    pub const fn from_sunday_based(days_from_sunday: u32) -> Self {
        Self::ALL[((days_from_sunday % 7 + 1) % 7) as usize]
    }

    /// Returns the 0-based position in the Jalaali week
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the Persian name of the weekday
    #[inline]
    pub const fn name(self) -> &'static str {
        WEEKDAY_NAMES[self as usize]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::from_sunday_based(weekday.num_days_from_sunday())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
