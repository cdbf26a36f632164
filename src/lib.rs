mod calendar;
mod clock;
mod consts;
mod convert;
mod format;
mod jdn;
mod prelude;
mod types;

pub use calendar::{is_leap_year, is_valid_date, month_length};
pub use clock::{CivilTime, Jalaali};
pub use consts::*;
pub use convert::{to_gregorian, to_jalaali};
pub use format::{append_format, format};
pub use types::{Month, Weekday};

use crate::prelude::*;
use chrono::NaiveDate;
use std::str::FromStr;

/// Result type for calendar operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Year outside the break table.
    #[error("jalaali: {0} is invalid year")]
    InvalidYear(i32),

    /// Month number outside 1-12.
    #[error("jalaali: {0} is invalid month (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(i32),

    /// Day that does not exist in its month.
    #[error("jalaali: invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },

    /// Wall-clock time that does not name a single instant in its zone.
    #[error("jalaali: invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// Text that is not a `YYYY-MM-DD` or `YYYY/MM/DD` date.
    #[error("jalaali: invalid date format: {0}")]
    InvalidFormat(String),

    /// Blank input to the date parser.
    #[error("jalaali: empty date string")]
    EmptyInput,
}

/// A formatting failure, with the text produced before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("jalaali: formatting stopped after {} bytes: {source}", .partial.len())]
pub struct FormatError {
    /// Output emitted before the failing token
    pub partial: String,
    #[source]
    pub source: Error,
}

/// A date of the Jalaali calendar.
///
/// Dates built with [`JalaaliDate::new`] or parsed from text are always valid.
/// Conversion from Gregorian can also yield the last winter days of year -62,
/// which lie before the break table.
///
/// Ordered chronologically. Displays as `YYYY-MM-DD` with ASCII digits; use
/// [`format()`] for Persian-script output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, "month.number()", day)]
pub struct JalaaliDate {
    year: i32,
    month: Month,
    day: u8,
}

/// A date of the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl GregorianDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Converts to a chrono date; `None` if chrono cannot represent it.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for GregorianDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

impl JalaaliDate {
    /// Creates a validated Jalaali date
    ///
    /// # Errors
    /// Returns `Error::InvalidMonth`, `Error::InvalidYear` or `Error::InvalidDay`
    /// for a date that does not exist.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        let month_typed = Month::new(month)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear(year));
        }
        if !is_valid_date(year, i32::from(month), i32::from(day)) {
            return Err(Error::InvalidDay { year, month, day });
        }
        Ok(Self::from_parts(year, month_typed, day))
    }

    /// Components already known to form a valid date
    pub(crate) const fn from_parts(year: i32, month: Month, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Converts a Gregorian date
    ///
    /// # Errors
    /// Returns `Error::InvalidYear` if the date is outside the supported years.
    pub fn from_gregorian(gy: i32, gm: i32, gd: i32) -> Result<Self> {
        to_jalaali(gy, gm, gd)
    }

    /// Converts a chrono date
    ///
    /// # Errors
    /// Returns `Error::InvalidYear` if the date is outside the supported years.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self> {
        let greg = GregorianDate::from(date);
        to_jalaali(greg.year, greg.month.cast_signed(), greg.day.cast_signed())
    }

    /// Converts to the Gregorian calendar
    ///
    /// # Errors
    /// Returns `Error::InvalidYear` for a year -62 date obtained by conversion.
    pub fn to_gregorian(&self) -> Result<GregorianDate> {
        to_gregorian(self.year, i32::from(self.month), i32::from(self.day))
    }

    /// Returns the year
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the day of month
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns true if this date's year has a 30-day Esfand
    pub fn is_leap_year(&self) -> bool {
        matches!(is_leap_year(self.year), Ok(true))
    }

    /// Number of days in this date's month
    pub fn month_length(&self) -> u8 {
        match self.month.number() {
            m if m <= LAST_LONG_MONTH => LONG_MONTH_DAYS,
            m if m < MAX_MONTH => SHORT_MONTH_DAYS,
            _ if self.is_leap_year() => SHORT_MONTH_DAYS,
            _ => ESFAND_DAYS_COMMON,
        }
    }

    /// Day of the Jalaali week
    ///
    /// # Errors
    /// Returns `Error::InvalidYear` if the year is unsupported.
    pub fn weekday(&self) -> Result<Weekday> {
        let jdn = convert::j2d(self.year, i32::from(self.month), i32::from(self.day))?;
        // JDN 0 fell on a Monday, two days after Shanbe.
        Ok(Weekday::ALL[(jdn + 2).rem_euclid(7) as usize])
    }

    /// Returns `(year, month, day)` as plain integers
    pub const fn to_columns(&self) -> (i32, u8, u8) {
        (self.year, self.month.number(), self.day)
    }
}

impl TryFrom<NaiveDate> for JalaaliDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::from_naive_date(date)
    }
}

impl TryFrom<(i32, u8, u8)> for JalaaliDate {
    type Error = Error;

    fn try_from(value: (i32, u8, u8)) -> Result<Self> {
        Self::new(value.0, value.1, value.2)
    }
}

impl FromStr for JalaaliDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        // A leading sign belongs to the year, not to a separator.
        let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let has_dash = body.contains(DATE_SEPARATOR);
        let has_slash = body.contains(ALT_DATE_SEPARATOR);
        let separator = match (has_dash, has_slash) {
            (true, false) => DATE_SEPARATOR,
            (false, true) => ALT_DATE_SEPARATOR,
            (true, true) => {
                return Err(Error::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {ALT_DATE_SEPARATOR})"
                )));
            }
            (false, false) => return Err(Error::InvalidFormat(trimmed.to_owned())),
        };

        let parts: Vec<&str> = body.split(separator).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(Error::InvalidFormat(format!(
                "Expected 3 components separated by {separator}, found {}",
                parts.len()
            )));
        };

        let invalid = |part: &str| Error::InvalidFormat(part.to_owned());
        let year: i32 = year.parse().map_err(|_| invalid(year))?;
        let month: u8 = month.parse().map_err(|_| invalid(month))?;
        let day: u8 = day.parse().map_err(|_| invalid(day))?;

        Self::new(if negative { -year } else { year }, month, day)
    }
}

impl serde::Serialize for JalaaliDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaaliDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let date = JalaaliDate::new(1395, 12, 30).unwrap();
        assert_eq!(date.year(), 1395);
        assert_eq!(date.month(), Month::Esfand);
        assert_eq!(date.day(), 30);
        assert_eq!(date.to_columns(), (1395, 12, 30));
    }

    #[test]
    fn test_new_invalid() {
        assert!(matches!(JalaaliDate::new(1393, 13, 1), Err(Error::InvalidMonth(13))));
        assert!(matches!(JalaaliDate::new(1393, 0, 1), Err(Error::InvalidMonth(0))));
        assert!(matches!(JalaaliDate::new(3178, 1, 1), Err(Error::InvalidYear(3178))));
        assert!(matches!(JalaaliDate::new(-62, 12, 29), Err(Error::InvalidYear(-62))));
        assert!(matches!(
            JalaaliDate::new(1393, 12, 30),
            Err(Error::InvalidDay {
                year: 1393,
                month: 12,
                day: 30
            })
        ));
        assert!(matches!(JalaaliDate::new(1393, 7, 31), Err(Error::InvalidDay { .. })));
        assert!(matches!(JalaaliDate::new(1393, 1, 0), Err(Error::InvalidDay { .. })));
    }

    #[test]
    fn test_gregorian_round_trip() {
        let date = JalaaliDate::new(1360, 5, 26).unwrap();
        let greg = date.to_gregorian().unwrap();
        assert_eq!(greg, GregorianDate::new(1981, 8, 17));
        assert_eq!(
            JalaaliDate::from_gregorian(greg.year, 8, 17).unwrap(),
            date
        );
    }

    #[test]
    fn test_naive_date_conversion() {
        let naive = NaiveDate::from_ymd_opt(2013, 1, 10).unwrap();
        let date = JalaaliDate::try_from(naive).unwrap();
        assert_eq!(date, JalaaliDate::new(1391, 10, 21).unwrap());
        assert_eq!(date.to_gregorian().unwrap().to_naive_date(), Some(naive));
    }

    #[test]
    fn test_leap_and_month_length() {
        let leap = JalaaliDate::new(1395, 12, 1).unwrap();
        assert!(leap.is_leap_year());
        assert_eq!(leap.month_length(), 30);

        let common = JalaaliDate::new(1393, 12, 1).unwrap();
        assert!(!common.is_leap_year());
        assert_eq!(common.month_length(), 29);

        assert_eq!(JalaaliDate::new(1393, 6, 1).unwrap().month_length(), 31);
        assert_eq!(JalaaliDate::new(1393, 7, 1).unwrap().month_length(), 30);
    }

    #[test]
    fn test_weekday() {
        // 1 January 2001 was a Monday.
        let date = JalaaliDate::new(1379, 10, 12).unwrap();
        assert_eq!(date.weekday().unwrap(), Weekday::Doshanbe);
        // 20 March 2024 was a Wednesday.
        let date = JalaaliDate::new(1403, 1, 1).unwrap();
        assert_eq!(date.weekday().unwrap(), Weekday::Chaharshanbe);
    }

    #[test]
    fn test_display() {
        assert_eq!(JalaaliDate::new(1393, 5, 13).unwrap().to_string(), "1393-05-13");
        assert_eq!(JalaaliDate::new(9, 1, 1).unwrap().to_string(), "0009-01-01");
        assert_eq!(GregorianDate::new(2014, 8, 4).to_string(), "2014-08-04");
    }

    #[test]
    fn test_parse() {
        let expected = JalaaliDate::new(1393, 5, 13).unwrap();
        assert_eq!("1393-05-13".parse::<JalaaliDate>().unwrap(), expected);
        assert_eq!("1393/5/13".parse::<JalaaliDate>().unwrap(), expected);
        assert_eq!(" 1393 / 05 / 13 ".parse::<JalaaliDate>().unwrap(), expected);
        assert_eq!(
            "-61-01-01".parse::<JalaaliDate>().unwrap(),
            JalaaliDate::new(-61, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<JalaaliDate>(), Err(Error::EmptyInput)));
        assert!(matches!("1393".parse::<JalaaliDate>(), Err(Error::InvalidFormat(_))));
        assert!(matches!("1393-05/13".parse::<JalaaliDate>(), Err(Error::InvalidFormat(_))));
        assert!(matches!("1393-05".parse::<JalaaliDate>(), Err(Error::InvalidFormat(_))));
        assert!(matches!("1393-XX-13".parse::<JalaaliDate>(), Err(Error::InvalidFormat(_))));
        assert!(matches!("1393-12-30".parse::<JalaaliDate>(), Err(Error::InvalidDay { .. })));
    }

    #[test]
    fn test_display_parse_round_trip_negative_year() {
        let date = JalaaliDate::new(-21, 3, 11).unwrap();
        let text = date.to_string();
        assert_eq!(text, "-021-03-11");
        assert_eq!(text.parse::<JalaaliDate>().unwrap(), date);
    }

    #[test]
    fn test_ordering() {
        let a = JalaaliDate::new(1393, 12, 29).unwrap();
        let b = JalaaliDate::new(1394, 1, 1).unwrap();
        let c = JalaaliDate::new(1394, 1, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_serde() {
        let date = JalaaliDate::new(1395, 12, 30).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1395-12-30""#);
        let parsed: JalaaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: std::result::Result<JalaaliDate, _> = serde_json::from_str(r#""1394-12-30""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::InvalidYear(3178).to_string(), "jalaali: 3178 is invalid year");
        assert_eq!(
            Error::InvalidMonth(13).to_string(),
            "jalaali: 13 is invalid month (must be 1-12)"
        );
        let err = FormatError {
            partial: "ab".to_owned(),
            source: Error::InvalidYear(3179),
        };
        assert_eq!(
            err.to_string(),
            "jalaali: formatting stopped after 2 bytes: jalaali: 3179 is invalid year"
        );
    }
}
