//! Layout-driven formatting of civil timestamps as Jalaali text.
//!
//! Layouts use the reference-date mini-language (`2006-01-02 15:04:05`).
//! Recognized tokens are replaced with Persian-script values; anything else
//! is copied through unchanged.

use crate::clock::CivilTime;
use crate::consts::{MERIDIEM_AM, MERIDIEM_PM, PERSIAN_DIGITS};
use crate::convert::to_jalaali;
use crate::{FormatError, JalaaliDate, Result};

const MIN_BUF_SIZE: usize = 64;

/// Widest fractional second that carries information
const MAX_FRAC_DIGITS: usize = 9;

/// A recognized layout token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Std {
    LongMonth,   // "January"
    Month,       // "Jan"
    NumMonth,    // "1"
    ZeroMonth,   // "01"
    LongWeekDay, // "Monday"
    WeekDay,     // "Mon"
    Day,         // "2"
    UnderDay,    // "_2"
    ZeroDay,     // "02"
    Hour,        // "15"
    Hour12,      // "3"
    ZeroHour12,  // "03"
    Minute,      // "4"
    ZeroMinute,  // "04"
    Second,      // "5"
    ZeroSecond,  // "05"
    LongYear,    // "2006"
    Year,        // "06"
    UpperPm,     // "PM"
    LowerPm,     // "pm"
    /// ".000" or ".999"; the 9 form drops trailing zeros
    FracSecond { digits: usize, trim: bool },
}

impl Std {
    /// Tokens that need the Jalaali year, month and day.
    const fn needs_date(self) -> bool {
        matches!(
            self,
            Self::LongMonth
                | Self::Month
                | Self::NumMonth
                | Self::ZeroMonth
                | Self::LongWeekDay
                | Self::WeekDay
                | Self::Day
                | Self::UnderDay
                | Self::ZeroDay
                | Self::LongYear
                | Self::Year
        )
    }
}

/// Tokens for "01" through "06", keyed by the second digit.
const STD_0X: [Std; 6] = [
    Std::ZeroMonth,
    Std::ZeroDay,
    Std::ZeroHour12,
    Std::ZeroMinute,
    Std::ZeroSecond,
    Std::Year,
];

/// Formats `t` according to `layout`.
///
/// # Errors
/// Returns a `FormatError` holding the text emitted so far if a date token
/// is reached and the date lies outside the supported Jalaali years.
pub fn format<T: CivilTime + ?Sized>(t: &T, layout: &str) -> Result<String, FormatError> {
    let mut buf = String::with_capacity(layout.len().max(MIN_BUF_SIZE));
    match append_format(&mut buf, t, layout) {
        Ok(()) => Ok(buf),
        Err(source) => Err(FormatError {
            partial: buf,
            source,
        }),
    }
}

/// Like [`format`] but appends to `buf`.
///
/// On error `buf` keeps everything emitted before the failing token.
///
/// # Errors
/// Returns `Error::InvalidYear` if the date lies outside the supported
/// Jalaali years and the layout asks for a date field.
pub fn append_format<T: CivilTime + ?Sized>(buf: &mut String, t: &T, layout: &str) -> Result<()> {
    let mut fields = Fields { t, date: None };
    let mut layout = layout;

    while !layout.is_empty() {
        let (prefix, std, suffix) = next_std_chunk(layout);
        buf.push_str(prefix);
        let Some(std) = std else {
            break;
        };
        layout = suffix;

        if std.needs_date() {
            fields.date()?;
        }

        match std {
            Std::Year => append_int(buf, i64::from(fields.date()?.year()).abs() % 100, 2),
            Std::LongYear => append_int(buf, i64::from(fields.date()?.year()), 4),
            Std::Month | Std::LongMonth => buf.push_str(fields.date()?.month().name()),
            Std::NumMonth => append_int(buf, i64::from(fields.date()?.month().number()), 0),
            Std::ZeroMonth => append_int(buf, i64::from(fields.date()?.month().number()), 2),
            Std::WeekDay | Std::LongWeekDay => buf.push_str(t.weekday().name()),
            Std::Day => append_int(buf, i64::from(fields.date()?.day()), 0),
            Std::UnderDay => {
                let day = fields.date()?.day();
                if day < 10 {
                    buf.push(' ');
                }
                append_int(buf, i64::from(day), 0);
            }
            Std::ZeroDay => append_int(buf, i64::from(fields.date()?.day()), 2),
            Std::Hour => append_int(buf, i64::from(t.hour()), 2),
            Std::Hour12 => append_int(buf, hour12(t.hour()), 0),
            Std::ZeroHour12 => append_int(buf, hour12(t.hour()), 2),
            Std::Minute => append_int(buf, i64::from(t.minute()), 0),
            Std::ZeroMinute => append_int(buf, i64::from(t.minute()), 2),
            Std::Second => append_int(buf, i64::from(t.second()), 0),
            Std::ZeroSecond => append_int(buf, i64::from(t.second()), 2),
            Std::UpperPm | Std::LowerPm => {
                buf.push_str(if t.hour() >= 12 { MERIDIEM_PM } else { MERIDIEM_AM });
            }
            Std::FracSecond { digits, trim } => format_nano(buf, t.nanosecond(), digits, trim),
        }
    }
    Ok(())
}

/// Date fields of the timestamp, converted at most once per format call.
struct Fields<'a, T: ?Sized> {
    t: &'a T,
    date: Option<JalaaliDate>,
}

impl<T: CivilTime + ?Sized> Fields<'_, T> {
    fn date(&mut self) -> Result<JalaaliDate> {
        if let Some(date) = self.date {
            return Ok(date);
        }
        let (gy, gm, gd) = (self.t.year(), self.t.month(), self.t.day());
        log::trace!("resolving jalaali date for {gy}-{gm}-{gd}");
        let date = to_jalaali(gy, gm.cast_signed(), gd.cast_signed())?;
        self.date = Some(date);
        Ok(date)
    }
}

/// Noon is 12PM, midnight is 12AM.
fn hour12(hour: u32) -> i64 {
    match hour % 12 {
        0 => 12,
        hr => i64::from(hr),
    }
}

/// Finds the first token in `layout` and returns the text before it, the
/// token, and the text after it. Returns `(layout, None, "")` if there is no
/// token.
fn next_std_chunk(layout: &str) -> (&str, Option<Std>, &str) {
    let bytes = layout.as_bytes();
    for i in 0..bytes.len() {
        let rest = &bytes[i..];
        match bytes[i] {
            // January, Jan
            b'J' if rest.starts_with(b"Jan") => {
                if rest.starts_with(b"January") {
                    return (&layout[..i], Some(Std::LongMonth), &layout[i + 7..]);
                }
                if !starts_with_lower_case(&rest[3..]) {
                    return (&layout[..i], Some(Std::Month), &layout[i + 3..]);
                }
            }
            // Monday, Mon
            b'M' if rest.starts_with(b"Mon") => {
                if rest.starts_with(b"Monday") {
                    return (&layout[..i], Some(Std::LongWeekDay), &layout[i + 6..]);
                }
                if !starts_with_lower_case(&rest[3..]) {
                    return (&layout[..i], Some(Std::WeekDay), &layout[i + 3..]);
                }
            }
            // 01, 02, 03, 04, 05, 06
            b'0' => {
                if let Some(&c @ b'1'..=b'6') = rest.get(1) {
                    let std = STD_0X[usize::from(c - b'1')];
                    return (&layout[..i], Some(std), &layout[i + 2..]);
                }
            }
            // 15, 1
            b'1' => {
                if rest.get(1) == Some(&b'5') {
                    return (&layout[..i], Some(Std::Hour), &layout[i + 2..]);
                }
                return (&layout[..i], Some(Std::NumMonth), &layout[i + 1..]);
            }
            // 2006, 2
            b'2' => {
                if rest.starts_with(b"2006") {
                    return (&layout[..i], Some(Std::LongYear), &layout[i + 4..]);
                }
                return (&layout[..i], Some(Std::Day), &layout[i + 1..]);
            }
            // _2, _2006
            b'_' if rest.get(1) == Some(&b'2') => {
                // "_2006" is a literal underscore followed by the long year.
                if rest[1..].starts_with(b"2006") {
                    return (&layout[..=i], Some(Std::LongYear), &layout[i + 5..]);
                }
                return (&layout[..i], Some(Std::UnderDay), &layout[i + 2..]);
            }
            b'3' => return (&layout[..i], Some(Std::Hour12), &layout[i + 1..]),
            b'4' => return (&layout[..i], Some(Std::Minute), &layout[i + 1..]),
            b'5' => return (&layout[..i], Some(Std::Second), &layout[i + 1..]),
            b'P' if rest.get(1) == Some(&b'M') => {
                return (&layout[..i], Some(Std::UpperPm), &layout[i + 2..]);
            }
            b'p' if rest.get(1) == Some(&b'm') => {
                return (&layout[..i], Some(Std::LowerPm), &layout[i + 2..]);
            }
            // .000 or .999, repeated digits for fractional seconds
            b'.' => {
                if let Some(&ch @ (b'0' | b'9')) = rest.get(1) {
                    let run = rest[1..].iter().take_while(|&&c| c == ch).count();
                    let end = i + 1 + run;
                    // The digit run must end here.
                    if !bytes.get(end).is_some_and(u8::is_ascii_digit) {
                        let std = Std::FracSecond {
                            digits: run,
                            trim: ch == b'9',
                        };
                        return (&layout[..i], Some(std), &layout[end..]);
                    }
                }
            }
            _ => {}
        }
    }
    (layout, None, "")
}

/// Reports whether `rest` begins with a lower-case ASCII letter.
///
/// Keeps "Month" from matching "Mon".
fn starts_with_lower_case(rest: &[u8]) -> bool {
    rest.first().is_some_and(u8::is_ascii_lowercase)
}

/// Appends `x` in Persian digits, zero-padded to `width` digits after any sign.
fn append_int(buf: &mut String, x: i64, width: usize) {
    if x < 0 {
        buf.push('-');
    }

    // Assemble decimal in reverse order.
    let mut digits = [0_u8; 20];
    let mut start = digits.len();
    let mut u = x.unsigned_abs();
    loop {
        start -= 1;
        digits[start] = (u % 10) as u8;
        u /= 10;
        if u == 0 {
            break;
        }
    }

    for _ in digits.len() - start..width {
        buf.push(PERSIAN_DIGITS[0]);
    }
    buf.extend(digits[start..].iter().map(|&d| PERSIAN_DIGITS[usize::from(d)]));
}

/// Appends a fractional second of `n` digits, dropping trailing zeros if
/// `trim` is set. Nothing is written when trimming leaves no digits.
fn format_nano(buf: &mut String, nanosec: u32, n: usize, trim: bool) {
    let mut digits = [0_u8; MAX_FRAC_DIGITS];
    let mut u = nanosec;
    for slot in digits.iter_mut().rev() {
        *slot = (u % 10) as u8;
        u /= 10;
    }

    let mut n = n.min(MAX_FRAC_DIGITS);
    if trim {
        while n > 0 && digits[n - 1] == 0 {
            n -= 1;
        }
        if n == 0 {
            return;
        }
    }
    buf.push('.');
    buf.extend(digits[..n].iter().map(|&d| PERSIAN_DIGITS[usize::from(d)]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};

    fn tehran(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32, nano: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, mi, s)
            .unwrap()
            .with_nanosecond(nano)
            .unwrap()
    }

    fn naive(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn reference() -> DateTime<FixedOffset> {
        tehran(2001, 1, 1, 1, 1, 1, 1)
    }

    #[test]
    fn test_years() {
        assert_eq!(format(&reference(), "2006 06").unwrap(), "۱۳۷۹ ۷۹");
    }

    #[test]
    fn test_months() {
        assert_eq!(format(&reference(), "January Jan 1 01").unwrap(), "دی دی ۱۰ ۱۰");
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(format(&reference(), "Monday Mon").unwrap(), "دوشنبه دوشنبه");
    }

    #[test]
    fn test_days() {
        let t = reference();
        assert_eq!(format(&t, "2 _2 02").unwrap(), "۱۲ ۱۲ ۱۲");

        // 25 January 2001 is 6 Bahman 1379.
        let t = tehran(2001, 1, 25, 1, 1, 1, 0);
        assert_eq!(format(&t, "2|_2|02").unwrap(), "۶| ۶|۰۶");
    }

    #[test]
    fn test_clock() {
        let t = reference();
        assert_eq!(
            format(&t, "15 3 03 4 04 5 05").unwrap(),
            "۰۱ ۱ ۰۱ ۱ ۰۱ ۱ ۰۱"
        );
    }

    #[test]
    fn test_twelve_hour_clock() {
        let midnight = tehran(2001, 1, 1, 0, 0, 0, 0);
        assert_eq!(format(&midnight, "3 PM").unwrap(), "۱۲ قبل‌ازظهر");

        let noon = tehran(2001, 1, 1, 12, 0, 0, 0);
        assert_eq!(format(&noon, "03 pm").unwrap(), "۱۲ بعدازظهر");

        let evening = tehran(2001, 1, 1, 23, 0, 0, 0);
        assert_eq!(format(&evening, "15 3 PM").unwrap(), "۲۳ ۱۱ بعدازظهر");
    }

    #[test]
    fn test_fractional_seconds_trimmed() {
        let t = tehran(2001, 1, 1, 1, 1, 1, 999_999_999);
        assert_eq!(format(&t, ".9 .99 .999").unwrap(), ".۹ .۹۹ .۹۹۹");

        let t = reference();
        assert_eq!(format(&t, ".9 .99 .999").unwrap(), "  ");
        assert_eq!(format(&t, ".999999999").unwrap(), ".۰۰۰۰۰۰۰۰۱");

        let t = tehran(2001, 1, 1, 1, 1, 1, 120_000_000);
        assert_eq!(format(&t, "05.999").unwrap(), "۰۱.۱۲");
    }

    #[test]
    fn test_fractional_seconds_padded() {
        let t = reference();
        assert_eq!(format(&t, ".0 .00 .000").unwrap(), ".۰ .۰۰ .۰۰۰");

        let t = tehran(2001, 1, 1, 1, 1, 1, 5_000_000);
        assert_eq!(format(&t, ".000").unwrap(), ".۰۰۵");
        assert_eq!(format(&t, ".000000000000").unwrap(), ".۰۰۵۰۰۰۰۰۰");
    }

    #[test]
    fn test_literals_pass_through() {
        let t = reference();
        assert_eq!(format(&t, "Month").unwrap(), "Month");
        assert_eq!(format(&t, "Janet").unwrap(), "Janet");
        assert_eq!(format(&t, "Jan.").unwrap(), "دی.");
        assert_eq!(format(&t, "روز: 2").unwrap(), "روز: ۱۲");
        assert_eq!(format(&t, "").unwrap(), "");
        assert_eq!(format(&t, "Mo").unwrap(), "Mo");
    }

    #[test]
    fn test_underscore_long_year() {
        let t = reference();
        assert_eq!(format(&t, "_2006").unwrap(), "_۱۳۷۹");
        assert_eq!(format(&t, "x_y").unwrap(), "x_y");
    }

    #[test]
    fn test_full_layout() {
        let t = tehran(2014, 8, 4, 17, 30, 5, 0);
        assert_eq!(
            format(&t, "Monday 02 January 2006 15:04:05").unwrap(),
            "دوشنبه ۱۳ مرداد ۱۳۹۳ ۱۷:۳۰:۰۵"
        );
    }

    #[test]
    fn test_negative_year() {
        // 1 June 600 is 11 Khordad -21.
        let t = naive(600, 6, 1, 10);
        assert_eq!(format(&t, "2006/01/02").unwrap(), "-۰۰۲۱/۰۳/۱۱");
        assert_eq!(format(&t, "06").unwrap(), "۲۱");
    }

    #[test]
    fn test_winter_before_first_supported_year() {
        // 1 January 560 is 11 Dey -62, ahead of the break table.
        let t = naive(560, 1, 1, 0);
        assert_eq!(format(&t, "2006-01-02").unwrap(), "-۰۰۶۲-۱۰-۱۱");
        assert_eq!(format(&t, "2 January").unwrap(), "۱۱ دی");

        let err = format(&naive(559, 12, 31, 0), "2006").unwrap_err();
        assert_eq!(err.partial, "");
        assert!(matches!(err.source, Error::InvalidYear(-62)));
    }

    #[test]
    fn test_invalid_year_keeps_partial_output() {
        let t = naive(3800, 6, 1, 1);
        let err = format(&t, "at 15:04 on 2006").unwrap_err();
        assert_eq!(err.partial, "at ۰۱:۰۰ on ");
        assert!(matches!(err.source, Error::InvalidYear(3179)));

        // Clock-only layouts never consult the calendar.
        assert_eq!(format(&t, "15:04").unwrap(), "۰۱:۰۰");
    }

    #[test]
    fn test_append_format() {
        let mut buf = String::from("> ");
        append_format(&mut buf, &reference(), "2006").unwrap();
        assert_eq!(buf, "> ۱۳۷۹");
    }

    #[test]
    fn test_idempotent() {
        let t = reference();
        let layout = "Monday 2 January 2006 3:04:05.000 PM";
        assert_eq!(format(&t, layout).unwrap(), format(&t, layout).unwrap());
    }

    #[test]
    fn test_next_std_chunk() {
        assert_eq!(next_std_chunk("abc"), ("abc", None, ""));
        assert_eq!(next_std_chunk("x2006y"), ("x", Some(Std::LongYear), "y"));
        assert_eq!(next_std_chunk("_2x"), ("", Some(Std::UnderDay), "x"));
        assert_eq!(next_std_chunk("Mon1"), ("", Some(Std::WeekDay), "1"));
        assert_eq!(next_std_chunk("15"), ("", Some(Std::Hour), ""));
        assert_eq!(next_std_chunk("06"), ("", Some(Std::Year), ""));
        assert_eq!(next_std_chunk("07"), ("07", None, ""));
        assert_eq!(
            next_std_chunk(".99x"),
            ("", Some(Std::FracSecond { digits: 2, trim: true }), "x")
        );
        // A digit after the run makes it a plain literal.
        assert_eq!(next_std_chunk(".01"), (".", Some(Std::ZeroMonth), ""));
    }

    #[test]
    fn test_append_int_padding() {
        let mut buf = String::new();
        append_int(&mut buf, 7, 3);
        append_int(&mut buf, 1234, 2);
        append_int(&mut buf, -5, 2);
        assert_eq!(buf, "۰۰۷۱۲۳۴-۰۵");
    }
}
