//! Leap structure of the Jalaali calendar, derived from the break table.

use crate::consts::{
    BREAKS, ESFAND_DAYS_COMMON, GREGORIAN_YEAR_OFFSET, LAST_LONG_MONTH, LONG_MONTH_DAYS,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, SHORT_MONTH_DAYS,
};
use crate::{Error, Result};

/// Length of the regular leap cycle in years
const CYCLE: i32 = 33;
/// Leap years in one regular cycle
const LEAPS_PER_CYCLE: i32 = 8;

/// Calendar facts for a single Jalaali year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearInfo {
    /// Years since the last leap year; `0` means this year is leap.
    pub leap: i32,
    /// Gregorian year in which Farvardin 1 falls
    pub gy: i32,
    /// Day of March on which Farvardin 1 falls
    pub march: i32,
}

impl YearInfo {
    #[inline]
    pub const fn is_leap(&self) -> bool {
        self.leap == 0
    }
}

/// Computes the leap indicator and the Gregorian start of Jalaali year `jy`.
///
/// # Errors
/// Returns `Error::InvalidYear` if `jy` is outside `BREAKS[0]..BREAKS[last]`.
pub(crate) fn jal_cal(jy: i32) -> Result<YearInfo> {
    let last = BREAKS[BREAKS.len() - 1];
    let mut jp = BREAKS[0];
    if jy < jp || jy >= last {
        return Err(Error::InvalidYear(jy));
    }

    let gy = jy + GREGORIAN_YEAR_OFFSET;
    let mut leap_j = -14;
    let mut jump = 0;

    // Find the breaks bracketing jy.
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / CYCLE * LEAPS_PER_CYCLE + jump % CYCLE / 4;
        jp = jm;
    }
    let mut n = jy - jp;

    // Jalaali leap days from AD 621 to the start of jy.
    leap_j += n / CYCLE * LEAPS_PER_CYCLE + (n % CYCLE + 3) / 4;
    if jump % CYCLE == 4 && jump - n == 4 {
        leap_j += 1;
    }

    // Gregorian leap days up to gy.
    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;

    let march = 20 + leap_j - leap_g;

    // Years since the last leap year.
    if jump - n < 6 {
        n = n - jump + (jump + 4) / CYCLE * CYCLE;
    }
    let mut leap = ((n + 1) % CYCLE - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo { leap, gy, march })
}

/// Returns true if Jalaali year `jy` is a leap year.
///
/// # Errors
/// Returns `Error::InvalidYear` if `jy` is outside the break table.
pub fn is_leap_year(jy: i32) -> Result<bool> {
    jal_cal(jy).map(|info| info.is_leap())
}

/// Returns the number of days in month `jm` of Jalaali year `jy`.
///
/// Only Esfand consults the calendar, so an unsupported year is reported for
/// month 12 alone.
///
/// # Errors
/// Returns `Error::InvalidYear` if `jm` is Esfand and `jy` is unsupported.
pub fn month_length(jy: i32, jm: i32) -> Result<u8> {
    if jm <= i32::from(LAST_LONG_MONTH) {
        Ok(LONG_MONTH_DAYS)
    } else if jm < i32::from(MAX_MONTH) {
        Ok(SHORT_MONTH_DAYS)
    } else if is_leap_year(jy)? {
        Ok(SHORT_MONTH_DAYS)
    } else {
        Ok(ESFAND_DAYS_COMMON)
    }
}

/// Returns true if `(jy, jm, jd)` names an existing Jalaali date.
pub fn is_valid_date(jy: i32, jm: i32, jd: i32) -> bool {
    let max_day = match month_length(jy, jm) {
        Ok(days) => days,
        Err(err) => {
            log::debug!("treating {jy}-{jm}-{jd} as invalid: {err}");
            return false;
        }
    };
    (MIN_YEAR..=MAX_YEAR).contains(&jy)
        && (1..=i32::from(MAX_MONTH)).contains(&jm)
        && (i32::from(MIN_DAY)..=i32::from(max_day)).contains(&jd)
}
