//! Jalaali <-> Gregorian conversion through the Julian Day Number.

use crate::calendar::jal_cal;
use crate::consts::GREGORIAN_YEAR_OFFSET;
use crate::jdn::{d2g, g2d};
use crate::types::Month;
use crate::{Error, GregorianDate, JalaaliDate, Result};

/// Days in the six 31-day months that open the year
const FIRST_HALF_DAYS: i64 = 186;

/// Converts a Gregorian date to the Jalaali calendar.
///
/// # Errors
/// Returns `Error::InvalidYear` if the date falls outside the supported
/// Jalaali years.
pub fn to_jalaali(gy: i32, gm: i32, gd: i32) -> Result<JalaaliDate> {
    d2j(g2d(gy, gm, gd)).inspect_err(|err| log::debug!("{gy}-{gm}-{gd}: {err}"))
}

/// Converts a Jalaali date to the Gregorian calendar.
///
/// Month and day are not range-checked; they overflow into later months the
/// same way the arithmetic does.
///
/// # Errors
/// Returns `Error::InvalidYear` if `jy` is not a supported Jalaali year.
pub fn to_gregorian(jy: i32, jm: i32, jd: i32) -> Result<GregorianDate> {
    let jdn = j2d(jy, jm, jd).inspect_err(|err| log::debug!("{jy}-{jm}-{jd}: {err}"))?;
    let (year, month, day) = d2g(jdn);
    Ok(GregorianDate::new(year, month.unsigned_abs(), day.unsigned_abs()))
}

/// Julian Day Number of a Jalaali date.
pub(crate) fn j2d(jy: i32, jm: i32, jd: i32) -> Result<i64> {
    let info = jal_cal(jy)?;
    let jm = i64::from(jm);
    Ok(g2d(info.gy, 3, info.march) + (jm - 1) * 31 - jm / 7 * (jm - 7) + i64::from(jd) - 1)
}

/// Jalaali date of a Julian Day Number.
pub(crate) fn d2j(jdn: i64) -> Result<JalaaliDate> {
    let (gy, _, _) = d2g(jdn);
    let mut jy = gy - GREGORIAN_YEAR_OFFSET;

    // Days since 1 Farvardin of jy, landing in the second half of the year
    // unless the first six months already matched.
    let k = match jal_cal(jy) {
        Ok(info) => {
            let k = jdn - g2d(gy, 3, info.march);
            if (0..FIRST_HALF_DAYS).contains(&k) {
                return first_half(jy, k);
            }
            if k >= 0 {
                k - FIRST_HALF_DAYS
            } else {
                // Winter of the previous Jalaali year, which may lie before
                // the break table.
                jy -= 1;
                k + 179 + i64::from(info.leap == 1)
            }
        }
        // Past the last break, winter days still belong to the final year.
        Err(err) => {
            let Ok(prev) = jal_cal(jy - 1) else {
                return Err(err);
            };
            let k = jdn - g2d(prev.gy, 3, prev.march);
            let year_days = if prev.is_leap() { 366 } else { 365 };
            if !(FIRST_HALF_DAYS..year_days).contains(&k) {
                return Err(err);
            }
            jy -= 1;
            k - FIRST_HALF_DAYS
        }
    };

    let month = Month::try_from(7 + k / 30).map_err(|_| Error::InvalidYear(jy))?;
    Ok(JalaaliDate::from_parts(jy, month, (k % 30 + 1) as u8))
}

fn first_half(jy: i32, k: i64) -> Result<JalaaliDate> {
    let month = Month::try_from(1 + k / 31).map_err(|_| Error::InvalidYear(jy))?;
    Ok(JalaaliDate::from_parts(jy, month, (k % 31 + 1) as u8))
}
