//! Julian Day Number codec for the proleptic Gregorian calendar.
//!
//! Both directions are closed-form. Month and year are shifted so that March
//! starts the computational year, which puts the leap day at its tail. The
//! large offsets keep every intermediate dividend positive for the supported
//! range, so Rust's truncating `/` and `%` behave like floor division here.

/// Converts a Gregorian `(year, month, day)` to a Julian Day Number.
///
/// No validity check is performed; out-of-range months and days simply
/// overflow into neighbouring months.
pub const fn g2d(gy: i32, gm: i32, gd: i32) -> i64 {
    let gy = gy as i64;
    let gm = gm as i64;
    let gd = gd as i64;

    let shifted = gy + (gm - 8) / 6 + 100_100;
    let d = shifted * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd - 34_840_408;
    d - shifted / 100 * 3 / 4 + 752
}

/// Converts a Julian Day Number back to a Gregorian `(year, month, day)`.
pub const fn d2g(jdn: i64) -> (i32, i32, i32) {
    let mut j = 4 * jdn + 139_361_631;
    j += (4 * jdn + 183_187_720) / 146_097 * 3 / 4 * 4 - 3908;
    let i = j % 1461 / 4 * 5 + 308;
    let gd = i % 153 / 5 + 1;
    let gm = i / 153 % 12 + 1;
    let gy = j / 1461 - 100_100 + (8 - gm) / 6;
    (gy as i32, gm as i32, gd as i32)
}
