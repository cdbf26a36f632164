/// Jalaali years at which the 33-year leap cadence shifts.
///
/// The first entry is the earliest supported year and the last entry is the
/// first unsupported one.
pub const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Minimum valid Jalaali year (inclusive)
pub const MIN_YEAR: i32 = -61;

/// Maximum valid Jalaali year (inclusive)
pub const MAX_YEAR: i32 = 3177;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Last month with 31 days (Shahrivar)
pub const LAST_LONG_MONTH: u8 = 6;

/// Days in each of the first six months
pub const LONG_MONTH_DAYS: u8 = 31;

/// Days in months seven through eleven, and in Esfand of a leap year
pub const SHORT_MONTH_DAYS: u8 = 30;

/// Days in Esfand of a common year
pub const ESFAND_DAYS_COMMON: u8 = 29;

/// Offset between a Jalaali year and the Gregorian year holding its Farvardin 1
pub(crate) const GREGORIAN_YEAR_OFFSET: i32 = 621;

/// Month names, Farvardin first
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Weekday names, Shanbe (Saturday) first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یک‌شنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنج‌شنبه",
    "جمعه",
];

/// Meridiem marker before noon
pub const MERIDIEM_AM: &str = "قبل‌ازظهر";

/// Meridiem marker from noon on
pub const MERIDIEM_PM: &str = "بعدازظهر";

/// Persian-script digits, indexed by value
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Alternative date component separator
pub const ALT_DATE_SEPARATOR: char = '/';
