/// Highest day number any month can have
pub const MAX_DAY: i32 = 31;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for December
pub const DECEMBER: i32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;
/// Days in February otherwise (also used when the year is unknown)
pub const FEBRUARY_DAYS: i32 = 28;

/// Days in the months that stop at 30
pub const SHORT_MONTH_DAYS: i32 = 30;

/// April, June, September, November
pub const SHORT_MONTHS: [i32; 4] = [4, 6, 9, 11];

/// English month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Digits a year may have; a leading minus takes an extra character
pub const MAX_YEAR_DIGITS: usize = 4;

/// Prefix marking a BCE year in raw input
pub const BCE_SIGN: char = '-';
/// Suffix appended to BCE years on display
pub const BCE_SUFFIX: &str = " BCE";

/// Separator after the day number ("15. March 44 BCE")
pub const DAY_SEPARATOR: char = '.';
/// Separator between start and end of a displayed range
pub const RANGE_SEPARATOR: &str = " - ";

/// Delay before a missing year is reported, in milliseconds
pub const YEAR_MISSING_DELAY_MS: u64 = 4500;
