//! Display strings for partial dates and ranges.
//!
//! The precision follows the known components: `"1989"`, `"November 1989"`,
//! `"9. November 1989"`. BCE years are written as their magnitude followed by
//! `" BCE"`. Formatting never fails.

use std::fmt;
use std::str::FromStr;

use crate::consts::{BCE_SUFFIX, DAY_SEPARATOR, DECEMBER, JANUARY, MONTH_NAMES, RANGE_SEPARATOR};
use crate::range::DateRange;
use crate::types::{PartialDate, Precision};
use crate::ParseError;

/// English name of a month, `None` outside 1..=12
pub fn month_name(month: i32) -> Option<&'static str> {
    if (JANUARY..=DECEMBER).contains(&month) {
        Some(MONTH_NAMES[month as usize])
    } else {
        None
    }
}

/// Renders a date at the precision its components allow.
///
/// Without a year there is nothing meaningful to show and the result is
/// empty. A month that cannot be named drops the date to year precision.
pub fn format(date: &PartialDate) -> String {
    let (Some(year), Some(precision)) = (date.year(), date.precision()) else {
        return String::new();
    };
    let year = format_year(year);
    let month = date.month().and_then(month_name).unwrap_or_default();

    match precision {
        Precision::Year => year,
        Precision::Month => format!("{month} {year}"),
        Precision::Day => {
            let day = date.day().unwrap_or_default();
            format!("{day}{DAY_SEPARATOR} {month} {year}")
        }
    }
}

/// `"start"` for open ranges, `"start - end"` otherwise
pub fn format_range(range: &DateRange) -> String {
    match range.end() {
        Some(end) => format!("{}{RANGE_SEPARATOR}{}", format(&range.start()), format(&end)),
        None => format(&range.start()),
    }
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{}{BCE_SUFFIX}", year.unsigned_abs())
    } else {
        year.to_string()
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_range(self))
    }
}

impl FromStr for PartialDate {
    type Err = ParseError;

    /// Reads back the display form, e.g. `"15. March 44 BCE"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (body, bce) = match trimmed.strip_suffix(BCE_SUFFIX) {
            Some(body) => (body, true),
            None => (trimmed, false),
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        match parts.as_slice() {
            [year] => Ok(Self::new(None, None, Some(parse_year(year, bce)?))),
            [month, year] => {
                let month = parse_month(month)?;
                Ok(Self::new(None, Some(month), Some(parse_year(year, bce)?)))
            }
            [day, month, year] => {
                let day = parse_day(day)?;
                let month = parse_month(month)?;
                Ok(Self::new(Some(day), Some(month), Some(parse_year(year, bce)?)))
            }
            _ => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

fn parse_year(s: &str, bce: bool) -> Result<i32, ParseError> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidYear(s.to_owned()));
    }
    let year: i32 = s.parse().map_err(|_| ParseError::InvalidYear(s.to_owned()))?;
    Ok(if bce { -year } else { year })
}

fn parse_month(s: &str) -> Result<i32, ParseError> {
    MONTH_NAMES
        .iter()
        .position(|name| !name.is_empty() && name.eq_ignore_ascii_case(s))
        .and_then(|index| i32::try_from(index).ok())
        .ok_or_else(|| ParseError::UnknownMonth(s.to_owned()))
}

fn parse_day(s: &str) -> Result<i32, ParseError> {
    s.strip_suffix(DAY_SEPARATOR)
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ParseError::InvalidDay(s.to_owned()))
}
