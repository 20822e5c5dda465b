//! Field checks for dates typed into a form.
//!
//! Every check is a pure function of the current snapshot and returns a
//! [`ValidationResult`] instead of an error, so a bad day never hides what is
//! wrong with the month. Day checks take the whole date because February and
//! the 30 day months need month and year context.

use std::fmt;

use crate::consts::{
    BCE_SIGN, DECEMBER, FEBRUARY, JANUARY, MAX_DAY, MAX_YEAR_DIGITS, MIN_DAY, MONTH_NAMES,
    SHORT_MONTH_DAYS, SHORT_MONTHS,
};
use crate::prelude::*;
use crate::types::{DateInput, PartialDate, february_days, is_leap_year};
use serde::{Deserialize, Serialize};

/// What a check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ValidationKind {
    #[display(fmt = "valid")]
    Valid,
    #[display(fmt = "day out of range")]
    DayOutOfRange,
    #[display(fmt = "month out of range")]
    MonthOutOfRange,
    #[display(fmt = "year missing")]
    YearMissing,
    #[display(fmt = "year too long")]
    YearTooLong,
    #[display(fmt = "february overflow")]
    FebruaryOverflow,
    #[display(fmt = "short month overflow")]
    ShortMonthOverflow,
    #[display(fmt = "missing month for day and year")]
    MissingMonthForDayYear,
}

/// Outcome of one check: a kind for logic, a message for people.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    kind: ValidationKind,
    message: String,
}

impl ValidationResult {
    pub const fn valid() -> Self {
        Self {
            kind: ValidationKind::Valid,
            message: String::new(),
        }
    }

    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ValidationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self.kind, ValidationKind::Valid)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Checks the day against the 1..=31 range and against its month.
pub fn validate_day(date: &PartialDate) -> ValidationResult {
    let Some(day) = date.day() else {
        return ValidationResult::valid();
    };

    if day < MIN_DAY {
        return ValidationResult::new(ValidationKind::DayOutOfRange, "Days start at least by 1");
    }
    if day > MAX_DAY {
        return ValidationResult::new(
            ValidationKind::DayOutOfRange,
            "There is no month with more than 31 days",
        );
    }

    match date.month() {
        Some(FEBRUARY) => {
            let max = february_days(date.year());
            if day > max {
                return ValidationResult::new(
                    ValidationKind::FebruaryOverflow,
                    february_message(date.year(), max),
                );
            }
        }
        Some(month) if SHORT_MONTHS.contains(&month) && day > SHORT_MONTH_DAYS => {
            return ValidationResult::new(
                ValidationKind::ShortMonthOverflow,
                format!("{} only has {SHORT_MONTH_DAYS} days", MONTH_NAMES[month as usize]),
            );
        }
        _ => {}
    }

    ValidationResult::valid()
}

fn february_message(year: Option<i32>, max: i32) -> String {
    match year {
        Some(y) if is_leap_year(y) => format!("February {y} only has {max} days"),
        Some(y) => format!("February {y} only has {max} days, {y} is not a leap year"),
        None => format!("February only has {max} days unless the year is a leap year"),
    }
}

/// Checks the month against 1..=12.
pub fn validate_month(date: &PartialDate) -> ValidationResult {
    match date.month() {
        Some(month) if !(JANUARY..=DECEMBER).contains(&month) => ValidationResult::new(
            ValidationKind::MonthOutOfRange,
            "There are only 12 months, enter a month from 1 to 12",
        ),
        _ => ValidationResult::valid(),
    }
}

/// Checks the raw year text.
///
/// A year is required, so empty text and a lone minus are both missing.
/// At most four digits are allowed; the minus of a BCE year is not a digit.
pub fn validate_year(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(BCE_SIGN).unwrap_or(trimmed);
    if digits.is_empty() {
        return ValidationResult::new(ValidationKind::YearMissing, "Please enter a year");
    }
    if digits.chars().count() > MAX_YEAR_DIGITS {
        return ValidationResult::new(
            ValidationKind::YearTooLong,
            format!("A year has at most {MAX_YEAR_DIGITS} digits"),
        );
    }
    ValidationResult::valid()
}

/// Rejects a day and year given without the month between them.
pub fn validate_format(date: &PartialDate) -> ValidationResult {
    if date.day().is_some() && date.month().is_none() && date.year().is_some() {
        return ValidationResult::new(
            ValidationKind::MissingMonthForDayYear,
            "invalid format, enter a month",
        );
    }
    ValidationResult::valid()
}

/// Results of all four checks for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub day: ValidationResult,
    pub month: ValidationResult,
    pub year: ValidationResult,
    pub format: ValidationResult,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.results().iter().all(|result| result.is_valid())
    }

    /// The four results in day, month, year, format order
    pub const fn results(&self) -> [&ValidationResult; 4] {
        [&self.day, &self.month, &self.year, &self.format]
    }
}

/// Runs every check against the current form text.
pub fn validate_all(input: &DateInput) -> Validation {
    let date = input.date();
    Validation {
        day: validate_day(&date),
        month: validate_month(&date),
        year: validate_year(input.year()),
        format: validate_format(&date),
    }
}
