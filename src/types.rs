use crate::consts::{
    CENTURY_CYCLE, DECEMBER, FEBRUARY, FEBRUARY_DAYS, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY,
    LEAP_YEAR_CYCLE, MAX_DAY, SHORT_MONTH_DAYS, SHORT_MONTHS,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A date where any of day, month and year may be unknown.
///
/// Values are not range checked on construction: a day of 40 is stored as
/// such so that validation can report it. Negative years are BCE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialDate {
    day: Option<i32>,
    month: Option<i32>,
    year: Option<i32>,
}

/// How much of a date is known, from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

impl PartialDate {
    pub const fn new(day: Option<i32>, month: Option<i32>, year: Option<i32>) -> Self {
        Self { day, month, year }
    }

    /// Builds a date from the raw text of the three form fields.
    ///
    /// Never fails. Empty or unparsable text means the component is absent,
    /// including a year that so far holds only its leading minus.
    pub fn from_raw(day: &str, month: &str, year: &str) -> Self {
        Self {
            day: parse_component(day),
            month: parse_component(month),
            year: parse_component(year),
        }
    }

    pub const fn day(&self) -> Option<i32> {
        self.day
    }

    pub const fn month(&self) -> Option<i32> {
        self.month
    }

    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// True when the year is known and before year 0
    pub const fn is_bce(&self) -> bool {
        matches!(self.year, Some(y) if y < 0)
    }

    /// True when no component is known
    pub const fn is_empty(&self) -> bool {
        self.day.is_none() && self.month.is_none() && self.year.is_none()
    }

    /// The display precision, or `None` without a year.
    ///
    /// A month only counts when it names one of the twelve months, and a day
    /// only counts when its month does.
    pub fn precision(&self) -> Option<Precision> {
        self.year?;
        let named_month = self.month.is_some_and(|m| (JANUARY..=DECEMBER).contains(&m));
        Some(match (named_month, self.day) {
            (false, _) => Precision::Year,
            (true, None) => Precision::Month,
            (true, Some(_)) => Precision::Day,
        })
    }

    /// Converts to storage columns: (year, month, day)
    pub const fn to_columns(&self) -> (Option<i32>, Option<i32>, Option<i32>) {
        (self.year, self.month, self.day)
    }
}

impl From<(Option<i32>, Option<i32>, Option<i32>)> for PartialDate {
    fn from((year, month, day): (Option<i32>, Option<i32>, Option<i32>)) -> Self {
        Self::new(day, month, year)
    }
}

fn parse_component(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// One of the three text fields a date form is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InputField {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// Raw field text as typed into a date form.
///
/// Year validation depends on the characters typed, not only on the number
/// they spell, so the text is kept next to the parsed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInput {
    day: String,
    month: String,
    year: String,
}

impl DateInput {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Raw text of one field
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Day => &self.day,
            InputField::Month => &self.month,
            InputField::Year => &self.year,
        }
    }

    /// Replaces the text of one field
    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let value = value.into();
        match field {
            InputField::Day => self.day = value,
            InputField::Month => self.month = value,
            InputField::Year => self.year = value,
        }
    }

    /// True when the field holds any text at all
    pub fn has(&self, field: InputField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Parses the current text into a fresh snapshot
    pub fn date(&self) -> PartialDate {
        PartialDate::from_raw(&self.day, &self.month, &self.year)
    }

    pub fn clear(&mut self) {
        self.day.clear();
        self.month.clear();
        self.year.clear();
    }
}

// Helper functions

/// Gregorian leap year rule, applied to signed years as written
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days February has in the given year; an unknown year is never a leap year
pub const fn february_days(year: Option<i32>) -> i32 {
    match year {
        Some(y) if is_leap_year(y) => FEBRUARY_DAYS_LEAP,
        _ => FEBRUARY_DAYS,
    }
}

/// Longest possible day for `month`, treating an unknown year as non-leap.
///
/// Months outside 1..=12 fall back to the 31 day maximum.
pub fn days_in_month(year: Option<i32>, month: i32) -> i32 {
    if month == FEBRUARY {
        february_days(year)
    } else if SHORT_MONTHS.contains(&month) {
        SHORT_MONTH_DAYS
    } else {
        MAX_DAY
    }
}
