mod compare;
mod consts;
mod format;
mod prelude;
mod range;
mod session;
mod types;
mod validate;

#[cfg(test)]
mod test_utils;

pub use compare::{answers_match, compare, compare_events, compare_ranges, sort_events};
pub use consts::*;
pub use format::{format, format_range, month_name};
pub use range::{DateRange, EventRecord};
pub use session::{
    Clock, Field, FieldState, ScheduledTask, SessionConfig, SystemClock, TaskHandle, Transition,
    ValidationSession, Visibility,
};
pub use types::{
    DateInput, InputField, PartialDate, Precision, days_in_month, february_days, is_leap_year,
};
pub use validate::{
    Validation, ValidationKind, ValidationResult, validate_all, validate_day, validate_format,
    validate_month, validate_year,
};

/// Failure to read a date back from its display form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("Invalid year: {0}")]
    InvalidYear(String),
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
    #[error("Invalid day: {0} (expected a number followed by '.')")]
    InvalidDay(String),
    #[error("Empty date string")]
    EmptyInput,
}
