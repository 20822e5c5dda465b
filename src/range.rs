use serde::{Deserialize, Serialize};

use crate::compare::compare;
use crate::types::PartialDate;

/// The dates of a timeline event: a start and an optional end.
///
/// An end before the start is accepted as given; [`is_chronological`]
/// reports it and sorting stays deterministic either way.
///
/// [`is_chronological`]: DateRange::is_chronological
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: PartialDate,
    end: Option<PartialDate>,
}

impl DateRange {
    pub const fn new(start: PartialDate, end: Option<PartialDate>) -> Self {
        Self { start, end }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> PartialDate {
        self.start
    }

    /// Returns the end date of the range, if any
    pub const fn end(&self) -> Option<PartialDate> {
        self.end
    }

    /// Returns both dates as a tuple
    pub const fn dates(&self) -> (PartialDate, Option<PartialDate>) {
        (self.start, self.end)
    }

    /// False when the end sorts before the start
    pub fn is_chronological(&self) -> bool {
        self.end.is_none_or(|end| compare(&end, &self.start).is_ge())
    }
}

impl From<PartialDate> for DateRange {
    fn from(start: PartialDate) -> Self {
        Self::new(start, None)
    }
}

/// A titled event placed on a timeline or used as a quiz answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub range: DateRange,
}

impl EventRecord {
    pub fn new(title: impl Into<String>, range: impl Into<DateRange>) -> Self {
        Self {
            title: title.into(),
            range: range.into(),
        }
    }
}
