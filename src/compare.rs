//! Chronological ordering of partial dates and timeline events.

use std::cmp::Ordering;

use crate::consts::{JANUARY, MIN_DAY};
use crate::format::format_range;
use crate::range::{DateRange, EventRecord};
use crate::types::PartialDate;

/// Chronological order: year, then month, then day.
///
/// A missing month counts as January and a missing day as the first, so
/// `1989` and `1. January 1989` compare equal. A missing year sorts before
/// every known year. Years compare as signed numbers, which puts BCE before
/// CE.
pub fn compare(a: &PartialDate, b: &PartialDate) -> Ordering {
    a.year()
        .cmp(&b.year())
        .then_with(|| a.month().unwrap_or(JANUARY).cmp(&b.month().unwrap_or(JANUARY)))
        .then_with(|| a.day().unwrap_or(MIN_DAY).cmp(&b.day().unwrap_or(MIN_DAY)))
}

/// Orders by start, then by end; an open range sorts before a closed one.
pub fn compare_ranges(a: &DateRange, b: &DateRange) -> Ordering {
    compare(&a.start(), &b.start()).then_with(|| match (a.end(), b.end()) {
        (Some(a_end), Some(b_end)) => compare(&a_end, &b_end),
        (a_end, b_end) => a_end.is_some().cmp(&b_end.is_some()),
    })
}

/// Orders events by their start date only; equal starts compare equal.
pub fn compare_events(a: &EventRecord, b: &EventRecord) -> Ordering {
    compare(&a.range.start(), &b.range.start())
}

/// Puts a timeline's events in chronological order.
///
/// The sort is stable, so events sharing a start keep their relative order.
pub fn sort_events(events: &mut [EventRecord]) {
    events.sort_by(compare_events);
}

/// Whether a dropped quiz answer matches the answer key.
///
/// Compares the displayed dates, not the dates themselves: two ranges that
/// render the same text match even if they differ in a hidden component.
pub fn answers_match(key: &DateRange, dropped: &DateRange) -> bool {
    format_range(key) == format_range(dropped)
}

impl PartialOrd for PartialDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chronological order, with dates that [`compare`] finds equal ordered by
/// precision (a missing component first) so that `Ord` agrees with `Eq`.
impl Ord for PartialDate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other).then_with(|| self.to_columns().cmp(&other.to_columns()))
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.start().cmp(&other.start()) {
            Ordering::Equal => self.end().cmp(&other.end()),
            ord => ord,
        }
    }
}
