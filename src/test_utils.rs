//! Builders and a hand-driven clock shared by the unit tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::session::Clock;
use crate::types::PartialDate;

pub fn date(day: Option<i32>, month: Option<i32>, year: Option<i32>) -> PartialDate {
    PartialDate::new(day, month, year)
}

pub fn year(year: i32) -> PartialDate {
    date(None, None, Some(year))
}

pub fn month_year(month: i32, year: i32) -> PartialDate {
    date(None, Some(month), Some(year))
}

pub fn day_month(day: i32, month: i32) -> PartialDate {
    date(Some(day), Some(month), None)
}

pub fn day_month_year(day: i32, month: i32, year: i32) -> PartialDate {
    date(Some(day), Some(month), Some(year))
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
