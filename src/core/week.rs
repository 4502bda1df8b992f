//! Monday-to-Sunday week arithmetic.

use crate::core::Clock;
use crate::utils::error::{Result, SchedulerError};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;

/// Days elapsed since the Monday of `today`'s week.
fn days_since_monday(today: NaiveDate) -> u64 {
    let diff = i64::from(today.weekday().num_days_from_sunday()) - 1;
    let diff = if diff < 0 { diff + 7 } else { diff };
    diff as u64
}

/// Fails for dates near the ends of the calendar whose week is cut off.
pub fn start_of_week(today: NaiveDate) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(days_since_monday(today)))
        .ok_or(SchedulerError::DateOutOfRange { date: today })
}

pub fn end_of_week(today: NaiveDate) -> Result<NaiveDate> {
    start_of_week(today)?
        .checked_add_days(Days::new(6))
        .ok_or(SchedulerError::DateOutOfRange { date: today })
}

pub fn week_days(today: NaiveDate) -> Result<Vec<NaiveDate>> {
    Ok(WeekRange::containing(today)?.days().collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn containing(today: NaiveDate) -> Result<Self> {
        Ok(Self {
            start: start_of_week(today)?,
            end: end_of_week(today)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| d.succ_opt().filter(|n| *n <= end))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Week queries relative to the clock's current date.
pub struct WeekService<C: Clock> {
    clock: C,
}

impl<C: Clock> WeekService<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn start_of_week(&self) -> Result<NaiveDate> {
        start_of_week(self.clock.today())
    }

    pub fn end_of_week(&self) -> Result<NaiveDate> {
        end_of_week(self.clock.today())
    }

    pub fn week_days(&self) -> Result<Vec<NaiveDate>> {
        week_days(self.clock.today())
    }

    pub fn current_week(&self) -> Result<WeekRange> {
        WeekRange::containing(self.clock.today())
    }
}
