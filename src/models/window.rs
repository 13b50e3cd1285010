//! Reporting window
//!
//! A half-open calendar window `[start, end)` used to select the
//! transactions that belong to one report.

use chrono::NaiveDate;
use std::fmt;

/// Half-open date window: `start` is included, `end` is not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Create a window from its two bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day inside the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the window
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Number of days covered (zero for an empty or inverted window)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Check if no date can fall inside the window
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%m/%d/%Y"),
            self.end.format("%m/%d/%Y")
        )
    }
}
