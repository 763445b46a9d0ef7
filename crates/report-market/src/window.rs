//! Trailing date window for aggregate requests

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days back from today to the first bar requested
const START_DAYS_AGO: u64 = 3;
/// Days back from today to the last bar requested
const END_DAYS_AGO: u64 = 1;

/// Inclusive range of calendar days to request bars for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window ending yesterday and starting three days ago, relative to `today`
    pub fn trailing(today: NaiveDate) -> Self {
        Self {
            start: today - Days::new(START_DAYS_AGO),
            end: today - Days::new(END_DAYS_AGO),
        }
    }

    /// Trailing window relative to the current UTC date
    pub fn current() -> Self {
        Self::trailing(Utc::now().date_naive())
    }

    /// Start date as `YYYY-MM-DD`
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End date as `YYYY-MM-DD`
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}
