use crate::error::ReportError;
use chrono::{Datelike, Days, Local, NaiveDate, TimeZone};

/// The previous calendar month, anchored on the first day of the month that
/// contains "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    pub first_of_current_month: NaiveDate,
    pub last_of_previous_month: NaiveDate,
}

impl ReportingWindow {
    /// Window for the month preceding the one that contains `today`.
    pub fn containing(today: NaiveDate) -> Self {
        // Day 1 exists in every month.
        let first_of_current_month = today.with_day(1).unwrap_or(today);
        let last_of_previous_month = first_of_current_month
            .checked_sub_days(Days::new(1))
            .unwrap_or(first_of_current_month);
        Self {
            first_of_current_month,
            last_of_previous_month,
        }
    }

    /// Length of the previous month, read off its last day-of-month.
    pub fn days(&self) -> u32 {
        self.last_of_previous_month.day()
    }

    /// Range selector such as `[30d]`.
    pub fn duration_token(&self) -> String {
        format!("[{}d]", self.days())
    }

    /// Unix seconds of local midnight on the first day of the current month.
    pub fn timestamp(&self) -> Result<i64, ReportError> {
        self.timestamp_in(&Local)
    }

    pub fn timestamp_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<i64, ReportError> {
        let midnight = self
            .first_of_current_month
            .and_hms_opt(0, 0, 0)
            .ok_or(ReportError::InvalidTimestamp(self.first_of_current_month))?;
        tz.from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.timestamp())
            .ok_or(ReportError::InvalidTimestamp(self.first_of_current_month))
    }

    /// Header line, e.g. `February 2021:`.
    pub fn header(&self) -> String {
        format!("{}:", self.last_of_previous_month.format("%B %Y"))
    }
}
