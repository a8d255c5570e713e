//! Calendar-day parsing and report windows.
//!
//! Attendance is keyed by calendar day, never by instant. All request-side
//! dates use the `YYYY-MM-DD` form.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::CalendarDate;

/// `chrono` format string for `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default trailing window used by reports and class stats.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Parse a strict `YYYY-MM-DD` calendar day.
///
/// `field` names the input in the error message (e.g. `"date"`, `"start_date"`).
pub fn parse_calendar_date(raw: &str, field: &str) -> Result<CalendarDate, CoreError> {
    let raw = raw.trim();
    // chrono accepts single-digit months and days; the wire format does not.
    if raw.len() != 10 {
        return Err(invalid_date(field));
    }
    CalendarDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid_date(field))
}

fn invalid_date(field: &str) -> CoreError {
    CoreError::Validation(format!("Invalid {field} format (YYYY-MM-DD)"))
}

/// First day of the trailing window ending on `today`.
pub fn trailing_window_start(today: CalendarDate) -> CalendarDate {
    today - Duration::days(DEFAULT_WINDOW_DAYS)
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateWindow {
    /// Resolve optional `start_date` / `end_date` query values.
    ///
    /// - A missing end defaults to `today`.
    /// - A missing start defaults to 30 days before the end.
    /// - A start after the end is rejected.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: CalendarDate,
    ) -> Result<Self, CoreError> {
        let end = match end {
            Some(raw) => parse_calendar_date(raw, "end_date")?,
            None => today,
        };
        let start = match start {
            Some(raw) => parse_calendar_date(raw, "start_date")?,
            None => trailing_window_start(end),
        };

        if start > end {
            return Err(CoreError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(Self { start, end })
    }
}
