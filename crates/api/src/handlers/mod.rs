pub mod attendance;
pub mod auth;
pub mod class;
pub mod reference;
pub mod student;

use moalem_core::types::CalendarDate;

/// Today's calendar day in UTC.
pub(crate) fn today() -> CalendarDate {
    chrono::Utc::now().date_naive()
}
