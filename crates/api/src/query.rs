//! Shared query-string parameter types.

use serde::Deserialize;

/// Optional `start_date` / `end_date` bounds for report endpoints.
///
/// Values are kept raw and parsed by `moalem_core::dates` so malformed days
/// produce a field-specific message.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
