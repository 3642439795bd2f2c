//! Date formatting for reports.

use chrono::{Local, NaiveDate};

/// Format a date as `YYYY-MM-DD`, using today's local date when `None`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.unwrap_or_else(|| Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}
