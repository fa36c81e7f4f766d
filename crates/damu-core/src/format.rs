//! Human-readable byte sizes and date strings.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Unit labels, indexed by power of 1024.
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count using binary (1024) units.
///
/// The value is rounded to two decimals and trailing zeros are dropped,
/// so 1024 is `"1 KB"` and 1500 is `"1.46 KB"`. Sizes beyond the largest
/// unit stay in GB.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    #[expect(clippy::cast_precision_loss)]
    let value = bytes as f64 / divisor as f64;
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Serialize a calendar date as `YYYY-MM-DD` for the list query.
#[must_use]
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The calendar date of `timestamp` as seen in time zone `tz`, for display
/// on asset cards.
#[must_use]
pub fn format_display_date<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .date_naive()
        .format("%b %-d, %Y")
        .to_string()
}
