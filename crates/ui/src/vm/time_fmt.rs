use chrono::{DateTime, NaiveDate, Utc};

/// `Apr 15, 2023`
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// `April 20, 2025`
#[must_use]
pub fn format_day(value: NaiveDate) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Seconds as `45s` or `1m 05s`.
#[must_use]
pub fn format_streak(secs: u32) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
