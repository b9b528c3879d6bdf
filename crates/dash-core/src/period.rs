// File: crates/dash-core/src/period.rs
// Summary: Period parsing and conversion to a continuous X coordinate.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a period cell. Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and
/// date-times with either a space or `T` separator, optionally carrying a
/// `Z` or `+hh:mm` offset. The time part and offset are dropped.
pub fn parse_period(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local().date());
        }
    }
    // Month and year granularity: anchor on the first day.
    let mut parts = s.splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(m) => m.parse::<u32>().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Days since the Unix epoch; used as the X coordinate when rasterizing.
pub fn to_x(d: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    (d - epoch).num_days() as f64
}

/// Inverse of [`to_x`], rounding to the nearest day.
pub fn from_x(x: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    epoch.checked_add_signed(chrono::Duration::days(x.round() as i64))
}
