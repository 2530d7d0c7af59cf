//! Calendar arithmetic shared by the scheduling engine.
//!
//! All day-offset math and day grouping derive from local calendar fields
//! (`date_naive()`), never from formatted timestamps, so grouping keys cannot
//! drift across day boundaries.

use chrono::{DateTime, Days, Duration, NaiveDate, Timelike, Utc};

use crate::config::SchedulingConfig;

/// Calendar date a `DateTime` falls on.
pub fn day_key(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// The calendar date at `offset` days before the target event.
///
/// Offset 0 is the day immediately preceding the event's date.
pub fn offset_date(target_start: DateTime<Utc>, offset: u32) -> NaiveDate {
    target_start
        .date_naive()
        .checked_sub_days(Days::new(u64::from(offset) + 1))
        .unwrap_or_else(|| target_start.date_naive())
}

/// Working window (start, end) for a calendar date.
pub fn working_window(
    date: NaiveDate,
    config: &SchedulingConfig,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(config.working_hours_start).and_utc();
    let end = date.and_time(config.working_hours_end).and_utc();
    (start, end)
}

/// Whole days from `now` until `start` (truncated).
pub fn days_until(now: DateTime<Utc>, start: DateTime<Utc>) -> i64 {
    (start - now).num_days()
}

/// Round an instant up to the next whole hour, unless already on one.
pub fn ceil_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = instant
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant);
    if truncated == instant {
        instant
    } else {
        truncated + Duration::hours(1)
    }
}

/// Round an instant up to the next `step`-minute grid line.
pub fn ceil_to_step(instant: DateTime<Utc>, step: i64) -> DateTime<Utc> {
    let floored = floor_to_step(instant, step);
    if floored == instant {
        instant
    } else {
        floored + Duration::minutes(step)
    }
}

/// Round an instant down to the previous `step`-minute grid line.
pub fn floor_to_step(instant: DateTime<Utc>, step: i64) -> DateTime<Utc> {
    let minute = i64::from(instant.minute());
    let excess = minute % step;
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .map(|t| t - Duration::minutes(excess))
        .unwrap_or(instant)
}

/// Round a minute count up to the next multiple of `step`.
pub fn ceil_minutes(minutes: i64, step: i64) -> i64 {
    (minutes + step - 1) / step * step
}

/// Round a minute count down to a multiple of `step`.
pub fn floor_minutes(minutes: i64, step: i64) -> i64 {
    (minutes / step) * step
}
