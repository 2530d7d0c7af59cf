//! Free-time computation for a single day window.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::calendar_math;
use super::types::{CalendarEvent, FreeSlot};

/// Compute the free slots within `[day_start, day_end]`.
///
/// All-day events and study sessions never block time. Timed events are
/// clipped to the window and merged; the complement of the merged busy
/// intervals is returned in chronological order.
///
/// When the window falls on `now`'s calendar day, the effective start is
/// pushed to at least one hour from now, rounded up to the next whole hour.
pub fn free_slots_for_day(
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let effective_start = if calendar_math::day_key(day_start) == calendar_math::day_key(now) {
        day_start.max(calendar_math::ceil_to_hour(now + Duration::hours(1)))
    } else {
        day_start
    };

    if effective_start >= day_end {
        debug!(
            day = %calendar_math::day_key(day_start),
            "no usable time left in day window"
        );
        return Vec::new();
    }

    let busy = merged_busy_intervals(effective_start, day_end, events);

    let mut slots = Vec::new();
    let mut cursor = effective_start;
    for (busy_start, busy_end) in busy {
        if busy_start > cursor {
            slots.push(FreeSlot::new(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }
    if cursor < day_end {
        slots.push(FreeSlot::new(cursor, day_end));
    }

    slots
}

/// Clip blocking events to the window and merge overlapping intervals.
fn merged_busy_intervals(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    events: &[CalendarEvent],
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = events
        .iter()
        .filter(|e| e.blocks_time())
        .filter(|e| e.overlaps(window_start, window_end))
        .map(|e| (e.start.max(window_start), e.end.min(window_end)))
        .collect();

    intervals.sort_by_key(|(start, _)| *start);

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }

    merged
}
