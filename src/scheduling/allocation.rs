//! Distribution of preparation hours across the days before an event.

use tracing::debug;

use super::types::{DayAllocation, EventCategory};

/// Front-loading weights for the three offsets closest to the event.
const EXAM_WEIGHTS: [f64; 3] = [0.40, 0.30, 0.20];
const DEFAULT_WEIGHTS: [f64; 3] = [0.60, 0.25, 0.10];

/// Compute the hours-per-day plan for an event.
///
/// Offset 0 is the day immediately before the event. Weighted shares are
/// capped by the remaining hours and the last distribution day absorbs the
/// remainder, so the full request is always allocated. Callers must enforce
/// the 24-hour lead-time gate before calling this.
pub fn plan(
    category: EventCategory,
    preparation_hours: f64,
    days_until_event: i64,
) -> Vec<DayAllocation> {
    if !preparation_hours.is_finite() || preparation_hours <= 0.0 || days_until_event < 1 {
        return Vec::new();
    }

    let days = distribution_days(category, preparation_hours, days_until_event);
    let weights = match category {
        EventCategory::Exam => EXAM_WEIGHTS,
        _ => DEFAULT_WEIGHTS,
    };

    let mut allocations = Vec::with_capacity(days as usize);
    let mut remaining = preparation_hours;
    for offset in 0..days {
        let hours = if offset + 1 == days {
            remaining
        } else if (offset as usize) < weights.len() {
            (preparation_hours * weights[offset as usize]).min(remaining)
        } else {
            // Offsets beyond the front-loaded three split evenly
            remaining / f64::from(days - offset)
        };
        remaining -= hours;
        if hours > 0.0 {
            allocations.push(DayAllocation::new(offset, hours));
        }
    }

    debug!(
        category = category.display_name(),
        hours = preparation_hours,
        days,
        "planned preparation allocation"
    );

    allocations
}

/// Number of days to spread the preparation over.
fn distribution_days(category: EventCategory, hours: f64, days_until_event: i64) -> u32 {
    let days = match category {
        EventCategory::Exam => {
            let by_hours = (hours / 2.0).floor() as i64;
            let mut days = days_until_event.min(by_hours).max(1);
            if hours >= 2.0 && days_until_event >= 2 {
                days = days.max(2);
            }
            days
        }
        _ => {
            if hours <= 2.0 && days_until_event >= 1 {
                1
            } else {
                let by_hours = (hours / 3.0).ceil() as i64;
                days_until_event.min(by_hours).max(1)
            }
        }
    };
    days as u32
}

/// Move a slotless day's hours to the next allocation with available time.
///
/// Scans forward in planner-output order (not chronological proximity) and
/// adds the source allocation's hours to the first later entry whose day
/// still has free slots. Returns the receiving index, or `None` when every
/// later day is also full, in which case the hours are dropped as an
/// unschedulable remainder.
pub fn redistribute_to_next<F>(
    allocations: &mut [DayAllocation],
    from: usize,
    mut day_has_slots: F,
) -> Option<usize>
where
    F: FnMut(u32) -> bool,
{
    let hours = allocations[from].hours;
    if hours <= 0.0 {
        return None;
    }

    allocations[from].hours = 0.0;
    for target in (from + 1)..allocations.len() {
        if day_has_slots(allocations[target].offset) {
            allocations[target].hours += hours;
            debug!(
                from_offset = allocations[from].offset,
                to_offset = allocations[target].offset,
                hours,
                "redistributed hours from slotless day"
            );
            return Some(target);
        }
    }

    debug!(
        from_offset = allocations[from].offset,
        hours, "no later day has free slots; hours left unscheduled"
    );
    None
}
