//! Greedy packing of day allocations into concrete study sessions.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use crate::config::SchedulingConfig;

use super::allocation;
use super::availability::free_slots_for_day;
use super::calendar_math;
use super::types::{
    CalendarEvent, DayAllocation, EventCategory, FreeSlot, StudySuggestion, SuggestionPriority,
};

/// Session-length bounds for one day offset, in minutes.
#[derive(Debug, Clone, Copy)]
struct SessionBounds {
    preferred: i64,
    max: i64,
}

impl SessionBounds {
    /// Bounds by category and day offset.
    ///
    /// Sessions the day before the event run long; sessions further out are
    /// capped shorter so the plan spreads into several sittings.
    fn for_day(category: EventCategory, offset: u32, minutes_needed: i64) -> Self {
        let (preferred, max) = match (category, offset) {
            (EventCategory::Exam, 0) => (minutes_needed.clamp(120, 300), 300),
            (EventCategory::Exam, 1) => (minutes_needed.clamp(90, 180), 180),
            (EventCategory::Exam, _) => (minutes_needed.clamp(60, 120), 120),
            (_, 0) => (minutes_needed.clamp(120, 240), 240),
            (_, _) => (minutes_needed.clamp(60, 120), 120),
        };
        Self { preferred, max }
    }
}

/// Pack an hours-per-day allocation into non-overlapping study sessions.
///
/// Each allocation is placed on its calendar day (event date minus
/// offset + 1 days) inside the working window, greedily filling the largest
/// free slots first. Days without free time hand their hours to the next
/// allocation that still has room. Per-day minutes round up to the grid, but
/// a budget over the whole allocation caps the total so one call never
/// schedules more time than was requested. Output is sorted by start time
/// and numbered.
pub fn pack(
    mut allocations: Vec<DayAllocation>,
    category: EventCategory,
    target_event: &CalendarEvent,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Vec<StudySuggestion> {
    let mut suggestions = Vec::new();

    let total_hours: f64 = allocations.iter().map(|a| a.hours.max(0.0)).sum();
    let mut budget = calendar_math::floor_minutes(
        (total_hours * 60.0).floor() as i64,
        config.slot_step_minutes,
    );

    for index in 0..allocations.len() {
        let DayAllocation { offset, hours } = allocations[index];
        if hours <= 0.0 {
            continue;
        }

        let mut slots = usable_slots(target_event, offset, events, now, config);
        if slots.is_empty() {
            allocation::redistribute_to_next(&mut allocations, index, |candidate| {
                !usable_slots(target_event, candidate, events, now, config).is_empty()
            });
            continue;
        }

        let minutes_needed = calendar_math::ceil_minutes(
            (hours * 60.0).ceil() as i64,
            config.slot_step_minutes,
        )
        .min(budget);
        let bounds = SessionBounds::for_day(category, offset, minutes_needed);
        let message = message_for(category, offset, &target_event.title);
        let priority = SuggestionPriority::for_offset(offset);

        let mut remaining = minutes_needed;
        while remaining >= config.min_session_minutes {
            slots.sort_by(|a, b| b.duration_minutes().cmp(&a.duration_minutes()));
            let Some(slot) = slots.first_mut() else {
                break;
            };

            let length = calendar_math::floor_minutes(
                remaining
                    .min(slot.duration_minutes())
                    .min(bounds.preferred)
                    .min(bounds.max),
                config.slot_step_minutes,
            );
            if length < config.min_session_minutes {
                // Even the largest slot cannot fit a minimum session
                break;
            }

            let session_start = slot.start;
            let session_end = session_start + Duration::minutes(length);
            suggestions.push(StudySuggestion::new(
                &target_event.id,
                session_start,
                session_end,
                &message,
                priority,
            ));

            slot.start = session_end;
            if slot.duration_minutes() < config.min_session_minutes {
                slots.remove(0);
            }
            remaining -= length;
            budget -= length;
        }

        if remaining > 0 {
            debug!(
                offset,
                remaining_minutes = remaining,
                "could not place all allocated minutes"
            );
        }
    }

    suggestions.sort_by_key(|s| s.start);
    let count = suggestions.len() as u32;
    for (index, suggestion) in suggestions.iter_mut().enumerate() {
        suggestion.session_index = Some(index as u32 + 1);
        suggestion.session_count = Some(count);
    }

    suggestions
}

/// Free slots for a day offset, aligned inward to the session grid.
fn usable_slots(
    target_event: &CalendarEvent,
    offset: u32,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Vec<FreeSlot> {
    let date = calendar_math::offset_date(target_event.start, offset);
    let (day_start, day_end) = calendar_math::working_window(date, config);

    free_slots_for_day(day_start, day_end, events, now)
        .into_iter()
        .filter_map(|slot| {
            let start = calendar_math::ceil_to_step(slot.start, config.slot_step_minutes);
            let end = calendar_math::floor_to_step(slot.end, config.slot_step_minutes);
            let aligned = FreeSlot::new(start, end);
            (end > start && aligned.duration_minutes() >= config.min_session_minutes)
                .then_some(aligned)
        })
        .collect()
}

/// Suggestion wording by category and day offset.
fn message_for(category: EventCategory, offset: u32, title: &str) -> String {
    match category {
        EventCategory::Exam => match offset {
            0 => format!("Final review for {title}"),
            1 => format!("Review and practice for {title}"),
            _ => format!("Start studying for {title}"),
        },
        EventCategory::Homework => {
            if offset == 0 {
                format!("Finish {title}")
            } else {
                format!("Start working on {title}")
            }
        }
        EventCategory::Project => {
            if offset == 0 {
                format!("Finalize {title}")
            } else {
                format!("Work on {title}")
            }
        }
        EventCategory::General => {
            if offset == 0 {
                format!("Prepare for {title}")
            } else {
                format!("Start preparing for {title}")
            }
        }
    }
}

/// Group suggestions by the calendar day they fall on, for display.
pub fn group_suggestions_by_day(
    suggestions: &[StudySuggestion],
) -> BTreeMap<NaiveDate, Vec<StudySuggestion>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<StudySuggestion>> = BTreeMap::new();
    for suggestion in suggestions {
        grouped
            .entry(calendar_math::day_key(suggestion.start))
            .or_default()
            .push(suggestion.clone());
    }
    grouped
}
