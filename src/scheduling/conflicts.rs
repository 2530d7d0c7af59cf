//! Conflict detection and interactive suggestion editing.

use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulingConfig;
use crate::error::{Result, SchedulingError};

use super::calendar_math;
use super::types::{CalendarEvent, StudySuggestion};

/// Find calendar events overlapping `[start, end)`.
///
/// The target event itself, its own study sessions, and all-day events never
/// count as conflicts. Returns `None` when the interval is clear.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events: &[CalendarEvent],
    target_event_id: &str,
) -> Option<Vec<CalendarEvent>> {
    let conflicts: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| e.id != target_event_id)
        .filter(|e| !(e.is_study_session && e.related_event_id.as_deref() == Some(target_event_id)))
        .filter(|e| !e.all_day)
        .filter(|e| e.overlaps(start, end))
        .cloned()
        .collect();

    (!conflicts.is_empty()).then_some(conflicts)
}

/// Replace a suggestion in a list by identity, returning a new list.
///
/// Matching is by suggestion id rather than position, so an edited copy can
/// be swapped in regardless of how the list has been reordered elsewhere.
pub fn replace_suggestion(
    suggestions: &[StudySuggestion],
    edited: StudySuggestion,
) -> Result<Vec<StudySuggestion>> {
    if !suggestions.iter().any(|s| s.id == edited.id) {
        return Err(SchedulingError::UnknownSuggestion(edited.id).into());
    }

    Ok(suggestions
        .iter()
        .map(|s| {
            if s.id == edited.id {
                edited.clone()
            } else {
                s.clone()
            }
        })
        .collect())
}

/// Apply a user edit to one suggestion, re-validating against the calendar.
///
/// The edited range must be a well-formed session: start before end, both
/// ends on the session grid, and at least the minimum session length.
/// Saving is refused while the edited time range still conflicts; the
/// returned list is a new list with the edited suggestion swapped in by
/// identity.
pub fn apply_edit(
    suggestions: &[StudySuggestion],
    suggestion_id: &str,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
    events: &[CalendarEvent],
    target_event_id: &str,
    config: &SchedulingConfig,
) -> Result<Vec<StudySuggestion>> {
    let original = suggestions
        .iter()
        .find(|s| s.id == suggestion_id)
        .ok_or_else(|| SchedulingError::UnknownSuggestion(suggestion_id.to_string()))?;

    validate_session_range(new_start, new_end, config)?;

    if let Some(conflicts) = find_conflicts(new_start, new_end, events, target_event_id) {
        return Err(SchedulingError::EditConflicts(conflicts.len()).into());
    }

    replace_suggestion(suggestions, original.rescheduled(new_start, new_end))
}

/// Check an edited time range against the session invariants.
fn validate_session_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Result<()> {
    if start >= end {
        return Err(
            SchedulingError::InvalidSessionRange("start must be before end".to_string()).into(),
        );
    }
    if calendar_math::floor_to_step(start, config.slot_step_minutes) != start
        || calendar_math::floor_to_step(end, config.slot_step_minutes) != end
    {
        return Err(SchedulingError::InvalidSessionRange(format!(
            "times must align to the {}-minute grid",
            config.slot_step_minutes
        ))
        .into());
    }
    if end - start < Duration::minutes(config.min_session_minutes) {
        return Err(SchedulingError::InvalidSessionRange(format!(
            "sessions must be at least {} minutes",
            config.min_session_minutes
        ))
        .into());
    }
    Ok(())
}

/// Suggestions in a batch that overlap an existing calendar event.
pub fn conflicting_suggestions<'a>(
    suggestions: &'a [StudySuggestion],
    events: &[CalendarEvent],
    target_event_id: &str,
) -> Vec<&'a StudySuggestion> {
    suggestions
        .iter()
        .filter(|s| find_conflicts(s.start, s.end, events, target_event_id).is_some())
        .collect()
}
