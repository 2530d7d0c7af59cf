//! Scanning a user's events for preparation prompts and suggestion rounds.

use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulingConfig;

use super::types::CalendarEvent;

/// An event that should prompt the user for preparation hours.
#[derive(Debug, Clone)]
pub struct HoursPrompt {
    /// The event needing input.
    pub event: CalendarEvent,
    /// Default hours to pre-fill in the prompt. Display only, never persisted.
    pub suggested_hours: f64,
}

/// Find events that need a preparation-hours prompt.
///
/// Matches events flagged as requiring preparation, starting within the
/// prompt window, with no usable hours value yet.
pub fn find_events_needing_hours_input(
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Vec<HoursPrompt> {
    let horizon = now + Duration::days(config.hours_prompt_window_days);

    events
        .iter()
        .filter(|e| e.requires_preparation)
        .filter(|e| e.start >= now && e.start <= horizon)
        .filter(|e| e.usable_preparation_hours().is_none())
        .map(|e| HoursPrompt {
            event: e.clone(),
            suggested_hours: config.default_preparation_hours,
        })
        .collect()
}

/// Find events due for a suggestion round.
///
/// An event qualifies when it starts within the suggestion window, requires
/// preparation, has usable hours, has `suggestions_shown` explicitly set to
/// `false`, and has not been accepted. An unset `suggestions_shown` is NOT
/// treated as false: events created before the flag existed stay out of the
/// automatic round until something sets the flag.
pub fn find_events_needing_suggestions(
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Vec<CalendarEvent> {
    let horizon = now + Duration::days(config.suggestion_window_days);

    events
        .iter()
        .filter(|e| e.requires_preparation)
        .filter(|e| e.start >= now && e.start <= horizon)
        .filter(|e| e.usable_preparation_hours().is_some())
        .filter(|e| e.suggestions_shown == Some(false))
        .filter(|e| !e.suggestions_accepted)
        .cloned()
        .collect()
}

/// Return a copy of the event with the suggestion round recorded.
pub fn record_suggestions_shown(event: &CalendarEvent, accepted: bool) -> CalendarEvent {
    let mut updated = event.clone();
    updated.suggestions_shown = Some(true);
    updated.suggestions_accepted = accepted;
    updated.updated_at = Utc::now();
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn prep_event(title: &str, start: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::new(title, start, start + Duration::hours(2)).requiring_preparation()
    }

    #[test]
    fn test_hours_prompt_window() {
        let now = at(1, 12);
        let config = SchedulingConfig::default();
        let events = vec![
            prep_event("In range", at(5, 9)),
            prep_event("Too far", at(20, 9)),
            prep_event("Past", at(1, 8)),
        ];

        let prompts = find_events_needing_hours_input(&events, now, &config);
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].event.title, "In range");
        assert_eq!(prompts[0].suggested_hours, 3.0);
    }

    #[test]
    fn test_hours_prompt_skips_set_hours() {
        let now = at(1, 12);
        let config = SchedulingConfig::default();
        let events = vec![
            prep_event("Has hours", at(5, 9)).with_preparation_hours(4.0),
            prep_event("Zero hours", at(5, 9)).with_preparation_hours(0.0),
            CalendarEvent::new("No prep", at(5, 9), at(5, 10)),
        ];

        let prompts = find_events_needing_hours_input(&events, now, &config);
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].event.title, "Zero hours");
    }

    #[test]
    fn test_suggestion_round_eligibility() {
        let now = at(1, 12);
        let config = SchedulingConfig::default();
        let events = vec![
            prep_event("Eligible", at(5, 9))
                .with_preparation_hours(4.0)
                .with_suggestions_shown(false),
            // Unset flag means legacy event, not eligible
            prep_event("Legacy", at(5, 9)).with_preparation_hours(4.0),
            prep_event("Already shown", at(5, 9))
                .with_preparation_hours(4.0)
                .with_suggestions_shown(true),
            // Outside the 8-day window
            prep_event("Too far", at(12, 9))
                .with_preparation_hours(4.0)
                .with_suggestions_shown(false),
            prep_event("No hours", at(5, 9)).with_suggestions_shown(false),
        ];

        let eligible = find_events_needing_suggestions(&events, now, &config);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].title, "Eligible");
    }

    #[test]
    fn test_accepted_events_never_eligible() {
        let now = at(1, 12);
        let config = SchedulingConfig::default();
        let mut event = prep_event("Accepted", at(5, 9))
            .with_preparation_hours(4.0)
            .with_suggestions_shown(false);
        event.suggestions_accepted = true;

        let eligible = find_events_needing_suggestions(&[event], now, &config);
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_record_suggestions_shown() {
        let event = prep_event("Exam", at(5, 9)).with_preparation_hours(4.0);

        let accepted = record_suggestions_shown(&event, true);
        assert_eq!(accepted.suggestions_shown, Some(true));
        assert!(accepted.suggestions_accepted);

        let rejected = record_suggestions_shown(&event, false);
        assert_eq!(rejected.suggestions_shown, Some(true));
        assert!(!rejected.suggestions_accepted);

        // Original snapshot untouched
        assert_eq!(event.suggestions_shown, None);
    }
}
