//! Lifecycle tests: the accept/reject flow over a live store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use prepflow::{
    CalendarEvent, EventStore, MemoryEventStore, PrepflowError, PreparationStatus,
    SchedulingError, StoreError, StudyPlanner,
};

fn exam() -> CalendarEvent {
    let start = Utc::now() + Duration::days(5);
    CalendarEvent::with_id("exam-1", "Final Exam", start, start + Duration::hours(2))
        .requiring_preparation()
}

fn planner_with(event: CalendarEvent) -> StudyPlanner<MemoryEventStore> {
    StudyPlanner::new(Arc::new(MemoryEventStore::with_events([event])))
}

#[tokio::test]
async fn test_accept_flow_walks_the_states() {
    let planner = planner_with(exam());
    let store = planner.store();

    let event = store.get_event("exam-1").await.unwrap().unwrap();
    assert_eq!(PreparationStatus::of(&event), PreparationStatus::NeedsHoursInput);

    // User enters hours and the event is queued for the next scan
    let mut event = event;
    event.preparation_hours = Some(6.0);
    event.suggestions_shown = Some(false);
    let event = store.update_event(event).await.unwrap();
    assert_eq!(PreparationStatus::of(&event), PreparationStatus::PendingSuggestion);

    let due = planner.events_needing_suggestions().await.unwrap();
    assert_eq!(due.len(), 1);

    let round = planner.suggestions_for("exam-1", false).await.unwrap();
    assert!(!round.suggestions.is_empty());

    planner.commit(&round, &round.suggestions, false).await.unwrap();
    let event = store.get_event("exam-1").await.unwrap().unwrap();
    assert_eq!(PreparationStatus::of(&event), PreparationStatus::Accepted);
    assert!(PreparationStatus::of(&event).is_terminal());

    // Accepted events leave every scan
    assert!(planner.events_needing_suggestions().await.unwrap().is_empty());
    assert!(planner.events_needing_hours_input().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reject_then_forced_round() {
    let event = exam()
        .with_preparation_hours(4.0)
        .with_suggestions_shown(false);
    let planner = planner_with(event);

    let round = planner.suggestions_for("exam-1", false).await.unwrap();
    planner.reject(&round).await.unwrap();

    let stored = planner.store().get_event("exam-1").await.unwrap().unwrap();
    assert_eq!(PreparationStatus::of(&stored), PreparationStatus::Rejected);

    // Rejected events stay out of the automatic scan
    assert!(planner.events_needing_suggestions().await.unwrap().is_empty());
    let automatic = planner.suggestions_for("exam-1", false).await.unwrap();
    assert!(automatic.suggestions.is_empty());

    // But the user can force a fresh round and accept it
    let forced = planner.suggestions_for("exam-1", true).await.unwrap();
    assert!(!forced.suggestions.is_empty());

    planner.commit(&forced, &forced.suggestions, false).await.unwrap();
    let stored = planner.store().get_event("exam-1").await.unwrap().unwrap();
    assert_eq!(PreparationStatus::of(&stored), PreparationStatus::Accepted);
}

#[tokio::test]
async fn test_double_decision_loses_the_race() {
    let event = exam()
        .with_preparation_hours(4.0)
        .with_suggestions_shown(false);
    let planner = planner_with(event);

    let round_a = planner.suggestions_for("exam-1", false).await.unwrap();
    let round_b = planner.suggestions_for("exam-1", false).await.unwrap();

    planner.reject(&round_a).await.unwrap();

    // Round B was generated against the pre-decision flags
    let result = planner.commit(&round_b, &round_b.suggestions, false).await;
    assert!(matches!(
        result,
        Err(PrepflowError::Store(StoreError::FlagConflict { .. }))
    ));

    // The losing commit wrote no sessions
    let events = planner.store().list_events(None).await.unwrap();
    assert!(events.iter().all(|e| !e.is_study_session));
}

#[tokio::test]
async fn test_accept_after_accept_is_invalid() {
    let event = exam()
        .with_preparation_hours(4.0)
        .with_suggestions_shown(false);
    let planner = planner_with(event);

    let round = planner.suggestions_for("exam-1", false).await.unwrap();
    planner.commit(&round, &round.suggestions, false).await.unwrap();

    let again = planner.commit(&round, &round.suggestions, false).await;
    assert!(matches!(
        again,
        Err(PrepflowError::Scheduling(SchedulingError::InvalidTransition { .. }))
    ));
    let rejected = planner.reject(&round).await;
    assert!(matches!(
        rejected,
        Err(PrepflowError::Scheduling(SchedulingError::InvalidTransition { .. }))
    ));
}
