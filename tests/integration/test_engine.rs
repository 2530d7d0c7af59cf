//! End-to-end suggestion generation tests.

use std::sync::Arc;

use chrono::{Duration, NaiveTime, Timelike, Utc};

use prepflow::{
    CalendarEvent, EventStore, MemoryEventStore, StudyPlanner, SuggestionPriority, SuggestionRound,
};

/// A preparation-flagged event starting `days` from now.
fn prep_event(title: &str, days: i64, hours: f64) -> CalendarEvent {
    let start = Utc::now() + Duration::days(days);
    CalendarEvent::with_id(
        title.to_lowercase().replace(' ', "-"),
        title,
        start,
        start + Duration::hours(2),
    )
    .requiring_preparation()
    .with_preparation_hours(hours)
    .with_suggestions_shown(false)
}

/// A blocking meeting on the day `offset + 1` days before `target`'s start.
fn meeting_on_prep_day(
    target: &CalendarEvent,
    offset: i64,
    from: NaiveTime,
    to: NaiveTime,
) -> CalendarEvent {
    let date = target.start.date_naive() - Duration::days(offset + 1);
    CalendarEvent::new(
        "Meeting",
        date.and_time(from).and_utc(),
        date.and_time(to).and_utc(),
    )
}

/// Invariants every committed-quality round must satisfy.
fn assert_round_invariants(round: &SuggestionRound, calendar: &[CalendarEvent]) {
    let suggestions = &round.suggestions;
    assert!(
        suggestions.windows(2).all(|w| w[0].end <= w[1].start),
        "suggestions must not overlap each other"
    );
    let total: i64 = suggestions.iter().map(|s| s.duration_minutes()).sum();
    assert!(
        total as f64 <= round.preparation_hours * 60.0,
        "scheduled {total} minutes for a {}-minute request",
        round.preparation_hours * 60.0
    );
    for s in suggestions {
        assert!(s.duration_minutes() >= 30, "session shorter than 30 minutes");
        assert_eq!(s.start.minute() % 15, 0, "start off the 15-minute grid");
        assert_eq!(s.end.minute() % 15, 0, "end off the 15-minute grid");
        assert_eq!(s.start.second(), 0);
        assert!(s.start.time() >= NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert!(s.end.time() <= NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert!(s.end <= round.parent.start, "session after the event itself");
        for event in calendar {
            if event.blocks_time() {
                assert!(
                    !event.overlaps(s.start, s.end),
                    "session overlaps '{}'",
                    event.title
                );
            }
        }
    }
}

#[tokio::test]
async fn test_exam_round_front_loads_toward_event() {
    let exam = prep_event("Final Exam", 5, 6.0);
    let store = Arc::new(MemoryEventStore::with_events([exam]));
    let planner = StudyPlanner::new(store);

    let round = planner.suggestions_for("final-exam", false).await.unwrap();
    assert_round_invariants(&round, &[]);

    // Six hours over five days spreads across three days
    let grouped = round.grouped_by_day();
    assert_eq!(grouped.len(), 3);

    // Sorted ascending: farthest day first, the eve of the exam last.
    // The farthest day is trimmed so the total lands exactly on the request
    let durations: Vec<i64> = round
        .suggestions
        .iter()
        .map(|s| s.duration_minutes())
        .collect();
    assert_eq!(durations, vec![90, 120, 150]);
    assert_eq!(durations.iter().sum::<i64>(), 360);

    let first = round.suggestions.first().unwrap();
    let last = round.suggestions.last().unwrap();
    assert_eq!(first.priority, SuggestionPriority::Low);
    assert_eq!(last.priority, SuggestionPriority::High);
    assert_eq!(last.message, "Final review for Final Exam");

    // The largest share of time lands on the day before the exam
    let total: i64 = durations.iter().sum();
    assert!(last.duration_minutes() * 100 >= total * 38);
}

#[tokio::test]
async fn test_small_homework_gets_one_session() {
    let homework = prep_event("Math Homework", 3, 2.0);
    let store = Arc::new(MemoryEventStore::with_events([homework]));
    let planner = StudyPlanner::new(store);

    let round = planner.suggestions_for("math-homework", false).await.unwrap();
    assert_round_invariants(&round, &[]);

    // Two hours fit in a single sitting on the day before the deadline
    assert_eq!(round.suggestions.len(), 1);
    let s = &round.suggestions[0];
    assert_eq!(s.duration_minutes(), 120);
    assert_eq!(s.priority, SuggestionPriority::High);
    assert_eq!(s.message, "Finish Math Homework");
    assert_eq!(s.start.date_naive(), round.parent.start.date_naive() - Duration::days(1));
}

#[tokio::test]
async fn test_event_outside_window_needs_force() {
    let exam = prep_event("Distant Exam", 10, 4.0);
    let store = Arc::new(MemoryEventStore::with_events([exam]));
    let planner = StudyPlanner::new(store);

    // Ten days out is past the automatic window
    let unforced = planner.suggestions_for("distant-exam", false).await.unwrap();
    assert!(unforced.suggestions.is_empty());

    let forced = planner.suggestions_for("distant-exam", true).await.unwrap();
    assert!(!forced.suggestions.is_empty());
    assert_round_invariants(&forced, &[]);
}

#[tokio::test]
async fn test_accepted_event_never_regenerates() {
    let mut exam = prep_event("Accepted Exam", 5, 4.0);
    exam.suggestions_shown = Some(true);
    exam.suggestions_accepted = true;
    let store = Arc::new(MemoryEventStore::with_events([exam]));
    let planner = StudyPlanner::new(store);

    let round = planner.suggestions_for("accepted-exam", true).await.unwrap();
    assert!(round.suggestions.is_empty());
}

#[tokio::test]
async fn test_sessions_route_around_meetings() {
    let exam = prep_event("Chemistry Exam", 3, 4.0);
    let morning = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let noon = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
    let meeting = meeting_on_prep_day(&exam, 0, morning, noon);

    let store = Arc::new(MemoryEventStore::with_events([exam, meeting.clone()]));
    let planner = StudyPlanner::new(store);

    let round = planner.suggestions_for("chemistry-exam", false).await.unwrap();
    assert!(!round.suggestions.is_empty());
    assert_round_invariants(&round, &[meeting]);
}

#[tokio::test]
async fn test_fully_booked_day_redistributes_forward() {
    let homework = prep_event("History Homework", 3, 4.0);
    let open = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
    // The day before the deadline is wall-to-wall busy
    let conference = meeting_on_prep_day(&homework, 0, open, close);
    let eve = homework.start.date_naive() - Duration::days(1);

    let store = Arc::new(MemoryEventStore::with_events([homework, conference.clone()]));
    let planner = StudyPlanner::new(store);

    let round = planner
        .suggestions_for("history-homework", false)
        .await
        .unwrap();
    assert!(!round.suggestions.is_empty());
    assert_round_invariants(&round, &[conference]);

    // All four hours moved to the earlier day
    let total: i64 = round.suggestions.iter().map(|s| s.duration_minutes()).sum();
    assert_eq!(total, 240);
    for s in &round.suggestions {
        assert_ne!(s.start.date_naive(), eve);
    }
}

#[tokio::test]
async fn test_committed_sessions_are_skipped_by_later_rounds() {
    let exam = prep_event("Physics Exam", 5, 4.0);
    let store = Arc::new(MemoryEventStore::with_events([exam]));
    let planner = StudyPlanner::new(store);

    let round = planner.suggestions_for("physics-exam", false).await.unwrap();
    let created = planner.commit(&round, &round.suggestions, false).await.unwrap();
    assert!(!created.is_empty());

    // A forced second round may reuse the same times: committed study
    // sessions do not block free time
    let again = planner.suggestions_for("physics-exam", true).await.unwrap();
    assert!(again.suggestions.is_empty(), "accepted parent must not regenerate");

    let events = planner.store().list_events(None).await.unwrap();
    let sessions: Vec<_> = events.iter().filter(|e| e.is_study_session).collect();
    assert_eq!(sessions.len(), created.len());
    for session in sessions {
        assert!(!session.blocks_time());
    }
}

#[tokio::test]
async fn test_scans_find_eligible_events() {
    let needs_hours = CalendarEvent::with_id(
        "quiz",
        "Pop Quiz",
        Utc::now() + Duration::days(4),
        Utc::now() + Duration::days(4) + Duration::hours(1),
    )
    .requiring_preparation();
    let due = prep_event("Biology Exam", 5, 4.0);
    let plain = CalendarEvent::new(
        "Lunch",
        Utc::now() + Duration::days(1),
        Utc::now() + Duration::days(1) + Duration::hours(1),
    );

    let store = Arc::new(MemoryEventStore::with_events([needs_hours, due, plain]));
    let planner = StudyPlanner::new(store);

    let prompts = planner.events_needing_hours_input().await.unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].event.id, "quiz");
    assert_eq!(prompts[0].suggested_hours, 3.0);

    let due_now = planner.events_needing_suggestions().await.unwrap();
    assert_eq!(due_now.len(), 1);
    assert_eq!(due_now[0].id, "biology-exam");
}
