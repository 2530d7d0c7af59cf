//! Core types for the preparation scheduling engine.
//!
//! This module defines calendar events as the engine sees them, plus the
//! transient values produced while planning: free slots, per-day allocations,
//! and study-session suggestions.

use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Calendar Event
// ============================================================================

/// A calendar event snapshot as consumed by the scheduling engine.
///
/// The engine treats events as read-only except for the two suggestion flag
/// fields, which it asks the store to update after an accept/reject decision.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CalendarEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Event description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Start time of the event.
    pub start: DateTime<Utc>,
    /// End time of the event.
    pub end: DateTime<Utc>,
    /// Whether this is an all-day event.
    #[serde(default)]
    pub all_day: bool,
    /// Whether the user flagged this event as requiring preparation time.
    #[serde(default)]
    pub requires_preparation: bool,
    /// Total preparation hours requested by the user, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_hours: Option<f64>,
    /// Whether suggestions have been shown for this event.
    ///
    /// `None` means the flag predates the feature; such events are not
    /// eligible for a suggestion round until the flag is explicitly set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions_shown: Option<bool>,
    /// Whether the user accepted a suggestion round. Terminal once true.
    #[serde(default)]
    pub suggestions_accepted: bool,
    /// Whether this event is itself a committed study session.
    #[serde(default)]
    pub is_study_session: bool,
    /// For study sessions, the event they were generated for.
    ///
    /// Weak reference: deleting the parent does not cascade; callers that
    /// want cascade semantics delete the sessions explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<String>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a new event with the given title and time range.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            all_day: false,
            requires_preparation: false,
            preparation_hours: None,
            suggestions_shown: None,
            suggestions_accepted: false,
            is_study_session: false,
            related_event_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an event with a specific ID.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(title, start, end)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the duration (recalculates the end time).
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.end = self.start + duration;
        self
    }

    /// Mark as an all-day event.
    pub fn all_day_event(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Flag the event as requiring preparation.
    pub fn requiring_preparation(mut self) -> Self {
        self.requires_preparation = true;
        self
    }

    /// Set the requested preparation hours.
    pub fn with_preparation_hours(mut self, hours: f64) -> Self {
        self.preparation_hours = Some(hours);
        self
    }

    /// Set the suggestions-shown flag.
    pub fn with_suggestions_shown(mut self, shown: bool) -> Self {
        self.suggestions_shown = Some(shown);
        self
    }

    /// Mark the event as a study session generated for `parent_id`.
    pub fn as_study_session(mut self, parent_id: impl Into<String>) -> Self {
        self.is_study_session = true;
        self.related_event_id = Some(parent_id.into());
        self
    }

    /// Duration of the event.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Requested preparation hours, if finite and positive.
    pub fn usable_preparation_hours(&self) -> Option<f64> {
        self.preparation_hours
            .filter(|h| h.is_finite() && *h > 0.0)
    }

    /// Whether the event blocks calendar time for scheduling purposes.
    ///
    /// All-day events and study sessions never block.
    pub fn blocks_time(&self) -> bool {
        !self.all_day && !self.is_study_session
    }

    /// Half-open overlap test against an interval.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

// ============================================================================
// Free Slots and Allocations
// ============================================================================

/// A gap within the working window not covered by any busy interval.
///
/// Transient: computed per day and consumed from the front as sessions are
/// packed into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FreeSlot {
    /// Start of the free time.
    pub start: DateTime<Utc>,
    /// End of the free time.
    pub end: DateTime<Utc>,
}

impl FreeSlot {
    /// Create a new free slot.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Slot length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Preparation hours assigned to one day before the target event.
///
/// Offset 0 is the day immediately preceding the event. Redistribution may
/// increase an allocation when an earlier offset turns out to have no free
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayAllocation {
    /// Zero-based day offset before the event.
    pub offset: u32,
    /// Hours assigned to this day.
    pub hours: f64,
}

impl DayAllocation {
    /// Create a new allocation.
    pub fn new(offset: u32, hours: f64) -> Self {
        Self { offset, hours }
    }
}

// ============================================================================
// Study Suggestions
// ============================================================================

/// Priority tier of a suggestion, based on how close its day is to the event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    /// The day immediately before the event.
    High,
    /// Two days before the event.
    Medium,
    /// Further out.
    Low,
}

impl SuggestionPriority {
    /// Priority tier for a day offset.
    pub fn for_offset(offset: u32) -> Self {
        match offset {
            0 => SuggestionPriority::High,
            1 => SuggestionPriority::Medium,
            _ => SuggestionPriority::Low,
        }
    }
}

/// A proposed, not-yet-committed study session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StudySuggestion {
    /// Identity of the suggestion, used for replace-by-identity editing.
    pub id: String,
    /// The event this suggestion prepares for.
    pub event_id: String,
    /// Suggested start time.
    pub start: DateTime<Utc>,
    /// Suggested end time.
    pub end: DateTime<Utc>,
    /// Human-readable message describing the session.
    pub message: String,
    /// Priority tier.
    pub priority: SuggestionPriority,
    /// One-based index of this session within its round, if numbered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_index: Option<u32>,
    /// Total session count within the round, if numbered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_count: Option<u32>,
}

impl StudySuggestion {
    /// Create a new suggestion.
    pub fn new(
        event_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        message: impl Into<String>,
        priority: SuggestionPriority,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.into(),
            start,
            end,
            message: message.into(),
            priority,
            session_index: None,
            session_count: None,
        }
    }

    /// Session length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Return a copy moved to a new time range, keeping its identity.
    pub fn rescheduled(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

// ============================================================================
// Event Category
// ============================================================================

/// Category of an event, derived from its text and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Exams, tests, quizzes.
    Exam,
    /// Homework, assignments, problem sets.
    Homework,
    /// Projects, presentations, papers.
    Project,
    /// Everything else.
    #[default]
    General,
}

impl EventCategory {
    /// Get a human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            EventCategory::Exam => "Exam",
            EventCategory::Homework => "Homework",
            EventCategory::Project => "Project",
            EventCategory::General => "General",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
