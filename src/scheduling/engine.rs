//! Suggestion generation and the planner facade.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::SchedulingConfig;
use crate::error::{Result, SchedulingError, StoreError};
use crate::store::EventStore;

use super::allocation;
use super::classify::classify;
use super::conflicts;
use super::eligibility::{self, HoursPrompt};
use super::packing;
use super::provider::SuggestionProvider;
use super::types::{CalendarEvent, StudySuggestion};

// ============================================================================
// Pure generation
// ============================================================================

/// Generate study suggestions for one event against a calendar snapshot.
///
/// Returns an empty list for non-positive or non-finite hours, for events
/// starting in under the configured lead time, and always for accepted
/// events. Without `force`, events outside the suggestion window or already
/// shown also yield nothing; `force` bypasses those two gates only.
pub fn generate_suggestions(
    event: &CalendarEvent,
    calendar: &[CalendarEvent],
    preparation_hours: f64,
    force: bool,
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> Vec<StudySuggestion> {
    if !passes_generation_gates(event, preparation_hours, force, now, config) {
        return Vec::new();
    }

    let days_until_event = super::calendar_math::days_until(now, event.start);
    let category = classify(&event.title, event.description.as_deref());
    let allocations = allocation::plan(category, preparation_hours, days_until_event);

    packing::pack(allocations, category, event, calendar, now, config)
}

/// The gating rules shared by the deterministic engine and the provider path.
fn passes_generation_gates(
    event: &CalendarEvent,
    preparation_hours: f64,
    force: bool,
    now: DateTime<Utc>,
    config: &SchedulingConfig,
) -> bool {
    if event.suggestions_accepted {
        debug!(event = %event.id, "suggestions already accepted; not regenerating");
        return false;
    }
    if !preparation_hours.is_finite() || preparation_hours <= 0.0 {
        return false;
    }
    if event.start - now < Duration::hours(config.min_lead_hours) {
        debug!(event = %event.id, "event starts too soon for preparation");
        return false;
    }
    if !force {
        if event.suggestions_shown == Some(true) {
            return false;
        }
        let horizon = now + Duration::days(config.suggestion_window_days);
        if event.start > horizon {
            return false;
        }
    }
    true
}

// ============================================================================
// Suggestion Round
// ============================================================================

/// One generated batch of suggestions, carrying the freshness data needed
/// to commit it safely later.
#[derive(Debug, Clone)]
pub struct SuggestionRound {
    /// Snapshot of the parent event at generation time.
    pub parent: CalendarEvent,
    /// The generated suggestions, sorted by start time.
    pub suggestions: Vec<StudySuggestion>,
    /// Hours the round was generated for.
    pub preparation_hours: f64,
    /// When the round was generated.
    pub generated_at: DateTime<Utc>,
}

impl SuggestionRound {
    /// Suggestions grouped by calendar day, for display.
    pub fn grouped_by_day(
        &self,
    ) -> std::collections::BTreeMap<chrono::NaiveDate, Vec<StudySuggestion>> {
        packing::group_suggestions_by_day(&self.suggestions)
    }
}

// ============================================================================
// Study Planner
// ============================================================================

/// Facade over the scheduling engine and an event store.
///
/// Owns no state of its own beyond configuration; all gating flags live on
/// the persisted event records and are updated with compare-and-set.
pub struct StudyPlanner<S: EventStore> {
    store: Arc<S>,
    provider: Option<Arc<dyn SuggestionProvider>>,
    config: SchedulingConfig,
}

impl<S: EventStore> StudyPlanner<S> {
    /// Create a planner over the given store with default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            provider: None,
            config: SchedulingConfig::default(),
        }
    }

    /// Use a custom scheduling configuration.
    pub fn with_config(mut self, config: SchedulingConfig) -> Self {
        self.config = config;
        self
    }

    /// Ask an external provider before the deterministic engine.
    pub fn with_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Events that should prompt the user for preparation hours.
    pub async fn events_needing_hours_input(&self) -> Result<Vec<HoursPrompt>> {
        let events = self.store.list_events(None).await?;
        Ok(eligibility::find_events_needing_hours_input(
            &events,
            Utc::now(),
            &self.config,
        ))
    }

    /// Events due for an automatic suggestion round.
    pub async fn events_needing_suggestions(&self) -> Result<Vec<CalendarEvent>> {
        let events = self.store.list_events(None).await?;
        Ok(eligibility::find_events_needing_suggestions(
            &events,
            Utc::now(),
            &self.config,
        ))
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate a suggestion round for an event.
    ///
    /// Consults the external provider first when one is configured; provider
    /// failures or unusable output fall back to the deterministic engine and
    /// are never surfaced as errors.
    pub async fn suggestions_for(&self, event_id: &str, force: bool) -> Result<SuggestionRound> {
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or_else(|| StoreError::EventNotFound(event_id.to_string()))?;
        let calendar = self.store.list_events(None).await?;
        let now = Utc::now();
        let hours = event.usable_preparation_hours().unwrap_or(0.0);

        let mut suggestions = Vec::new();
        if passes_generation_gates(&event, hours, force, now, &self.config) {
            suggestions = self.from_provider(&event, hours).await;
            if suggestions.is_empty() {
                suggestions =
                    generate_suggestions(&event, &calendar, hours, force, now, &self.config);
            }
        }

        debug!(
            event = %event.id,
            count = suggestions.len(),
            force,
            "generated suggestion round"
        );

        Ok(SuggestionRound {
            parent: event,
            suggestions,
            preparation_hours: hours,
            generated_at: now,
        })
    }

    /// Ask the external provider, swallowing any failure.
    async fn from_provider(&self, event: &CalendarEvent, hours: f64) -> Vec<StudySuggestion> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };
        match provider.suggest(event, hours).await {
            Ok(suggestions) => {
                let usable: Vec<StudySuggestion> = suggestions
                    .into_iter()
                    .filter(|s| s.start < s.end)
                    .collect();
                if usable.is_empty() {
                    debug!(event = %event.id, "provider returned nothing usable");
                }
                usable
            }
            Err(err) => {
                warn!(event = %event.id, error = %err, "suggestion provider failed; using fallback");
                Vec::new()
            }
        }
    }

    /// Conflicts of a single suggestion against the current calendar.
    pub async fn conflicts_for(
        &self,
        suggestion: &StudySuggestion,
    ) -> Result<Option<Vec<CalendarEvent>>> {
        let calendar = self.store.list_events(None).await?;
        Ok(conflicts::find_conflicts(
            suggestion.start,
            suggestion.end,
            &calendar,
            &suggestion.event_id,
        ))
    }

    // ========================================================================
    // Commit / Reject
    // ========================================================================

    /// Commit accepted suggestions as study-session events.
    ///
    /// `selected` may be the whole round or a subset. The parent's flags are
    /// compare-and-set against their generation-time value, so a concurrent
    /// round for the same event fails instead of double-committing. A batch
    /// containing conflicting suggestions needs `confirm_conflicts`.
    pub async fn commit(
        &self,
        round: &SuggestionRound,
        selected: &[StudySuggestion],
        confirm_conflicts: bool,
    ) -> Result<Vec<CalendarEvent>> {
        let parent = self
            .store
            .get_event(&round.parent.id)
            .await?
            .ok_or_else(|| StoreError::EventNotFound(round.parent.id.clone()))?;

        if parent.suggestions_accepted {
            return Err(SchedulingError::InvalidTransition {
                from: "Accepted".to_string(),
                to: "Accepted".to_string(),
            }
            .into());
        }

        // Freshness: the round is stale if the request changed under it
        if parent.preparation_hours != round.parent.preparation_hours {
            return Err(SchedulingError::StaleSuggestions(parent.id).into());
        }

        for suggestion in selected {
            if suggestion.event_id != parent.id {
                return Err(SchedulingError::SuggestionMismatch {
                    suggestion_id: suggestion.id.clone(),
                    event_id: parent.id.clone(),
                }
                .into());
            }
        }

        let calendar = self.store.list_events(None).await?;
        let conflicting = conflicts::conflicting_suggestions(selected, &calendar, &parent.id);
        if !conflicting.is_empty() && !confirm_conflicts {
            return Err(SchedulingError::ConflictsNotConfirmed(conflicting.len()).into());
        }

        // Flags first: losing the CAS means another trigger already
        // committed, and no sessions must be written
        self.store
            .compare_and_set_flags(&parent.id, round.parent.suggestions_shown, true, true)
            .await?;

        let mut created = Vec::with_capacity(selected.len());
        for suggestion in selected {
            let session = CalendarEvent::new(
                format!("[{}] {}", parent.title, suggestion.message),
                suggestion.start,
                suggestion.end,
            )
            .as_study_session(parent.id.as_str());
            created.push(self.store.create_event(session).await?);
        }

        debug!(
            event = %parent.id,
            sessions = created.len(),
            "committed suggestion round"
        );
        Ok(created)
    }

    /// Reject a suggestion round: record the decision, create nothing.
    pub async fn reject(&self, round: &SuggestionRound) -> Result<CalendarEvent> {
        let parent = self
            .store
            .get_event(&round.parent.id)
            .await?
            .ok_or_else(|| StoreError::EventNotFound(round.parent.id.clone()))?;

        if parent.suggestions_accepted {
            return Err(SchedulingError::InvalidTransition {
                from: "Accepted".to_string(),
                to: "Rejected".to_string(),
            }
            .into());
        }

        let updated = self
            .store
            .compare_and_set_flags(&parent.id, round.parent.suggestions_shown, true, false)
            .await?;
        debug!(event = %updated.id, "rejected suggestion round");
        Ok(updated)
    }
}

// ============================================================================
// Tests
// ============================================================================
