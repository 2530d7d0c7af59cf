//! Per-event preparation lifecycle.
//!
//! The persisted record carries the lifecycle as two flag fields
//! (`suggestions_shown`, `suggestions_accepted`); this module gives the
//! combined state a closed enum with named, fallible transitions so illegal
//! moves are errors instead of conventions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

use super::types::CalendarEvent;

/// Preparation state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PreparationStatus {
    /// Requires preparation but no hours set yet.
    NeedsHoursInput,
    /// Hours set, not yet queued for a suggestion round.
    HoursSet,
    /// Queued: the next scan will generate suggestions.
    PendingSuggestion,
    /// Suggestions generated and displayed, awaiting a decision.
    Shown,
    /// User accepted a round. Terminal: nothing regenerates past this.
    Accepted,
    /// User rejected the round. Only a forced round can re-queue.
    Rejected,
}

impl PreparationStatus {
    /// Derive the status from an event's persisted fields.
    pub fn of(event: &CalendarEvent) -> Self {
        if event.suggestions_accepted {
            PreparationStatus::Accepted
        } else if event.suggestions_shown == Some(true) {
            PreparationStatus::Rejected
        } else if event.usable_preparation_hours().is_some() {
            if event.suggestions_shown == Some(false) {
                PreparationStatus::PendingSuggestion
            } else {
                PreparationStatus::HoursSet
            }
        } else {
            PreparationStatus::NeedsHoursInput
        }
    }

    /// Record the user entering preparation hours.
    pub fn set_hours(self) -> Result<Self, SchedulingError> {
        match self {
            PreparationStatus::NeedsHoursInput => Ok(PreparationStatus::HoursSet),
            other => Err(other.invalid("HoursSet")),
        }
    }

    /// Queue the event for a suggestion round.
    ///
    /// Valid from `HoursSet`, and from `Rejected` for a forced round.
    /// `Accepted` never re-queues.
    pub fn queue(self) -> Result<Self, SchedulingError> {
        match self {
            PreparationStatus::HoursSet | PreparationStatus::Rejected => {
                Ok(PreparationStatus::PendingSuggestion)
            }
            other => Err(other.invalid("PendingSuggestion")),
        }
    }

    /// Record the suggestions being displayed.
    pub fn show(self) -> Result<Self, SchedulingError> {
        match self {
            PreparationStatus::PendingSuggestion => Ok(PreparationStatus::Shown),
            other => Err(other.invalid("Shown")),
        }
    }

    /// Record an accept decision.
    pub fn accept(self) -> Result<Self, SchedulingError> {
        match self {
            PreparationStatus::Shown => Ok(PreparationStatus::Accepted),
            other => Err(other.invalid("Accepted")),
        }
    }

    /// Record a reject decision.
    pub fn reject(self) -> Result<Self, SchedulingError> {
        match self {
            PreparationStatus::Shown => Ok(PreparationStatus::Rejected),
            other => Err(other.invalid("Rejected")),
        }
    }

    /// Whether the state admits no automatic regeneration.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PreparationStatus::Accepted | PreparationStatus::Rejected
        )
    }

    fn invalid(self, to: &str) -> SchedulingError {
        SchedulingError::InvalidTransition {
            from: format!("{self:?}"),
            to: to.to_string(),
        }
    }
}
