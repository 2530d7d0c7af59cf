//! Optional external suggestion provider.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{CalendarEvent, StudySuggestion};

/// An external source of study suggestions.
///
/// When configured, the planner asks the provider first and falls back to
/// the deterministic engine if it errors or returns nothing usable.
/// Provider failures are swallowed by the caller and never surface as user
/// errors.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Propose suggestions for an event and a requested number of hours.
    async fn suggest(
        &self,
        event: &CalendarEvent,
        preparation_hours: f64,
    ) -> Result<Vec<StudySuggestion>>;
}
