//! Event store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::scheduling::CalendarEvent;

/// Storage backend for calendar events.
///
/// Implementations supply event snapshots to the scheduling engine and
/// accept the writes it needs: study-session creation and suggestion flag
/// updates. Flag updates use compare-and-set so two concurrent triggers
/// cannot both commit a round for the same event.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create a new event.
    async fn create_event(&self, event: CalendarEvent) -> Result<CalendarEvent>;

    /// Get an event by ID.
    async fn get_event(&self, id: &str) -> Result<Option<CalendarEvent>>;

    /// Replace an existing event.
    async fn update_event(&self, event: CalendarEvent) -> Result<CalendarEvent>;

    /// Delete an event by ID. Returns whether it existed.
    ///
    /// Study sessions referencing the deleted event are not cascaded;
    /// callers that want that must delete them explicitly.
    async fn delete_event(&self, id: &str) -> Result<bool>;

    /// List events, optionally restricted to those overlapping a range,
    /// sorted by start time.
    async fn list_events(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CalendarEvent>>;

    /// Atomically update the suggestion flags of an event.
    ///
    /// Fails with [`crate::error::StoreError::FlagConflict`] when the
    /// current `suggestions_shown` value does not match `expected_shown`,
    /// leaving the record untouched.
    async fn compare_and_set_flags(
        &self,
        id: &str,
        expected_shown: Option<bool>,
        shown: bool,
        accepted: bool,
    ) -> Result<CalendarEvent>;
}
