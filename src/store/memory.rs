//! In-memory event store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::scheduling::CalendarEvent;

use super::traits::EventStore;

/// In-memory [`EventStore`] backed by a `RwLock`-protected map.
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<String, CalendarEvent>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with events.
    pub fn with_events(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let events = events
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        Self {
            events: RwLock::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create_event(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(StoreError::DuplicateEvent(event.id).into());
        }
        debug!("Created event: {} ({})", event.title, event.id);
        events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: &str) -> Result<Option<CalendarEvent>> {
        let events = self.events.read().await;
        Ok(events.get(id).cloned())
    }

    async fn update_event(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        let mut events = self.events.write().await;
        if !events.contains_key(&event.id) {
            return Err(StoreError::EventNotFound(event.id).into());
        }
        events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn delete_event(&self, id: &str) -> Result<bool> {
        let mut events = self.events.write().await;
        let existed = events.remove(id).is_some();
        if existed {
            debug!("Deleted event: {id}");
        }
        Ok(existed)
    }

    async fn list_events(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CalendarEvent>> {
        let events = self.events.read().await;
        let mut listed: Vec<CalendarEvent> = events
            .values()
            .filter(|e| match range {
                Some((start, end)) => e.overlaps(start, end),
                None => true,
            })
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(listed)
    }

    async fn compare_and_set_flags(
        &self,
        id: &str,
        expected_shown: Option<bool>,
        shown: bool,
        accepted: bool,
    ) -> Result<CalendarEvent> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(id)
            .ok_or_else(|| StoreError::EventNotFound(id.to_string()))?;

        if event.suggestions_shown != expected_shown {
            return Err(StoreError::FlagConflict {
                event_id: id.to_string(),
                expected: expected_shown,
                found: event.suggestions_shown,
            }
            .into());
        }

        event.suggestions_shown = Some(shown);
        event.suggestions_accepted = accepted;
        event.updated_at = Utc::now();
        debug!(
            "Updated suggestion flags for {id}: shown={shown}, accepted={accepted}"
        );
        Ok(event.clone())
    }
}
