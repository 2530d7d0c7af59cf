//! Prepflow: Preparation Scheduling Engine
//!
//! A scheduling library for personal calendars that turns "this event needs
//! preparation" into concrete, conflict-free study sessions placed in the
//! user's free time.

pub mod config;
pub mod error;
pub mod scheduling;
pub mod store;

pub use config::{Config, SchedulingConfig};
pub use error::{ConfigError, PrepflowError, Result, SchedulingError, StoreError};
pub use scheduling::{
    generate_suggestions, group_suggestions_by_day, CalendarEvent, DayAllocation, EventCategory,
    FreeSlot, StudyPlanner, StudySuggestion, SuggestionPriority, SuggestionProvider,
    SuggestionRound,
};
pub use scheduling::classify::classify;
pub use scheduling::eligibility::HoursPrompt;
pub use scheduling::lifecycle::PreparationStatus;
pub use store::{EventStore, MemoryEventStore};
