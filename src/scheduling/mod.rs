//! Preparation scheduling engine.
//!
//! This module turns a user's preparation request into concrete study
//! sessions:
//!
//! - **Eligibility Scanner**: find events needing an hours prompt or a
//!   suggestion round
//! - **Event Classifier**: keyword-based category detection
//! - **Availability Calculator**: free slots within the daily working window
//! - **Allocation Planner**: weighted hours-per-day distribution with
//!   redistribution away from full days
//! - **Session Packer**: greedy packing into 15-minute-aligned sessions
//! - **Conflict Checker**: overlap detection and suggestion editing
//! - **Lifecycle Tracker**: the per-event state gating (re-)generation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       StudyPlanner                            │
//! │  - scan for prompts / suggestion rounds                       │
//! │  - generate (provider first, deterministic fallback)          │
//! │  - commit / reject with compare-and-set flag updates          │
//! └──────────────────────────────────────────────────────────────┘
//!                │                                  │
//!                ▼                                  ▼
//! ┌────────────────────────────┐   ┌──────────────────────────────┐
//! │  Pure engine               │   │  EventStore                   │
//! │  classify → plan → pack    │   │  (snapshots, sessions, flags) │
//! │  availability / conflicts  │   └──────────────────────────────┘
//! └────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use prepflow::{MemoryEventStore, StudyPlanner};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryEventStore::new());
//! let planner = StudyPlanner::new(store);
//!
//! // Which events should we prompt or plan for?
//! let prompts = planner.events_needing_hours_input().await?;
//! let due = planner.events_needing_suggestions().await?;
//!
//! // Generate, let the user decide, then commit or reject
//! let round = planner.suggestions_for(&due[0].id, false).await?;
//! let sessions = planner.commit(&round, &round.suggestions, false).await?;
//! ```

pub mod allocation;
pub mod availability;
pub mod calendar_math;
pub mod classify;
pub mod conflicts;
pub mod eligibility;
mod engine;
pub mod lifecycle;
mod packing;
mod provider;
pub mod types;

pub use engine::{generate_suggestions, StudyPlanner, SuggestionRound};
pub use packing::{group_suggestions_by_day, pack};
pub use provider::SuggestionProvider;
pub use types::{
    CalendarEvent, DayAllocation, EventCategory, FreeSlot, StudySuggestion, SuggestionPriority,
};
