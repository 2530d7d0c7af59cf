//! Error types for the prepflow scheduling engine.

use thiserror::Error;

/// Main error type for prepflow operations.
#[derive(Error, Debug)]
pub enum PrepflowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Event-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event already exists: {0}")]
    DuplicateEvent(String),

    #[error("Flag conflict on event {event_id}: expected shown={expected:?}, found {found:?}")]
    FlagConflict {
        event_id: String,
        expected: Option<bool>,
        found: Option<bool>,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scheduling- and lifecycle-related errors.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Suggestions are stale for event {0}: event changed since generation")]
    StaleSuggestions(String),

    #[error("Batch contains {0} conflicting suggestion(s) and was not confirmed")]
    ConflictsNotConfirmed(usize),

    #[error("Edited suggestion still conflicts with {0} event(s)")]
    EditConflicts(usize),

    #[error("Invalid session time range: {0}")]
    InvalidSessionRange(String),

    #[error("Unknown suggestion id: {0}")]
    UnknownSuggestion(String),

    #[error("Suggestion {suggestion_id} does not belong to event {event_id}")]
    SuggestionMismatch {
        suggestion_id: String,
        event_id: String,
    },
}

/// Result type alias for prepflow operations.
pub type Result<T> = std::result::Result<T, PrepflowError>;
