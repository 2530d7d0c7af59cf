//! Event storage abstraction.
//!
//! The engine only ever sees event snapshots; reads and writes go through
//! the [`EventStore`] trait so real deployments can plug in their own
//! persistence. [`MemoryEventStore`] is the in-memory implementation used
//! for tests and embedding.

mod memory;
mod traits;

pub use memory::MemoryEventStore;
pub use traits::EventStore;
