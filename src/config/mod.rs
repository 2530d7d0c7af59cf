//! Configuration for the prepflow scheduling engine.

mod settings;

pub use settings::{Config, SchedulingConfig};
