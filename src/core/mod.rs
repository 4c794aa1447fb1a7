//! Core abstractions for memory-cue.
//!
//! Shared date/time value types and the pluggable date engine.

mod datetime;
mod engine;

pub use datetime::{local_to_utc, resolve_local, QuickWhen, TimeRange};
#[cfg(test)]
pub use engine::MockDateEngine;
pub use engine::{DateEngine, DateEngineError, EngineMatch, NaturalEngine};
