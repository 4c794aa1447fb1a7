//! Feature implementations for memory-cue.
//!
//! - Natural language parsing (quick-add dates, routing, inbox queries)

pub mod nlp;
