//! memory-cue - quick capture of reminders and notes from the command line
//!
//! This crate parses free-form quick-add text ("footy drill: cone weave
//! tomorrow 4pm") into reminders and notes, resolves inbox searches with a
//! time filter, and keeps everything in a local `SQLite` database.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod model;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::MemoryCueError;
