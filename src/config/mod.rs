//! Configuration management for memory-cue.
//!
//! This module handles loading and saving configuration from the data
//! directory (`$MEMORY_CUE_HOME` or `~/.memory-cue/`).

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, ParserConfig, QuickAddConfig};
