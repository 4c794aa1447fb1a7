//! Configuration settings for memory-cue.
//!
//! Settings are loaded from `config.yaml` in the data directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::MemoryCueError;
use crate::model::Priority;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Quick-add routing settings.
    pub quick_add: QuickAddConfig,
    /// Parser settings.
    pub parser: ParserConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Where quick-add entries go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuickAddConfig {
    /// Category for reminders with no prefix, tag or keyword match.
    pub default_category: String,
    /// Priority for reminders without a `!priority` token.
    pub default_priority: Priority,
    /// Category for `footy drill:` entries.
    pub footy_drill_category: String,
    /// Category for `task:` entries.
    pub task_category: String,
    /// Notes folder for `reflection:` entries. Always exists.
    pub reflections_folder: String,
    /// Category name to trigger words. The first category (alphabetical)
    /// with a word present in the text is used.
    pub category_keywords: BTreeMap<String, Vec<String>>,
}

/// Parser settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Consult the natural-language engine before the built-in stages.
    #[serde(default = "default_true")]
    pub natural_engine: bool,
    /// Length of the window an inbox query with a time selects.
    #[serde(default = "default_inbox_window")]
    pub inbox_window_minutes: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_true() -> bool {
    true
}

const fn default_inbox_window() -> u32 {
    60
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for QuickAddConfig {
    fn default() -> Self {
        Self {
            default_category: "General".to_string(),
            default_priority: Priority::Medium,
            footy_drill_category: "Footy – Drills".to_string(),
            task_category: "Tasks".to_string(),
            reflections_folder: "Lesson – Reflections".to_string(),
            category_keywords: BTreeMap::new(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            natural_engine: default_true(),
            inbox_window_minutes: default_inbox_window(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, MemoryCueError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, MemoryCueError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            MemoryCueError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            MemoryCueError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), MemoryCueError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            MemoryCueError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, MemoryCueError> {
        serde_yaml::to_string(self)
            .map_err(|e| MemoryCueError::Config(format!("Failed to serialize config: {e}")))
    }
}
