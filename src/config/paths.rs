//! Path resolution for memory-cue configuration and data files.
//!
//! Data lives in `$MEMORY_CUE_HOME`, or `~/.memory-cue/` when unset:
//! - `config.yaml` - Main configuration file
//! - `memory-cue.db` - SQLite database for reminders, notes and folders

use std::path::PathBuf;

use crate::error::MemoryCueError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "MEMORY_CUE_HOME";

/// Paths to memory-cue configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory.
    pub root: PathBuf,
    /// Config file: `<root>/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `<root>/memory-cue.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `MEMORY_CUE_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, MemoryCueError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            MemoryCueError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".memory-cue")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("memory-cue.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), MemoryCueError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                MemoryCueError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
