//! Command implementations for memory-cue.
//!
//! Every command returns the text to print, already formatted for the
//! selected output format.

mod add;
mod completions;
mod config;
mod notes;
mod reminders;
mod transfer;

pub use add::quick_add;
pub use completions::{completions, shell_from_str};
pub use config::config;
pub use notes::{folders, notes};
pub use reminders::{list, remove, search, set_done, when};
pub use transfer::{export, import};

use chrono::Duration;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::core::NaturalEngine;
use crate::error::MemoryCueError;
use crate::features::nlp::{InboxQueryParser, QuickWhenParser};
use crate::storage::{Database, NoteStore};

/// Everything a command needs: configuration, data paths and output format.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub paths: Paths,
    pub format: OutputFormat,
}

impl Context {
    /// Build a context, letting `--output` override the configured default.
    #[must_use]
    pub fn new(config: Config, paths: Paths, output: Option<OutputFormat>) -> Self {
        let format = output.unwrap_or(config.general.default_output);
        Self {
            config,
            paths,
            format,
        }
    }

    /// Open the database, making sure the reflections folder exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open_database(&self) -> Result<Database, MemoryCueError> {
        self.paths.ensure_dirs()?;
        let db = Database::open_at(&self.paths.database)?;
        NoteStore::new(&db).ensure_folder(&self.config.quick_add.reflections_folder)?;
        Ok(db)
    }

    /// Quick-add date parser, with the natural-language engine when enabled.
    #[must_use]
    pub fn when_parser(&self) -> QuickWhenParser {
        if self.config.parser.natural_engine {
            QuickWhenParser::with_engine(Box::new(NaturalEngine::new()))
        } else {
            QuickWhenParser::new()
        }
    }

    /// Inbox query parser using the configured window.
    #[must_use]
    pub fn inbox_parser(&self) -> InboxQueryParser {
        InboxQueryParser::new(Duration::minutes(i64::from(
            self.config.parser.inbox_window_minutes,
        )))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// A context rooted in a fresh temporary directory.
    pub fn context(format: OutputFormat) -> (TempDir, Context) {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        (dir, Context::new(Config::default(), paths, Some(format)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_override() {
        let paths = Paths::with_root("/tmp/memory-cue-test".into());
        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;

        assert_eq!(
            Context::new(config.clone(), paths.clone(), None).format,
            OutputFormat::Json
        );
        assert_eq!(
            Context::new(config, paths, Some(OutputFormat::Pretty)).format,
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_engine_toggle() {
        let (_dir, mut ctx) = test_support::context(OutputFormat::Pretty);
        assert!(ctx.when_parser().has_engine());

        ctx.config.parser.natural_engine = false;
        assert!(!ctx.when_parser().has_engine());
    }

    #[test]
    fn test_open_database_creates_reflections_folder() {
        let (_dir, ctx) = test_support::context(OutputFormat::Pretty);
        let db = ctx.open_database().unwrap();

        let store = NoteStore::new(&db);
        assert!(store
            .find_folder(&ctx.config.quick_add.reflections_folder)
            .unwrap()
            .is_some());
        assert_eq!(store.list_folders().unwrap().len(), 2);
    }
}
