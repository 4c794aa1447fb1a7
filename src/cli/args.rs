use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::model::Priority;

#[derive(Parser)]
#[command(name = "memory-cue")]
#[command(about = "Quick capture of reminders and notes with natural-language dates")]
#[command(long_about = "memory-cue - reminders and notes from the command line

Type entries the way you would say them. Dates, times, priorities and
categories are picked out of the text; prefixes decide where it goes.

QUICK START:
  memory-cue add \"mark reports 14/09/2025 16:00\"
  memory-cue add \"footy drill: cone weave tomorrow 4pm\"
  memory-cue add \"reflection: kids loved the relay game\"
  memory-cue search \"Monday 4pm\"
  memory-cue list

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

DATA:
  Stored in ~/.memory-cue/ (override with MEMORY_CUE_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quick add a reminder or note with natural language
    ///
    /// # Examples
    ///
    ///   memory-cue add "buy oranges tomorrow"
    ///   memory-cue add "mark reports 14/09/2025 16:00 !high"
    ///   memory-cue add "task: email parents #Admin"
    ///   memory-cue add "footy drill: cone weave demain 20h"
    ///   memory-cue add "reflection: calm lesson after lunch"
    ///
    /// # Supported Patterns
    ///
    ///   Prefixes:   footy drill:, task:, reflection:
    ///   Dates:      today, tomorrow, next week, hoy, mañana, demain,
    ///               2025-09-14, 14/09/2025, 14.09, friday, dec 15, in 3 days
    ///   Times:      4pm, 16:00, 4:30 pm, 20h, morning, evening
    ///   Priority:   !high, !medium, !low
    ///   Category:   #name
    #[command(alias = "a")]
    Add(QuickAddArgs),

    /// Show the date and time a phrase resolves to
    ///
    /// # Examples
    ///
    ///   memory-cue when "14/09/2025 16:00"
    ///   memory-cue when "mañana 8am" -o json
    When {
        /// Text to resolve
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Search open reminders by keyword and time
    ///
    /// A weekday or relative day, optionally with a time, filters by due
    /// date. Everything else is a keyword matched against title, category
    /// and notes.
    ///
    /// # Examples
    ///
    ///   memory-cue search "Monday 4pm"
    ///   memory-cue search tomorrow footy
    ///   memory-cue inbox "mark reports"
    #[command(alias = "inbox")]
    Search {
        /// Query text (empty lists everything)
        query: Vec<String>,

        /// Include completed reminders
        #[arg(long)]
        all: bool,
    },

    /// List reminders by priority and due date
    #[command(alias = "ls")]
    List {
        /// Include completed reminders
        #[arg(long)]
        all: bool,

        /// Only show this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Mark a reminder as done
    Done {
        /// Reminder ID
        id: i64,
    },

    /// Mark a reminder as not done
    Undone {
        /// Reminder ID
        id: i64,
    },

    /// Delete a reminder
    #[command(alias = "rm")]
    Remove {
        /// Reminder ID
        id: i64,
    },

    /// Export all reminders as a JSON array
    ///
    /// # Examples
    ///
    ///   memory-cue export > reminders.json
    ///   memory-cue export --file backup.json
    Export {
        /// Write to this file instead of standard output
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Import reminders from a JSON array
    ///
    /// Each reminder gets a new id. At most 500 are read from one file.
    Import {
        /// File written by `memory-cue export`
        file: PathBuf,
    },

    /// List notes
    Notes {
        /// Only show notes in this folder
        #[arg(long, short = 'f')]
        folder: Option<String>,
    },

    /// List note folders
    Folders,

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: memory-cue completions bash > ~/.bash_completion.d/memory-cue
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

/// Arguments for quick add command with natural language parsing.
#[derive(Args)]
pub struct QuickAddArgs {
    /// The entry in natural language
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Only parse and show where the entry would go, don't save it
    #[arg(long)]
    pub parse_only: bool,

    /// Override the detected category (reminders only)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Override the detected priority (reminders only)
    #[arg(long, short = 'p', value_enum)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
