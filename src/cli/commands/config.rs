//! Configuration commands.

use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::MemoryCueError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file exists and `--force` was not given,
/// or if reading or writing fails.
pub fn config(ctx: &Context, cmd: ConfigCommands) -> Result<String, MemoryCueError> {
    match cmd {
        ConfigCommands::Path => Ok(ctx.paths.config_file.display().to_string()),

        ConfigCommands::Show => match ctx.format {
            OutputFormat::Pretty => ctx.config.to_yaml(),
            OutputFormat::Json => to_json(&ctx.config),
        },

        ConfigCommands::Init { force } => {
            let path = &ctx.paths.config_file;
            if path.exists() && !force {
                return Err(MemoryCueError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            ctx.paths.ensure_dirs()?;
            Config::default().save_to_path(path)?;
            log::info!("wrote default config to {}", path.display());
            Ok(format!("{} {}", "Wrote".green().bold(), path.display()))
        },
    }
}
