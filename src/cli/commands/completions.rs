//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::MemoryCueError;

/// Generate the completion script for the named shell.
///
/// # Errors
///
/// Returns an error if the shell is unknown.
pub fn completions(shell: &str) -> Result<String, MemoryCueError> {
    let shell = shell_from_str(shell).ok_or_else(|| {
        MemoryCueError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), "memory-cue", &mut buf);
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}
