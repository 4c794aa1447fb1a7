//! Note and folder commands.

use super::Context;
use crate::error::MemoryCueError;
use crate::output::{format_folders, format_notes};
use crate::storage::NoteStore;

/// List notes, optionally in a single folder.
///
/// # Errors
///
/// Returns `NotFound` if the named folder does not exist.
pub fn notes(ctx: &Context, folder: Option<&str>) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    let store = NoteStore::new(&db);

    let folder_id = match folder {
        Some(name) => Some(
            store
                .find_folder(name.trim())?
                .ok_or_else(|| MemoryCueError::NotFound(format!("folder '{name}'")))?
                .id,
        ),
        None => None,
    };

    let notes = store.list_notes(folder_id)?;
    let folders = store.list_folders()?;
    format_notes(&notes, &folders, ctx.format)
}

/// List folders.
///
/// # Errors
///
/// Returns an error if the database fails or output formatting fails.
pub fn folders(ctx: &Context) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    let folders = NoteStore::new(&db).list_folders()?;
    format_folders(&folders, ctx.format)
}
