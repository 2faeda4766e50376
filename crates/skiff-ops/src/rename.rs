//! Rename operation.

use std::path::{Path, PathBuf};

use skiff_core::FsError;

use crate::create::validate_filename;

/// Rename a file or directory in place, returning the new path.
///
/// The new name is a sibling name, not a path. Renaming onto an existing
/// entry fails; renaming to the current name is a no-op that still
/// succeeds.
pub fn rename_entry(source: &Path, new_name: &str) -> Result<PathBuf, FsError> {
    validate_filename(new_name)?;

    if !source.exists() {
        return Err(FsError::NotFound {
            path: source.to_path_buf(),
        });
    }

    let parent = source.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(new_name);

    if new_path.exists() && new_path != source {
        return Err(FsError::AlreadyExists { path: new_path });
    }

    std::fs::rename(source, &new_path).map_err(|e| FsError::io(source, e))?;
    tracing::debug!(target: "ops", "renamed {} -> {}", source.display(), new_path.display());
    Ok(new_path)
}
