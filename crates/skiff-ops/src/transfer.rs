//! Low-level move, copy, and remove primitives shared by the operations.

use std::fs;
use std::path::Path;

use skiff_core::FsError;

/// Move a path, falling back to copy-and-delete across volumes.
pub(crate) fn move_path(from: &Path, to: &Path) -> Result<(), FsError> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            copy_any(from, to)?;
            remove_tree(from)
        }
        Err(e) => Err(FsError::io(from, e)),
    }
}

/// Copy a file or a whole directory tree.
pub(crate) fn copy_any(from: &Path, to: &Path) -> Result<u64, FsError> {
    if from.is_dir() {
        copy_dir_recursive(from, to)
    } else {
        copy_file(from, to)
    }
}

/// Copy a single file; permission bits travel with it.
pub(crate) fn copy_file(source: &Path, dest: &Path) -> Result<u64, FsError> {
    fs::copy(source, dest).map_err(|e| FsError::io(source, e))
}

/// Recursively copy a directory, returning the number of bytes copied.
pub(crate) fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<u64, FsError> {
    fs::create_dir_all(dest).map_err(|e| FsError::io(dest, e))?;

    let mut total_bytes = 0u64;

    let entries = fs::read_dir(source).map_err(|e| FsError::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(source, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if path.is_dir() {
            total_bytes += copy_dir_recursive(&path, &dest_path)?;
        } else {
            total_bytes += copy_file(&path, &dest_path)?;
        }
    }

    Ok(total_bytes)
}

/// Remove a file or directory tree. A target that is already gone counts
/// as removed.
pub(crate) fn remove_tree(path: &Path) -> Result<(), FsError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::io(path, e)),
    }
}
