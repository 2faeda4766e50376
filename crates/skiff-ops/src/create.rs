//! File and directory creation.

use std::path::{Path, PathBuf};

use skiff_core::FsError;

/// Create a new empty file named `name` inside `dir`.
///
/// Fails with [`FsError::AlreadyExists`] rather than truncating an
/// existing file.
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf, FsError> {
    validate_filename(name)?;
    let path = dir.join(name);
    if path.exists() {
        return Err(FsError::AlreadyExists { path });
    }
    std::fs::File::create_new(&path).map_err(|e| FsError::io(&path, e))?;
    tracing::debug!(target: "ops", "created file {}", path.display());
    Ok(path)
}

/// Create a new directory named `name` inside `dir`.
///
/// Intermediate directories are not created; the name is a single child.
pub fn create_directory(dir: &Path, name: &str) -> Result<PathBuf, FsError> {
    validate_filename(name)?;
    let path = dir.join(name);
    if path.exists() {
        return Err(FsError::AlreadyExists { path });
    }
    std::fs::create_dir(&path).map_err(|e| FsError::io(&path, e))?;
    tracing::debug!(target: "ops", "created directory {}", path.display());
    Ok(path)
}

/// Validate a file or directory name.
pub fn validate_filename(name: &str) -> Result<(), FsError> {
    let invalid = |reason: &str| FsError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.len() > 255 {
        return Err(invalid("name is too long (max 255 characters)"));
    }
    for c in ['/', '\0'] {
        if name.contains(c) {
            return Err(invalid("name contains a path separator or NUL"));
        }
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(invalid("name cannot start or end with spaces"));
    }
    if name.ends_with('.') && name != "." && name != ".." {
        return Err(invalid("name cannot end with a dot"));
    }
    if name == "." || name == ".." {
        return Err(invalid("'.' and '..' are reserved names"));
    }

    Ok(())
}
