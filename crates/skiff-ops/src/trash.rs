//! Soft delete: an append-only, timestamped trash store.

use std::path::{Path, PathBuf};

use thiserror::Error;

use skiff_core::FsError;

use crate::transfer::move_path;

/// A batch delete that stopped partway through.
///
/// Soft delete is atomic per entry, not per batch: the first failure
/// aborts the remainder and nothing already moved is rolled back. The
/// pairs moved before the failure are carried here so the caller can still
/// surface them.
#[derive(Debug, Error)]
#[error("Failed to delete {}: {source}", failed.display())]
pub struct DeleteError {
    /// The entry that could not be moved.
    pub failed: PathBuf,
    /// The underlying failure.
    #[source]
    pub source: FsError,
    /// (original, trash) pairs moved before the failure.
    pub moved: Vec<(PathBuf, PathBuf)>,
}

/// Staging area for soft-deleted entries.
///
/// Entries land under the root as `<timestamp>_<original-name>` and are
/// never pruned automatically.
#[derive(Debug, Clone)]
pub struct TrashStore {
    root: PathBuf,
}

impl TrashStore {
    /// Create a store rooted at `root`. The directory itself is created
    /// lazily on first delete.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The trash root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Move entries into the trash.
    ///
    /// Returns (original, trash) pairs on success. Microsecond timestamps
    /// in the trash names keep rapid repeated deletes of the same base
    /// name from colliding.
    pub fn soft_delete(&self, targets: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>, DeleteError> {
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            return Err(DeleteError {
                failed: self.root.clone(),
                source: FsError::io(&self.root, e),
                moved: Vec::new(),
            });
        }

        let mut moved: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(targets.len());

        for target in targets {
            let name = target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%6f");
            let trash_path = self.root.join(format!("{stamp}_{name}"));

            if let Err(source) = move_path(target, &trash_path) {
                tracing::warn!(target: "trash", "delete aborted at {}: {source}", target.display());
                return Err(DeleteError {
                    failed: target.clone(),
                    source,
                    moved,
                });
            }
            tracing::debug!(target: "trash", "{} -> {}", target.display(), trash_path.display());
            moved.push((target.clone(), trash_path));
        }

        Ok(moved)
    }

    /// Move trashed entries back to their original locations.
    ///
    /// Fails with [`FsError::RestoreFailed`] when an original parent
    /// directory no longer exists; that entry stays in the trash.
    pub fn restore(&self, entries: &[(PathBuf, PathBuf)]) -> Result<(), FsError> {
        for (original, trash) in entries {
            let parent_ok = original.parent().is_none_or(|p| p.is_dir());
            if !parent_ok {
                return Err(FsError::RestoreFailed {
                    path: original.clone(),
                    reason: "original parent directory no longer exists".to_string(),
                });
            }
            move_path(trash, original)?;
        }
        Ok(())
    }
}
