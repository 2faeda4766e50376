//! Undo log for file operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use skiff_core::FsError;

use crate::transfer::{move_path, remove_tree};

/// An entry in the undo log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoEntry {
    /// Human-readable description of the forward operation.
    pub description: String,
    /// The action that reverses it.
    pub inverse: InverseAction,
}

impl UndoEntry {
    /// Create a new undo entry.
    pub fn new(description: impl Into<String>, inverse: InverseAction) -> Self {
        Self {
            description: description.into(),
            inverse,
        }
    }
}

/// The inverse of a completed mutation.
///
/// Inverse actions carry only plain paths, never callables, so the log can
/// be serialized and inspected without executing anything. They are
/// best-effort: executing one does not itself produce a new undo entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InverseAction {
    /// Move a path back to where it came from.
    MoveBack { from: PathBuf, to: PathBuf },
    /// Remove a single created file.
    DeletePath { path: PathBuf },
    /// Remove a created file or directory tree.
    DeleteTree { path: PathBuf },
    /// Move trashed entries back to their original locations.
    /// Pairs are (original_path, trash_path).
    RestoreFromTrash { entries: Vec<(PathBuf, PathBuf)> },
}

/// Execute one inverse action.
///
/// A failure leaves whatever partial effect occurred in place; the caller
/// has already popped the entry and must not re-push it.
pub fn apply_inverse(action: InverseAction) -> Result<(), FsError> {
    match action {
        InverseAction::MoveBack { from, to } => {
            tracing::debug!(target: "undo", "moving {} back to {}", from.display(), to.display());
            move_path(&from, &to)
        }
        InverseAction::DeletePath { path } => match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::io(&path, e)),
        },
        InverseAction::DeleteTree { path } => remove_tree(&path),
        InverseAction::RestoreFromTrash { entries } => {
            for (original, trash) in entries {
                let parent_ok = original.parent().is_none_or(|p| p.is_dir());
                if !parent_ok {
                    return Err(FsError::RestoreFailed {
                        path: original,
                        reason: "original parent directory no longer exists".to_string(),
                    });
                }
                move_path(&trash, &original)?;
            }
            Ok(())
        }
    }
}

/// LIFO log of undoable operations.
///
/// One stack per session, unbounded, no redo: undoing is not itself
/// undoable, and a popped entry is consumed whether or not its inverse
/// succeeds.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OperationLog {
    entries: Vec<UndoEntry>,
}

impl OperationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed operation.
    pub fn push(&mut self, description: impl Into<String>, inverse: InverseAction) {
        self.entries.push(UndoEntry::new(description, inverse));
    }

    /// Pop the most recent entry.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    /// Description of the most recent entry, without removing it.
    pub fn peek(&self) -> Option<&str> {
        self.entries.last().map(|e| e.description.as_str())
    }

    /// Number of entries in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &UndoEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_lifo() {
        let mut log = OperationLog::new();
        log.push(
            "create a.txt",
            InverseAction::DeletePath {
                path: PathBuf::from("/t/a.txt"),
            },
        );
        log.push(
            "rename a.txt",
            InverseAction::MoveBack {
                from: PathBuf::from("/t/b.txt"),
                to: PathBuf::from("/t/a.txt"),
            },
        );

        assert_eq!(log.peek(), Some("rename a.txt"));
        assert_eq!(log.len(), 2);

        let entry = log.pop().unwrap();
        assert!(matches!(entry.inverse, InverseAction::MoveBack { .. }));
        let entry = log.pop().unwrap();
        assert!(matches!(entry.inverse, InverseAction::DeletePath { .. }));
        assert!(log.pop().is_none());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut log = OperationLog::new();
        log.push(
            "mkdir d",
            InverseAction::DeleteTree {
                path: PathBuf::from("/t/d"),
            },
        );
        assert_eq!(log.peek(), Some("mkdir d"));
        assert_eq!(log.peek(), Some("mkdir d"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_log_serializes() {
        let mut log = OperationLog::new();
        log.push(
            "delete 2 items",
            InverseAction::RestoreFromTrash {
                entries: vec![(PathBuf::from("/t/x"), PathBuf::from("/trash/x"))],
            },
        );
        let json = serde_json::to_string(&log).unwrap();
        let back: OperationLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.peek(), Some("delete 2 items"));
    }

    #[test]
    fn test_apply_delete_path_tolerates_missing() {
        apply_inverse(InverseAction::DeletePath {
            path: PathBuf::from("/no/such/file"),
        })
        .unwrap();
    }

    #[test]
    fn test_apply_restore_requires_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = tmp.path().join("trash_item");
        std::fs::write(&trash, b"x").unwrap();

        let err = apply_inverse(InverseAction::RestoreFromTrash {
            entries: vec![(tmp.path().join("gone_parent/item"), trash.clone())],
        })
        .unwrap_err();
        assert!(matches!(err, FsError::RestoreFailed { .. }));
        // Entry stays in the trash.
        assert!(trash.exists());
    }
}
