//! Copy/cut/paste transfer between a source entry and a directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use skiff_core::FsError;

use crate::transfer::{copy_dir_recursive, copy_file, move_path};
use crate::undo::InverseAction;

/// What a paste will do with the clipboard source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardOp {
    /// Duplicate the source at the destination.
    Copy,
    /// Move the source to the destination.
    Cut,
}

/// The pending transfer: one source path and the operation kind.
///
/// Setting the clipboard has no filesystem effect; only paste touches
/// disk. After a successful cut-paste the owner clears the clipboard;
/// a copy-paste leaves it intact for repeated pastes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clipboard {
    /// Source path captured at copy/cut time.
    pub source: PathBuf,
    /// Copy or cut.
    pub op: ClipboardOp,
}

impl Clipboard {
    /// Capture a source for copying.
    pub fn copy(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            op: ClipboardOp::Copy,
        }
    }

    /// Capture a source for cutting.
    pub fn cut(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            op: ClipboardOp::Cut,
        }
    }
}

/// Result of a successful paste.
#[derive(Debug)]
pub struct PasteOutcome {
    /// Where the source landed.
    pub destination: PathBuf,
    /// The action that reverses the paste.
    pub inverse: InverseAction,
}

/// Paste the clipboard source into `dest_dir`.
///
/// The destination is `dest_dir/<source name>`. Pasting a source onto
/// itself fails with [`FsError::SameLocation`]. Cut moves (falling back
/// to copy-and-delete across volumes); copy duplicates files and whole
/// directory trees.
pub fn paste(clipboard: &Clipboard, dest_dir: &Path) -> Result<PasteOutcome, FsError> {
    let source = clipboard.source.as_path();
    let name = source.file_name().ok_or_else(|| FsError::InvalidName {
        name: source.display().to_string(),
        reason: "source has no file name".to_string(),
    })?;
    let destination = dest_dir.join(name);

    if destination == source {
        return Err(FsError::SameLocation {
            path: destination,
        });
    }

    if !source.exists() {
        return Err(FsError::NotFound {
            path: source.to_path_buf(),
        });
    }

    match clipboard.op {
        ClipboardOp::Cut => {
            move_path(source, &destination)?;
            tracing::debug!(target: "ops", "moved {} -> {}", source.display(), destination.display());
            Ok(PasteOutcome {
                inverse: InverseAction::MoveBack {
                    from: destination.clone(),
                    to: source.to_path_buf(),
                },
                destination,
            })
        }
        ClipboardOp::Copy => {
            if source.is_dir() {
                if destination.exists() {
                    return Err(FsError::AlreadyExists { path: destination });
                }
                copy_dir_recursive(source, &destination)?;
            } else {
                copy_file(source, &destination)?;
            }
            tracing::debug!(target: "ops", "copied {} -> {}", source.display(), destination.display());
            Ok(PasteOutcome {
                inverse: InverseAction::DeleteTree {
                    path: destination.clone(),
                },
                destination,
            })
        }
    }
}
