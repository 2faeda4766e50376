//! File operations engine for skiff.
//!
//! Every mutating operation in this crate either succeeds completely or
//! fails with a typed error and no change visible to the undo stack. On
//! success each operation hands back the [`InverseAction`] that reverses
//! it; the session records those in the [`OperationLog`].

mod archive;
mod clipboard;
mod create;
mod rename;
mod transfer;
mod trash;
mod undo;

pub use archive::{archive_stem, create_archive, extract, is_archive, normalize_archive_name};
pub use clipboard::{paste, Clipboard, ClipboardOp, PasteOutcome};
pub use create::{create_directory, create_file, validate_filename};
pub use rename::rename_entry;
pub use trash::{DeleteError, TrashStore};
pub use undo::{apply_inverse, InverseAction, OperationLog, UndoEntry};
