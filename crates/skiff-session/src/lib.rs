//! Session controller for skiff.
//!
//! [`FileSession`] owns the listing state (current directory, hidden flag,
//! sort mode, filter, selection), the clipboard, and the undo log, and
//! exposes the operations the interactive shell calls. Nothing here
//! renders: every operation returns a typed result plus a human-readable
//! status string, and callers pull a fresh listing after each mutation.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use skiff_core::{format_modified, format_size, permission_string, Entry, FsError, SessionConfig, SortMode};
use skiff_list::{list_directory, probe, VcsStatus};
use skiff_ops::{
    apply_inverse, create_archive, create_directory, create_file, extract,
    normalize_archive_name, paste, rename_entry, Clipboard, ClipboardOp, InverseAction,
    OperationLog, TrashStore,
};

// The archive-vs-extract dispatch rule belongs to the shell; re-export the
// suffix check it needs.
pub use skiff_ops::is_archive;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A filesystem operation failed.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Paste requested with nothing on the clipboard.
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// Undo requested with an empty operation log.
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// One browsing session: a current directory, its view settings, and the
/// reversible-operation machinery.
///
/// All state is mutated by the single control thread that drives the
/// session; mutating operations push their inverse onto the undo log only
/// after the underlying filesystem change has fully succeeded.
#[derive(Debug)]
pub struct FileSession {
    config: SessionConfig,
    current_dir: PathBuf,
    show_hidden: bool,
    sort_mode: SortMode,
    filter: String,
    selected: HashSet<PathBuf>,
    vcs_status: HashMap<String, VcsStatus>,
    clipboard: Option<Clipboard>,
    undo_log: OperationLog,
    trash: TrashStore,
}

impl FileSession {
    /// Open a session rooted at the configured start directory.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let start = config.start_dir.clone();
        if !start.is_dir() {
            return Err(FsError::NotADirectory { path: start }.into());
        }

        let trash = TrashStore::new(config.resolved_trash_root());
        let mut session = Self {
            show_hidden: config.show_hidden,
            current_dir: start,
            sort_mode: SortMode::default(),
            filter: String::new(),
            selected: HashSet::new(),
            vcs_status: HashMap::new(),
            clipboard: None,
            undo_log: OperationLog::new(),
            trash,
            config,
        };
        session.refresh_status();
        Ok(session)
    }

    // ===== Listing state =====

    /// The directory the session is browsing.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Whether dot-files are shown.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// The active sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// The active filter substring.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The selected paths.
    pub fn selected(&self) -> &HashSet<PathBuf> {
        &self.selected
    }

    /// Produce the ordered, filtered listing of the current directory.
    pub fn listing(&self) -> Result<Vec<Entry>, SessionError> {
        Ok(list_directory(
            &self.current_dir,
            self.show_hidden,
            self.sort_mode,
            &self.filter,
        )?)
    }

    /// Change the current directory. Clears the selection and refreshes
    /// the version-status map.
    pub fn set_current_dir(&mut self, path: impl Into<PathBuf>) -> Result<String, SessionError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(FsError::NotADirectory { path }.into());
        }
        self.current_dir = path;
        self.selected.clear();
        self.refresh_status();
        Ok(format!("Changed to: {}", self.current_dir.display()))
    }

    /// Move to the parent directory; a no-op at the filesystem root.
    pub fn go_up(&mut self) -> Result<String, SessionError> {
        match self.current_dir.parent() {
            Some(parent) if parent != self.current_dir => {
                let parent = parent.to_path_buf();
                self.set_current_dir(parent)
            }
            _ => Ok("Already at the top".to_string()),
        }
    }

    /// Toggle dot-file visibility.
    pub fn toggle_hidden(&mut self) -> String {
        self.show_hidden = !self.show_hidden;
        if self.show_hidden {
            "Hidden files shown".to_string()
        } else {
            "Hidden files excluded".to_string()
        }
    }

    /// Cycle to the next sort mode and return it.
    pub fn cycle_sort(&mut self) -> SortMode {
        self.sort_mode = self.sort_mode.next();
        self.sort_mode
    }

    /// Set the sort mode directly.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Set the filter substring; empty clears it.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Clear the filter substring.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Toggle selection of a path; returns whether it is now selected.
    pub fn toggle_select(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.selected.remove(&path) {
            false
        } else {
            self.selected.insert(path);
            true
        }
    }

    /// The paths an operation should act on: the selection if any,
    /// otherwise the cursor entry.
    pub fn effective_targets(&self, cursor: Option<&Path>) -> Vec<PathBuf> {
        if !self.selected.is_empty() {
            self.selected.iter().cloned().collect()
        } else {
            cursor.map(|p| vec![p.to_path_buf()]).unwrap_or_default()
        }
    }

    // ===== Version status =====

    /// Re-run the version-status probe for the current directory.
    /// Best-effort: failures leave an empty map.
    pub fn refresh_status(&mut self) -> String {
        self.vcs_status = probe(&self.current_dir, self.config.probe_timeout());
        "Refreshed".to_string()
    }

    /// Status code for a top-level entry name, as a display character.
    pub fn status_code(&self, name: &str) -> Option<char> {
        self.vcs_status.get(name).map(|s| s.code())
    }

    /// The full name → status map.
    pub fn vcs_status(&self) -> &HashMap<String, VcsStatus> {
        &self.vcs_status
    }

    // ===== Mutations =====

    /// Create an empty file in the current directory.
    pub fn create_file(&mut self, name: &str) -> Result<String, SessionError> {
        let path = create_file(&self.current_dir, name)?;
        self.undo_log
            .push(format!("create {name}"), InverseAction::DeletePath { path });
        Ok(format!("Created file: {name}"))
    }

    /// Create a directory in the current directory.
    pub fn create_directory(&mut self, name: &str) -> Result<String, SessionError> {
        let path = create_directory(&self.current_dir, name)?;
        self.undo_log
            .push(format!("mkdir {name}"), InverseAction::DeleteTree { path });
        Ok(format!("Created directory: {name}"))
    }

    /// Rename an entry in place.
    pub fn rename(&mut self, source: &Path, new_name: &str) -> Result<String, SessionError> {
        let old_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if new_name == old_name {
            return Ok(format!("Name unchanged: {old_name}"));
        }
        let new_path = rename_entry(source, new_name)?;
        self.undo_log.push(
            format!("rename {old_name}"),
            InverseAction::MoveBack {
                from: new_path,
                to: source.to_path_buf(),
            },
        );
        Ok(format!("Renamed to: {new_name}"))
    }

    /// Soft-delete entries into the trash.
    ///
    /// Atomic per entry: on a mid-batch failure the remainder is skipped,
    /// nothing is rolled back, and no undo entry is pushed. The pairs
    /// already moved stay recoverable in the trash directory itself.
    pub fn delete(&mut self, targets: &[PathBuf]) -> Result<String, SessionError> {
        let label = match targets {
            [single] => single
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            many => format!("{} items", many.len()),
        };

        let moved = self.trash.soft_delete(targets).map_err(|e| {
            tracing::warn!(
                target: "session",
                "delete stopped after {} of {} entries",
                e.moved.len(),
                targets.len()
            );
            SessionError::Fs(e.source)
        })?;

        self.selected.clear();
        self.undo_log.push(
            format!("delete {label}"),
            InverseAction::RestoreFromTrash { entries: moved },
        );
        Ok(format!("Deleted: {label} (undo available)"))
    }

    /// Place an entry on the clipboard for copying.
    pub fn copy(&mut self, source: impl Into<PathBuf>) -> String {
        let clip = Clipboard::copy(source);
        let name = clip_name(&clip);
        self.clipboard = Some(clip);
        format!("Copied: {name} (paste to duplicate)")
    }

    /// Place an entry on the clipboard for moving.
    pub fn cut(&mut self, source: impl Into<PathBuf>) -> String {
        let clip = Clipboard::cut(source);
        let name = clip_name(&clip);
        self.clipboard = Some(clip);
        format!("Cut: {name} (paste at the destination to move)")
    }

    /// The pending clipboard transfer, if any.
    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    /// Paste the clipboard into the current directory.
    ///
    /// A successful cut-paste clears the clipboard; a copy-paste keeps it
    /// so the same source can be pasted again elsewhere.
    pub fn paste(&mut self) -> Result<String, SessionError> {
        let clip = self.clipboard.clone().ok_or(SessionError::EmptyClipboard)?;
        let name = clip_name(&clip);

        let outcome = paste(&clip, &self.current_dir)?;
        match clip.op {
            ClipboardOp::Cut => {
                self.clipboard = None;
                self.undo_log
                    .push(format!("move {name}"), outcome.inverse);
                Ok(format!("Moved: {name}"))
            }
            ClipboardOp::Copy => {
                self.undo_log
                    .push(format!("copy {name}"), outcome.inverse);
                Ok(format!("Copied: {name}"))
            }
        }
    }

    /// Create a zip archive of the given entries in the current directory.
    pub fn archive(&mut self, targets: &[PathBuf], name: &str) -> Result<String, SessionError> {
        let file_name = normalize_archive_name(name);
        let out_path = self.current_dir.join(&file_name);
        create_archive(targets, &out_path)?;
        self.selected.clear();
        self.undo_log.push(
            format!("zip {file_name}"),
            InverseAction::DeletePath { path: out_path },
        );
        Ok(format!("Created archive: {file_name}"))
    }

    /// Extract an archive next to itself.
    pub fn extract_if_archive(&mut self, entry: &Path) -> Result<String, SessionError> {
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_archive(&name) {
            return Err(FsError::UnsupportedFormat {
                path: entry.to_path_buf(),
            }
            .into());
        }
        let dest = extract(entry)?;
        let dest_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.undo_log.push(
            format!("extract {name}"),
            InverseAction::DeleteTree { path: dest },
        );
        Ok(format!("Extracted: {name} -> {dest_name}"))
    }

    /// Undo the most recent operation.
    ///
    /// The entry is consumed whether or not its inverse succeeds; a failed
    /// inverse is reported and the log simply has one fewer entry.
    pub fn undo(&mut self) -> Result<String, SessionError> {
        let entry = self.undo_log.pop().ok_or(SessionError::NothingToUndo)?;
        apply_inverse(entry.inverse)?;
        Ok(format!("Undone: {}", entry.description))
    }

    /// Description of the operation `undo` would revert, if any.
    pub fn pending_undo(&self) -> Option<&str> {
        self.undo_log.peek()
    }

    /// Number of operations on the undo log.
    pub fn undo_depth(&self) -> usize {
        self.undo_log.len()
    }

    // ===== Display helpers =====

    /// One-line summary of the listing and session state.
    pub fn status_line(&self, listing: &[Entry]) -> String {
        let mut line = format!("{} items", listing.len());
        if !self.selected.is_empty() {
            line.push_str(&format!("  ({} selected)", self.selected.len()));
        }
        if !self.filter.is_empty() {
            line.push_str(&format!("  [filter: '{}']", self.filter));
        }
        if !self.show_hidden {
            line.push_str("  (hidden excluded)");
        }
        if let Some(desc) = self.undo_log.peek() {
            line.push_str(&format!("  [undo: {desc}]"));
        }
        line
    }

    /// Multi-line summary of one entry for an info display.
    pub fn file_info(&self, path: &Path) -> Result<String, SessionError> {
        let meta = std::fs::metadata(path).map_err(|e| FsError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = if meta.is_dir() { "Directory" } else { "File" };
        let size = if meta.is_dir() {
            "-".to_string()
        } else {
            format_size(meta.len())
        };
        let modified = meta
            .modified()
            .map(format_modified)
            .unwrap_or_else(|_| "-".to_string());
        let created = meta
            .created()
            .map(format_modified)
            .unwrap_or_else(|_| "-".to_string());

        Ok(format!(
            "Name:     {name}\n\
             Path:     {}\n\
             Type:     {kind}\n\
             Size:     {size}\n\
             Perms:    {}\n\
             Created:  {created}\n\
             Modified: {modified}",
            path.display(),
            permission_string(&meta),
        ))
    }
}

fn clip_name(clip: &Clipboard) -> String {
    clip.source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(dir: &Path) -> FileSession {
        let config = SessionConfig::builder()
            .start_dir(dir)
            .trash_root(Some(dir.join(".trash")))
            .build()
            .unwrap();
        FileSession::new(config).unwrap()
    }

    #[test]
    fn test_selection_cleared_on_dir_change() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"a").unwrap();

        let mut session = session_in(tmp.path());
        session.toggle_select(tmp.path().join("a.txt"));
        assert_eq!(session.selected().len(), 1);

        session.set_current_dir(&sub).unwrap();
        assert!(session.selected().is_empty());
    }

    #[test]
    fn test_effective_targets_prefers_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session_in(tmp.path());

        let cursor = tmp.path().join("cursor.txt");
        assert_eq!(
            session.effective_targets(Some(cursor.as_path())),
            vec![cursor.clone()]
        );

        session.toggle_select(tmp.path().join("picked.txt"));
        let targets = session.effective_targets(Some(cursor.as_path()));
        assert_eq!(targets, vec![tmp.path().join("picked.txt")]);
    }

    #[test]
    fn test_new_rejects_missing_dir() {
        let config = SessionConfig::new("/no/such/start/dir");
        let err = FileSession::new(config).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Fs(FsError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_status_line_composition() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("x.txt"), b"x").unwrap();

        let mut session = session_in(tmp.path());
        session.set_filter("x");
        let listing = session.listing().unwrap();
        let line = session.status_line(&listing);

        assert!(line.starts_with("1 items"));
        assert!(line.contains("[filter: 'x']"));
        assert!(line.contains("(hidden excluded)"));
    }
}
