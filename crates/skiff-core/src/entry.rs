//! Directory entry type and display helpers.

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single entry in a directory listing.
///
/// Entries are recomputed from disk on every refresh; nothing is cached
/// across refreshes. Identity for selection and clipboard purposes is the
/// absolute path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Absolute path of the entry.
    pub path: PathBuf,

    /// File or directory name (not the full path).
    pub name: CompactString,

    /// Pre-computed lowercase name for filtering and sorting.
    pub name_lower: CompactString,

    /// Whether this entry is a directory (symlinks resolved).
    pub is_dir: bool,

    /// Size in bytes; 0 for directories and unreadable entries.
    pub size: u64,

    /// Last modification time, if the metadata could be read.
    pub modified: Option<SystemTime>,

    /// Ten-character permission string, `----------` when unreadable.
    pub permissions: String,
}

impl Entry {
    /// Build an entry from a path, reading metadata from disk.
    ///
    /// Metadata failures (broken symlink, permission problem) degrade to
    /// placeholder values rather than failing the whole listing.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name: CompactString = path
            .file_name()
            .map(|n| n.to_string_lossy().into())
            .unwrap_or_default();
        let name_lower: CompactString = name.to_lowercase().into();

        match std::fs::metadata(&path) {
            Ok(meta) => {
                let is_dir = meta.is_dir();
                Self {
                    size: if is_dir { 0 } else { meta.len() },
                    modified: meta.modified().ok(),
                    permissions: permission_string(&meta),
                    path,
                    name,
                    name_lower,
                    is_dir,
                }
            }
            Err(_) => Self {
                path,
                name,
                name_lower,
                is_dir: false,
                size: 0,
                modified: None,
                permissions: "----------".to_string(),
            },
        }
    }

    /// Lowercase extension of the entry name, empty for none.
    pub fn extension_lower(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Size column for display: `-` for directories.
    pub fn size_display(&self) -> String {
        if self.is_dir {
            "-".to_string()
        } else {
            format_size(self.size)
        }
    }

    /// Modified column for display: `-` when unknown.
    pub fn modified_display(&self) -> String {
        self.modified
            .map(format_modified)
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Format a byte count in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a modification time as `YYYY-MM-DD HH:MM` local time.
pub fn format_modified(time: SystemTime) -> String {
    let local: chrono::DateTime<chrono::Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Render metadata as a fixed-width `drwxr-xr-x` style string.
#[cfg(unix)]
pub fn permission_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let kind = if meta.is_dir() { 'd' } else { '-' };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// Render metadata as a fixed-width permission string.
#[cfg(not(unix))]
pub fn permission_string(meta: &Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let rw = if meta.permissions().readonly() {
        "r--r--r--"
    } else {
        "rw-rw-rw-"
    };
    format!("{kind}{rw}")
}
