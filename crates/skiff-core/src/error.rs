//! Error types for file operations and listings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by listings and mutating file operations.
///
/// Every public operation either succeeds or fails with one of these kinds
/// without leaving a partial entry on the undo stack. None of them are fatal
/// to the session.
#[derive(Debug, Error)]
pub enum FsError {
    /// Enumeration or mutation denied by the OS.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Target vanished between listing and acting on it.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// Create or rename collides with an existing name.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Paste where source and destination resolve to the same path.
    #[error("Source and destination are the same: {path}")]
    SameLocation { path: PathBuf },

    /// Extraction requested on an unrecognized archive suffix.
    #[error("Unsupported archive format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Undo could not restore an entry from the trash.
    #[error("Cannot restore {path}: {reason}")]
    RestoreFailed { path: PathBuf, reason: String },

    /// Path expected to be a directory is not one.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A file or directory name failed validation.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Generic I/O error with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create an I/O error with path context, classifying well-known kinds.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::SameLocation { path }
            | Self::UnsupportedFormat { path }
            | Self::RestoreFailed { path, .. }
            | Self::NotADirectory { path }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidName { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, FsError::PermissionDenied { .. }));

        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FsError::NotFound { .. }));

        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "taken"),
        );
        assert!(matches!(err, FsError::AlreadyExists { .. }));

        let err = FsError::io(
            "/test/path",
            std::io::Error::other("disk fell off"),
        );
        assert!(matches!(err, FsError::Io { .. }));
    }

    #[test]
    fn test_error_path() {
        let err = FsError::SameLocation {
            path: PathBuf::from("/a/b"),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("/a/b")));

        let err = FsError::InvalidName {
            name: "..".into(),
            reason: "reserved".into(),
        };
        assert!(err.path().is_none());
    }
}
