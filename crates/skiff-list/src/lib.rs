//! Directory listing pipeline and version-control status probe for skiff.
//!
//! The pipeline enumerates exactly one directory level and derives the
//! ordered, filtered sequence of entries the view renders. The probe
//! annotates top-level names with their version-control state and is
//! strictly best-effort.

mod listing;
mod vcs;

pub use listing::list_directory;
pub use vcs::{probe, VcsStatus};
