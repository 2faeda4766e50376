//! Core types and traits for skiff.
//!
//! This crate provides the fundamental data structures shared by the
//! listing pipeline, the operation engine, and the session controller:
//! directory entries, the error taxonomy, sort modes, and configuration.

mod config;
mod entry;
mod error;
mod sort;

pub use config::{SessionConfig, SessionConfigBuilder, DEFAULT_PROBE_TIMEOUT};
pub use entry::{format_modified, format_size, permission_string, Entry};
pub use error::FsError;
pub use sort::SortMode;
