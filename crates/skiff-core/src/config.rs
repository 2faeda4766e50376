//! Session configuration types.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default bound on the version-status subprocess, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT: u64 = 2000;

/// Configuration for a browsing session.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SessionConfig {
    /// Directory the session starts in.
    pub start_dir: PathBuf,

    /// Trash root override; defaults to `~/.skiff_trash`.
    #[builder(default)]
    #[serde(default)]
    pub trash_root: Option<PathBuf>,

    /// Show entries whose name starts with `.`.
    #[builder(default = "false")]
    #[serde(default)]
    pub show_hidden: bool,

    /// Hard bound on the version-status subprocess, in milliseconds.
    #[builder(default = "DEFAULT_PROBE_TIMEOUT")]
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT
}

impl SessionConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref start) = self.start_dir {
            if start.as_os_str().is_empty() {
                return Err("Start directory cannot be empty".to_string());
            }
        } else {
            return Err("Start directory is required".to_string());
        }
        Ok(())
    }
}

impl SessionConfig {
    /// Create a new config builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Create a simple config rooted at a directory.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            trash_root: None,
            show_hidden: false,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Resolve the trash root: the override, or `~/.skiff_trash`.
    pub fn resolved_trash_root(&self) -> PathBuf {
        self.trash_root.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".skiff_trash")
        })
    }

    /// The probe bound as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
