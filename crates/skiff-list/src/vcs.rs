//! Best-effort version-control status probe.
//!
//! Runs `git status --porcelain` in the target directory and reduces the
//! output to a map from top-level child name to a single status code. The
//! probe never fails: a missing binary, a non-repository, a non-zero exit,
//! or a hung subprocess all collapse to an empty map.

use std::collections::HashMap;
use std::path::{Component, Path};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How often the probe polls the child process while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Version-control state of a top-level directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VcsStatus {
    /// Untracked (`??`).
    Untracked,
    /// Added / staged.
    Added,
    /// Modified.
    Modified,
    /// Deleted.
    Deleted,
    /// Renamed.
    Renamed,
    /// Tracked with some other pending change.
    Changed,
}

impl VcsStatus {
    /// One-character display code.
    pub fn code(self) -> char {
        match self {
            Self::Untracked => '?',
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Changed => '~',
        }
    }
}

/// Probe the version-control status of a directory's top-level children.
///
/// Blocks the caller for at most `timeout`; past the deadline the child is
/// killed and the probe reports no data. Status annotation is optional
/// decoration, so every failure path is absorbed silently.
pub fn probe(dir: &Path, timeout: Duration) -> HashMap<String, VcsStatus> {
    let child = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(target: "vcs", "status probe spawn failed: {e}");
            return HashMap::new();
        }
    };

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    tracing::debug!(target: "vcs", "status probe timed out, killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    return HashMap::new();
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                tracing::debug!(target: "vcs", "status probe wait failed: {e}");
                let _ = child.kill();
                return HashMap::new();
            }
        }
    };

    if !status.success() {
        return HashMap::new();
    }

    let mut output = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        use std::io::Read;
        if stdout.read_to_string(&mut output).is_err() {
            return HashMap::new();
        }
    }

    parse_porcelain(&output)
}

/// Reduce porcelain lines to a top-level-name → status map.
///
/// Rename arrows fold to the new name; nested paths reduce to their first
/// segment, so a change anywhere under a subdirectory marks the
/// subdirectory. When several lines land on the same segment the last one
/// wins.
fn parse_porcelain(output: &str) -> HashMap<String, VcsStatus> {
    let mut map = HashMap::new();

    for line in output.lines() {
        if line.len() < 4 {
            continue;
        }
        let (Some(xy), Some(rest)) = (line.get(..2), line.get(3..)) else {
            continue;
        };
        let mut filepath = rest.trim();
        if let Some((_, new)) = filepath.rsplit_once(" -> ") {
            filepath = new;
        }

        let name = match Path::new(filepath).components().next() {
            Some(Component::Normal(part)) => part.to_string_lossy().into_owned(),
            _ => filepath.to_string(),
        };

        let mut chars = xy.chars();
        let x = chars.next().unwrap_or(' ');
        let y = chars.next().unwrap_or(' ');

        let status = if xy == "??" {
            VcsStatus::Untracked
        } else if x == 'A' || y == 'A' {
            VcsStatus::Added
        } else if x == 'M' || y == 'M' {
            VcsStatus::Modified
        } else if x == 'D' || y == 'D' {
            VcsStatus::Deleted
        } else if x == 'R' || y == 'R' {
            VcsStatus::Renamed
        } else {
            VcsStatus::Changed
        };

        map.insert(name, status);
    }

    map
}
