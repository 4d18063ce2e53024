//! Age- and count-based pruning of `desktop_reminder_*.log` files

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tracing::{debug, info, warn};

pub const LOG_FILE_PREFIX: &str = "desktop_reminder_";
pub const LOG_FILE_SUFFIX: &str = ".log";

const SECONDS_PER_DAY: u64 = 86_400;

/// A reminder log file found by a directory scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// `retention_days == 0` disables the age rule, `max_files == 0` the count rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRetentionPolicy {
    pub retention_days: u32,
    pub max_files: usize,
}

impl LogRetentionPolicy {
    pub fn new(retention_days: u32, max_files: usize) -> Self {
        Self {
            retention_days,
            max_files,
        }
    }

    /// Decide which candidates to delete. The active log is never selected.
    ///
    /// The age rule and the count rule each produce a delete set from the full
    /// candidate list; the result is their union.
    pub fn select_for_deletion(
        &self,
        candidates: &[LogFileEntry],
        active_log: &Path,
        now: SystemTime,
    ) -> BTreeSet<PathBuf> {
        let by_age = self.expired_by_age(candidates, active_log, now);
        let by_count = self.over_count(candidates.iter().collect(), active_log);

        by_age.union(&by_count).cloned().collect()
    }

    fn expired_by_age(
        &self,
        candidates: &[LogFileEntry],
        active_log: &Path,
        now: SystemTime,
    ) -> BTreeSet<PathBuf> {
        if self.retention_days == 0 {
            return BTreeSet::new();
        }
        let retention = Duration::from_secs(u64::from(self.retention_days) * SECONDS_PER_DAY);
        let Some(cutoff) = now.checked_sub(retention) else {
            return BTreeSet::new();
        };

        candidates
            .iter()
            .filter(|entry| entry.path != active_log && entry.modified < cutoff)
            .map(|entry| entry.path.clone())
            .collect()
    }

    fn over_count(
        &self,
        mut remaining: Vec<&LogFileEntry>,
        active_log: &Path,
    ) -> BTreeSet<PathBuf> {
        if self.max_files == 0 || remaining.len() <= self.max_files {
            return BTreeSet::new();
        }
        remaining.sort_by(|a, b| b.modified.cmp(&a.modified));

        remaining
            .into_iter()
            .skip(self.max_files)
            .filter(|entry| entry.path != active_log)
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// Scan the active log's directory and delete what the policy selects.
    ///
    /// Best effort: a failed scan aborts quietly, failed deletions are skipped.
    /// Returns the paths actually removed.
    pub fn prune(&self, active_log: &Path, now: SystemTime) -> Vec<PathBuf> {
        let active_log = absolute(active_log);
        let Some(dir) = active_log.parent().filter(|dir| dir.is_dir()) else {
            return Vec::new();
        };

        let candidates = match scan_log_dir(dir) {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!("Skipping log rotation, cannot scan {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut removed = Vec::new();
        for path in self.select_for_deletion(&candidates, &active_log, now) {
            match fs::remove_file(&path) {
                Ok(()) => removed.push(path),
                Err(e) => warn!("Failed to remove old log {}: {}", path.display(), e),
            }
        }

        if !removed.is_empty() {
            info!("Log rotation removed {} file(s) from {}", removed.len(), dir.display());
        }
        removed
    }
}

/// List regular files in `dir` named `desktop_reminder_*.log`
pub fn scan_log_dir(dir: &Path) -> io::Result<Vec<LogFileEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !is_log_file_name(name) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else { continue };
        if !metadata.is_file() {
            continue;
        }
        let Ok(modified) = metadata.modified() else { continue };
        entries.push(LogFileEntry {
            path: entry.path(),
            modified,
        });
    }
    Ok(entries)
}

pub fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
