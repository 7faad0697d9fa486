//! Retention: find rotated files in the log directory whose bucket is older than
//! the expire window and delete them. Failures are collected, never raised per file.

use super::period::decode_tag;
use crate::internal;
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one sweep, for callers that want to report what was reclaimed.
#[derive(Debug, Default)]
pub struct SweepResult {
    pub deleted: Vec<PathBuf>,
    /// Bytes reclaimed by `deleted`.
    pub freed: u64,
    /// Matching files that were not expired.
    pub kept: usize,
    /// Files that were expired but could not be removed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl SweepResult {
    #[must_use]
    pub const fn count(&self) -> usize {
        self.deleted.len()
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Matches `<name>.<tag><ext>` for both hour and day tags; capture 1 is the tag.
pub(super) fn file_pattern(name: &str, extension: &str) -> Result<Regex, crate::Error> {
    let source = format!(
        r"^{}\.(\d{{10}}|\d{{8}}){}$",
        regex::escape(name),
        regex::escape(extension)
    );
    Regex::new(&source).map_err(|e| crate::Error::InvalidConfig(e.to_string()))
}

/// What a sweep needs to know about the file set it owns.
pub(super) struct Retention<'a> {
    pub dir: &'a Path,
    pub pattern: &'a Regex,
    pub expire: Duration,
    /// File name of the handle currently open for writing; never deleted.
    pub active: Option<&'a str>,
}

impl Retention<'_> {
    /// # Errors
    /// Only a failure to list the directory is returned; per-file errors land in `failed`.
    pub fn sweep(&self, now: DateTime<Local>) -> Result<SweepResult, crate::Error> {
        let mut result = SweepResult::default();
        if self.expire.is_zero() {
            return Ok(result);
        }

        internal::trace(
            "SWEEP",
            &format!("Scanning {} (expire={:?})", self.dir.display(), self.expire),
        );

        for entry in fs::read_dir(self.dir)? {
            let Ok(entry) = entry else { continue };
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(stamp) = self
                .pattern
                .captures(name)
                .and_then(|caps| decode_tag(&caps[1]))
            else {
                continue;
            };

            let expired = now
                .signed_duration_since(stamp)
                .to_std()
                .is_ok_and(|age| age > self.expire);

            if !expired || self.active == Some(name) {
                result.kept += 1;
                continue;
            }

            let path = entry.path();
            let size = entry.metadata().map_or(0, |m| m.len());
            match fs::remove_file(&path) {
                Ok(()) => {
                    internal::debug("SWEEP", &format!("Deleted expired {}", path.display()));
                    result.freed += size;
                    result.deleted.push(path);
                }
                Err(e) => {
                    internal::record_failure(
                        "SWEEP",
                        &format!("Failed to delete {}: {e}", path.display()),
                    );
                    result.failed.push((path, e.to_string()));
                }
            }
        }

        Ok(result)
    }
}

/// Raw byte counts are unreadable in terminal output.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let bytes_f = bytes as f64;

    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.2} GB", bytes_f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes_f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes_f / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
