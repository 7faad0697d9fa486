//! Period-rotated log files: `<dir>/<name>[.<tag>]<ext>`.
//!
//! A `RotatingFile` keeps at most one handle open. Every write reads the
//! clock, and when the bucket tag moves the old handle is closed, the file for
//! the new bucket is opened in append mode and a retention sweep runs. Open,
//! rotate and write happen under one lock per instance, so concurrent writers
//! never observe a half-rotated state and lines never interleave.

mod clock;
mod period;
mod sweep;

pub use clock::{Clock, ManualClock, SystemClock};
pub use period::{Period, decode_tag};
pub use sweep::{SweepResult, format_size};

use crate::internal;
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use sweep::Retention;

/// Where and how a `RotatingFile` writes. Validated by `RotatingFile::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    pub dir: PathBuf,
    /// Base file name without tag or extension.
    pub name: String,
    /// Includes the leading dot; empty for no extension.
    pub extension: String,
    pub period: Period,
    /// Zero keeps files forever.
    pub expire: Duration,
}

impl FileOptions {
    /// Daily rotation, `.log` extension, no expiry.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            extension: ".log".to_string(),
            period: Period::Day,
            expire: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub const fn expire(mut self, expire: Duration) -> Self {
        self.expire = expire;
        self
    }

    /// A missing leading dot is added; an empty string means no extension.
    #[must_use]
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = if extension.is_empty() || extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        self
    }

    /// File name for a bucket tag; the empty tag is the unrotated file.
    #[must_use]
    pub fn file_name(&self, tag: &str) -> String {
        if tag.is_empty() {
            format!("{}{}", self.name, self.extension)
        } else {
            format!("{}.{tag}{}", self.name, self.extension)
        }
    }

    /// Full path of the file that holds entries written at `time`.
    #[must_use]
    pub fn path_for(&self, time: &DateTime<Local>) -> PathBuf {
        self.dir.join(self.file_name(&self.period.tag(time)))
    }

    fn validate(&self) -> Result<(), crate::Error> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "log file name must not be empty".to_string(),
            ));
        }
        if self.name.contains(['/', '\\']) {
            return Err(crate::Error::InvalidConfig(format!(
                "log file name must not contain a path separator: {}",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
struct State {
    tag: String,
    /// File name of `file`, kept so the sweep can skip it.
    active: Option<String>,
    file: Option<File>,
    closed: bool,
}

pub struct RotatingFile {
    options: FileOptions,
    pattern: Regex,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RotatingFile {
    /// Validates the options and creates the directory; nothing is opened until the first write.
    ///
    /// # Errors
    /// `InvalidConfig` for a bad file name, `CreateDir` when the directory can't be created.
    pub fn new(options: FileOptions) -> Result<Self, crate::Error> {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    /// Same as `new`, reading time from `clock` instead of the system.
    ///
    /// # Errors
    /// See [`RotatingFile::new`].
    pub fn with_clock(options: FileOptions, clock: Arc<dyn Clock>) -> Result<Self, crate::Error> {
        options.validate()?;
        fs::create_dir_all(&options.dir)
            .map_err(|e| crate::Error::CreateDir(options.dir.clone(), e))?;
        let pattern = sweep::file_pattern(&options.name, &options.extension)?;

        internal::debug(
            "FILE",
            &format!(
                "Rotating file {} (period={}, expire={:?})",
                options.dir.join(options.file_name("")).display(),
                options.period,
                options.expire
            ),
        );

        Ok(Self {
            options,
            pattern,
            clock,
            state: Mutex::new(State::default()),
        })
    }

    #[must_use]
    pub const fn options(&self) -> &FileOptions {
        &self.options
    }

    /// See [`FileOptions::path_for`].
    #[must_use]
    pub fn path_for(&self, time: &DateTime<Local>) -> PathBuf {
        self.options.path_for(time)
    }

    /// Path of the handle currently open, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock()
            .active
            .as_ref()
            .map(|name| self.options.dir.join(name))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `buf` to the file for the current bucket, rotating first if needed.
    ///
    /// # Errors
    /// Opening the new bucket's file or the write itself failing. Housekeeping
    /// (closing the previous handle, the retention sweep) never fails a write.
    pub fn write(&self, buf: &[u8]) -> Result<usize, crate::Error> {
        let mut state = self.lock();
        if state.closed {
            return Err(crate::Error::Closed);
        }

        let now = self.clock.now();
        let tag = self.options.period.tag(&now);
        if state.file.is_none() || state.tag != tag {
            self.rotate(&mut state, tag, now)?;
        }

        let file = state.file.as_mut().ok_or(crate::Error::Closed)?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn rotate(
        &self,
        state: &mut State,
        tag: String,
        now: DateTime<Local>,
    ) -> Result<(), crate::Error> {
        if let Some(old) = state.file.take() {
            if let Err(e) = old.sync_all() {
                internal::record_failure(
                    "FILE",
                    &format!(
                        "Failed to close {}: {e}",
                        state.active.as_deref().unwrap_or_default()
                    ),
                );
            }
            state.active = None;
        }

        let name = self.options.file_name(&tag);
        let path = self.options.dir.join(&name);
        if !self.options.dir.exists() {
            fs::create_dir_all(&self.options.dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        internal::debug("FILE", &format!("Opened {}", path.display()));

        state.file = Some(file);
        state.tag = tag;
        state.active = Some(name);

        if let Err(e) = self.retention(state.active.as_deref()).sweep(now) {
            internal::record_failure(
                "SWEEP",
                &format!("Sweep of {} failed: {e}", self.options.dir.display()),
            );
        }
        Ok(())
    }

    fn retention<'a>(&'a self, active: Option<&'a str>) -> Retention<'a> {
        Retention {
            dir: &self.options.dir,
            pattern: &self.pattern,
            expire: self.options.expire,
            active,
        }
    }

    /// Runs a retention sweep now instead of waiting for the next rotation.
    ///
    /// # Errors
    /// The log directory could not be listed.
    pub fn sweep(&self) -> Result<SweepResult, crate::Error> {
        let state = self.lock();
        self.retention(state.active.as_deref()).sweep(self.clock.now())
    }

    /// Syncs and releases the open handle. Later writes fail with `Error::Closed`;
    /// closing again is a no-op.
    ///
    /// # Errors
    /// Syncing the open handle failed.
    pub fn close(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        state.closed = true;
        state.active = None;
        if let Some(file) = state.file.take() {
            file.sync_all()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.options.dir
    }
}

impl Drop for RotatingFile {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
