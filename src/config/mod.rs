//! TOML configuration: which transports to build, where the files go, how
//! they rotate and expire.
//!
//! Separated from struct definitions so that loading and the string-to-type
//! conversions stay independent of the serde schema.

mod duration;
mod structs;

pub use duration::parse_duration;
pub use structs::{FileConfig, FormatConfig, GeneralConfig, StreamConfig};

use crate::filelog::{FileOptions, Period};
use crate::internal;
use crate::level::Level;
use crate::transport::Stream;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// An empty config file yields a working logger; every section falls back to its default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub file: FileConfig,
    pub stream: StreamConfig,
    pub format: FormatConfig,
}

impl FromStr for Config {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl Config {
    /// Loads `rotalog.toml` from the user config directory; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let config = fs::read_to_string(path)?.parse()?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// XDG-style path: `~/.config/rotalog/rotalog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("rotalog").join("rotalog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// # Errors
    /// `InvalidLevel` for an unknown level name.
    pub fn level(&self) -> Result<Level, crate::Error> {
        self.general.level.parse::<Level>().map_err(Into::into)
    }

    /// Lenient: rotalog's own diagnostics fall back to `Warn`.
    #[must_use]
    pub fn internal_level(&self) -> Level {
        self.general.internal_level.parse().unwrap_or(Level::Warn)
    }

    /// # Errors
    /// `InvalidLevel` for an unknown `file.level` or `general.level`.
    pub fn file_level(&self) -> Result<Level, crate::Error> {
        self.file
            .level
            .as_deref()
            .map_or_else(|| self.level(), |l| l.parse::<Level>().map_err(Into::into))
    }

    /// # Errors
    /// `InvalidLevel` for an unknown `stream.level` or `general.level`.
    pub fn stream_level(&self) -> Result<Level, crate::Error> {
        self.stream
            .level
            .as_deref()
            .map_or_else(|| self.level(), |l| l.parse::<Level>().map_err(Into::into))
    }

    /// Unknown period strings mean "don't rotate". That also disables
    /// retention, since untagged files are never swept, so it is reported.
    #[must_use]
    pub fn period(&self) -> Period {
        Period::from_name(&self.file.period).unwrap_or_else(|| {
            internal::warn(
                "CONFIG",
                &format!(
                    "Unknown file.period '{}': rotation and expiry are disabled",
                    self.file.period
                ),
            );
            Period::None
        })
    }

    /// # Errors
    /// `InvalidDuration` for an unparseable `file.expire`.
    pub fn expire(&self) -> Result<std::time::Duration, crate::Error> {
        parse_duration(&self.file.expire)
    }

    /// # Errors
    /// `InvalidConfig` for an unknown mirror stream.
    pub fn mirror(&self) -> Result<Option<Stream>, crate::Error> {
        self.file
            .mirror
            .as_deref()
            .filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case("none"))
            .map(str::parse::<Stream>)
            .transpose()
    }

    /// Rotating-file options with `~` expanded in the directory.
    ///
    /// # Errors
    /// `InvalidDuration` for a bad `file.expire`.
    pub fn file_options(&self) -> Result<FileOptions, crate::Error> {
        let dir = PathBuf::from(shellexpand::tilde(&self.file.dir).into_owned());
        Ok(FileOptions::new(dir, self.file.name.clone())
            .extension(&self.file.extension)
            .period(self.period())
            .expire(self.expire()?))
    }
}
