//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default threshold for every transport (`trace` .. `panic`).
    pub level: String,
    /// Attach file and line of the log call to each entry.
    pub report_caller: bool,
    /// Threshold for rotalog's own diagnostics on stderr.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            report_caller: false,
            internal_level: "warn".to_string(),
        }
    }
}

/// Rotating file transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Enable the file transport.
    pub enabled: bool,
    /// Log directory (`~` is expanded).
    pub dir: String,
    /// Base file name.
    pub name: String,
    /// Extension appended after the bucket tag.
    pub extension: String,
    /// Rotation period (hour, day, none).
    pub period: String,
    /// Retention window (e.g. "7d", "12h", "0" to keep forever).
    pub expire: String,
    /// Copy every file line to this stream (stderr, stdout).
    pub mirror: Option<String>,
    /// Per-transport threshold; falls back to `general.level`.
    pub level: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        let dir = directories::ProjectDirs::from("", "", "rotalog").map_or_else(
            || "logs".to_string(),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("logs")
                    .to_string_lossy()
                    .into_owned()
            },
        );

        Self {
            enabled: true,
            dir,
            name: "app".to_string(),
            extension: ".log".to_string(),
            period: "day".to_string(),
            expire: "7d".to_string(),
            mirror: Some("stderr".to_string()),
            level: None,
        }
    }
}

/// Standalone stream transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Enable the stream transport.
    pub enabled: bool,
    /// Target stream (stderr, stdout).
    pub target: String,
    /// Per-transport threshold; falls back to `general.level`.
    pub level: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target: "stderr".to_string(),
            level: None,
        }
    }
}

/// Line format configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// strftime pattern; empty for RFC 3339.
    pub timestamp_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            timestamp_format: crate::transport::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}
