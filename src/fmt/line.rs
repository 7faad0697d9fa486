//! Human-readable single-line output:
//! `[2024-01-01 15:04:05] [INFO] main src/main.rs:12 message key=value`.

use super::{Formatter, append_key_value};
use crate::entry::{Caller, Entry};
use std::fmt;
use std::sync::Arc;

/// Rewrites caller info into `(function, file)` display strings.
pub type CallerPrettyfier = Arc<dyn Fn(&Caller) -> (String, String) + Send + Sync>;

#[derive(Clone, Default)]
pub struct LineFormatter {
    /// strftime pattern; empty means RFC 3339.
    timestamp_format: String,
    caller_prettyfier: Option<CallerPrettyfier>,
}

impl fmt::Debug for LineFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineFormatter")
            .field("timestamp_format", &self.timestamp_format)
            .field("caller_prettyfier", &self.caller_prettyfier.is_some())
            .finish()
    }
}

impl LineFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn caller_prettyfier(mut self, prettyfier: CallerPrettyfier) -> Self {
        self.caller_prettyfier = Some(prettyfier);
        self
    }

    /// Four-letter upper-case tag: `TRAC`, `DEBU`, `INFO`, `WARN`, `ERRO`, `FATA`, `PANI`.
    fn level_text(entry: &Entry) -> String {
        entry.level.as_str().to_uppercase().chars().take(4).collect()
    }

    fn caller_text(&self, caller: &Caller) -> (String, String) {
        self.caller_prettyfier.as_ref().map_or_else(
            || {
                (
                    caller.function.clone(),
                    format!("{}:{}", caller.file, caller.line),
                )
            },
            |prettyfy| prettyfy(caller),
        )
    }

    /// Renders into a `String`; `format` wraps this as bytes.
    #[must_use]
    pub fn render(&self, entry: &Entry) -> String {
        let timestamp = if self.timestamp_format.is_empty() {
            entry.time.to_rfc3339()
        } else {
            entry.time.format(&self.timestamp_format).to_string()
        };

        let mut line = format!("[{timestamp}] [{}] ", Self::level_text(entry));

        if let Some(caller) = &entry.caller {
            let (function, file) = self.caller_text(caller);
            if !function.is_empty() {
                line.push_str(&function);
                line.push(' ');
            }
            line.push_str(&file);
            line.push(' ');
        }

        line.push_str(entry.message.strip_suffix('\n').unwrap_or(&entry.message));

        for (key, value) in &entry.data {
            append_key_value(&mut line, key, value);
        }

        line.push('\n');
        line
    }
}

impl Formatter for LineFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>, crate::Error> {
        Ok(self.render(entry).into_bytes())
    }
}
