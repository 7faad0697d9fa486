//! One function per subcommand. Each reports its own failures through the
//! internal logger and returns the exit code for `main`.

use super::LogLevel;
use crate::config::Config;
use crate::entry::Fields;
use crate::filelog::{RotatingFile, format_size};
use crate::internal;
use crate::logger::Logger;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::process::ExitCode;

/// Splits `key=value`. Values that parse as JSON (numbers, booleans, quoted
/// strings) keep their type; anything else is taken as a plain string.
#[must_use]
pub fn parse_field(arg: &str) -> Option<(String, Value)> {
    let (key, raw) = arg.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Some((key.to_string(), value))
}

#[must_use]
pub fn cmd_log(level: LogLevel, message: &str, fields: &[String], config: &Config) -> ExitCode {
    let mut parsed = Fields::new();
    for arg in fields {
        let Some((key, value)) = parse_field(arg) else {
            internal::error("CLI", &format!("Invalid field (expected key=value): {arg}"));
            return ExitCode::FAILURE;
        };
        parsed.insert(key, value);
    }

    let logger = match Logger::from_config_with(config) {
        Ok(logger) => logger,
        Err(e) => {
            internal::error("CLI", &format!("Failed to build logger: {e}"));
            return ExitCode::FAILURE;
        }
    };

    // Level::Fatal goes through `log`, not `fatal`, so the command still
    // closes the files and exits normally.
    logger.with_fields(&parsed).log(level.into(), message);

    match logger.close() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &format!("Failed to close transports: {e}"));
            ExitCode::FAILURE
        }
    }
}

#[must_use]
pub fn cmd_path(at: Option<&str>, config: &Config) -> ExitCode {
    let time = match at {
        None => Local::now(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(time) => time.with_timezone(&Local),
            Err(e) => {
                internal::error("CLI", &format!("Invalid time {raw}: {e}"));
                return ExitCode::FAILURE;
            }
        },
    };

    match config.file_options() {
        Ok(options) => {
            println!("{}", options.path_for(&time).display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &format!("Invalid file settings: {e}"));
            ExitCode::FAILURE
        }
    }
}

#[must_use]
pub fn cmd_sweep(config: &Config) -> ExitCode {
    let file = match config.file_options().and_then(RotatingFile::new) {
        Ok(file) => file,
        Err(e) => {
            internal::error("CLI", &format!("Invalid file settings: {e}"));
            return ExitCode::FAILURE;
        }
    };

    if file.options().expire.is_zero() {
        println!("Retention is disabled (expire = 0); nothing to sweep.");
        return ExitCode::SUCCESS;
    }

    let result = match file.sweep() {
        Ok(result) => result,
        Err(e) => {
            internal::error(
                "CLI",
                &format!("Failed to scan {}: {e}", file.dir().display()),
            );
            return ExitCode::FAILURE;
        }
    };

    for path in &result.deleted {
        println!("  deleted {}", path.display());
    }
    for (path, reason) in &result.failed {
        println!("  failed  {}: {reason}", path.display());
    }
    println!(
        "Deleted {} file(s), freed {}, kept {}",
        result.count(),
        format_size(result.freed),
        result.kept
    );

    if result.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keeps_json_types() {
        assert_eq!(
            parse_field("port=8080"),
            Some(("port".to_string(), Value::from(8080)))
        );
        assert_eq!(
            parse_field("ok=true"),
            Some(("ok".to_string(), Value::Bool(true)))
        );
    }

    #[test]
    fn field_falls_back_to_string() {
        assert_eq!(
            parse_field("user=alice smith"),
            Some(("user".to_string(), Value::from("alice smith")))
        );
        assert_eq!(
            parse_field("empty="),
            Some(("empty".to_string(), Value::from("")))
        );
    }

    #[test]
    fn field_requires_key() {
        assert_eq!(parse_field("novalue"), None);
        assert_eq!(parse_field("=x"), None);
    }
}
