//! `key=value` rendering shared by line-oriented formatters.

use serde_json::Value;
use std::fmt::Write;

/// Bare values are limited to a grep-safe alphabet; anything else gets quoted.
/// A value that already starts with `"` is assumed to be quoted by the caller.
#[must_use]
pub fn needs_quoting(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    if text.starts_with('"') {
        return false;
    }
    !text.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '/' | '@' | '^' | '+')
    })
}

/// Appends ` key=value`, separated from any previous content by one space.
pub fn append_key_value(buf: &mut String, key: &str, value: &Value) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(key);
    buf.push('=');
    append_value(buf, value);
}

fn append_value(buf: &mut String, value: &Value) {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if needs_quoting(&text) {
        let _ = write!(buf, "{text:?}");
    } else {
        buf.push_str(&text);
    }
}
