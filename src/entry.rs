//! One log event as it travels from the `Logger` through the multiplexer to each transport.

use crate::level::Level;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::BTreeMap;
use std::panic::Location;

/// Structured fields attached to an entry. Sorted keys keep rendered lines stable.
pub type Fields = BTreeMap<String, Value>;

/// Where the log call came from. Only filled in when caller capture is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Empty when the call site can't name its function.
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Caller {
    #[must_use]
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Records the location of the outermost `#[track_caller]` frame.
    #[must_use]
    #[track_caller]
    pub fn capture() -> Self {
        let location = Location::caller();
        Self {
            function: String::new(),
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

/// Transports only ever see `&Entry`, so an entry is immutable once dispatched.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub time: DateTime<Local>,
    pub message: String,
    pub data: Fields,
    pub caller: Option<Caller>,
}

impl Entry {
    /// Stamped with the current wall-clock time.
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            time: Local::now(),
            message: message.into(),
            data: Fields::new(),
            caller: None,
        }
    }

    #[must_use]
    pub fn at(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Later keys overwrite earlier ones, matching map semantics.
    #[must_use]
    pub fn fields(mut self, fields: &Fields) -> Self {
        for (k, v) in fields {
            self.data.insert(k.clone(), v.clone());
        }
        self
    }

    #[must_use]
    pub fn caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    #[must_use]
    pub const fn has_caller(&self) -> bool {
        self.caller.is_some()
    }
}
