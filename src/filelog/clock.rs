//! Time source for rotation decisions, swappable so rotation can be driven deterministically.

use chrono::{DateTime, Local};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Local>>);

impl ManualClock {
    #[must_use]
    pub const fn new(start: DateTime<Local>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn set(&self, time: DateTime<Local>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    /// Steps that would overflow leave the clock where it is.
    pub fn advance(&self, by: Duration) {
        let Ok(step) = chrono::Duration::from_std(by) else {
            return;
        };
        let mut now = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = now.checked_add_signed(step) {
            *now = next;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
