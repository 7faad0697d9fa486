//! Hooks that run before a `Fatal` entry terminates the process.

use crate::internal;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

type Handler = Box<dyn Fn() + Send + Sync>;

static HANDLERS: Mutex<Vec<Handler>> = Mutex::new(Vec::new());

/// Handlers run once, in registration order, the next time a logger exits.
pub fn register_exit_handler(handler: impl Fn() + Send + Sync + 'static) {
    HANDLERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Box::new(handler));
}

/// Runs and clears the registered handlers. A panicking handler is reported
/// and the remaining handlers still run.
pub fn run_exit_handlers() {
    let handlers = std::mem::take(&mut *HANDLERS.lock().unwrap_or_else(PoisonError::into_inner));
    for handler in handlers {
        if panic::catch_unwind(AssertUnwindSafe(|| handler())).is_err() {
            internal::error("EXIT", "Exit handler panicked");
        }
    }
}
