//! Fan-out of one entry to every installed transport whose threshold accepts it.
//!
//! The transport list sits behind a `RwLock` that is only held long enough to
//! copy or swap an `Arc`; delivery happens outside the lock, so a slow
//! transport never stalls `reset` or `close`. The cached maximum level lives in
//! its own atomic so `level()` never touches the lock at all.

use crate::entry::Entry;
use crate::internal;
use crate::level::{AtomicLevel, Level};
use crate::transport::Transport;
use std::sync::{Arc, PoisonError, RwLock};

type TransportList = Arc<[Arc<dyn Transport>]>;

/// `Active` until `close`, after which the list is empty and `dispatch` does nothing.
pub struct Multiplexer {
    transports: RwLock<TransportList>,
    max_level: AtomicLevel,
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for Multiplexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Multiplexer")
            .field("transports", &self.len())
            .field("max_level", &self.level())
            .finish()
    }
}

impl Multiplexer {
    #[must_use]
    pub fn new(transports: Vec<Arc<dyn Transport>>) -> Self {
        let mux = Self {
            transports: RwLock::new(Arc::from(Vec::new())),
            max_level: AtomicLevel::new(Level::Panic),
        };
        mux.reset(transports);
        mux
    }

    /// Replaces the whole transport list. The previous transports are dropped, not closed.
    ///
    /// The new maximum level is published before the list is swapped.
    pub fn reset(&self, transports: Vec<Arc<dyn Transport>>) {
        let max_level = transports
            .iter()
            .map(|t| t.threshold())
            .fold(Level::Panic, Level::max);
        let list: TransportList = Arc::from(transports);

        self.max_level.store(max_level);
        *self.transports.write().unwrap_or_else(PoisonError::into_inner) = list;

        internal::debug(
            "MUX",
            &format!("Installed {} transports (level={max_level})", self.len()),
        );
    }

    fn snapshot(&self) -> TransportList {
        Arc::clone(&self.transports.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Hands `entry` to every transport with `threshold() >= entry.level`, in list order.
    ///
    /// A failing transport is recorded and skipped; the rest still receive the entry.
    pub fn dispatch(&self, entry: &Entry) {
        for transport in self.snapshot().iter() {
            if !transport.threshold().allows(entry.level) {
                continue;
            }
            if let Err(e) = transport.deliver(entry) {
                internal::record_failure("MUX", &format!("Transport delivery failed: {e}"));
            }
        }
    }

    /// Most verbose threshold across the installed transports; `Panic` when there are none.
    #[must_use]
    pub fn level(&self) -> Level {
        self.max_level.load()
    }

    /// Cheap pre-check so callers can skip building entries nobody will accept.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.level().allows(level)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detaches the list, then closes each detached transport.
    ///
    /// A racing `dispatch` sees either the old list or the empty one. Calling
    /// `close` again closes nothing.
    ///
    /// # Errors
    /// The first error returned by a transport's `close`; every transport is
    /// still closed.
    pub fn close(&self) -> Result<(), crate::Error> {
        let detached = std::mem::replace(
            &mut *self.transports.write().unwrap_or_else(PoisonError::into_inner),
            Arc::from(Vec::new()),
        );
        self.max_level.store(Level::Panic);

        let mut first_error = None;
        for transport in detached.iter() {
            if let Err(e) = transport.close() {
                internal::record_failure("MUX", &format!("Transport close failed: {e}"));
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
