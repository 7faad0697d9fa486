//! Turning an `Entry` into bytes. Transports own a `Formatter`; the multiplexer never formats.

mod line;
mod value;

pub use line::{CallerPrettyfier, LineFormatter};
pub use value::{append_key_value, needs_quoting};

use crate::entry::Entry;

/// Pure rendering: must not touch any state and must not mutate `entry`.
pub trait Formatter: Send + Sync {
    /// Renders one entry, including its trailing newline.
    ///
    /// # Errors
    /// Implementations that can fail (e.g. serializers) report it as `Error::Format`.
    fn format(&self, entry: &Entry) -> Result<Vec<u8>, crate::Error>;
}
