//! Writes go to a primary sink and are copied to a secondary one, typically a
//! rotating file mirrored to stderr.

use super::Sink;
use crate::internal;

/// Only the primary's result is returned; a failing copy is recorded and ignored.
#[derive(Debug)]
pub struct Mirror<P, C> {
    primary: P,
    copy: C,
}

impl<P: Sink, C: Sink> Mirror<P, C> {
    #[must_use]
    pub const fn new(primary: P, copy: C) -> Self {
        Self { primary, copy }
    }

    #[must_use]
    pub const fn primary(&self) -> &P {
        &self.primary
    }
}

impl<P: Sink, C: Sink> Sink for Mirror<P, C> {
    fn write(&self, buf: &[u8]) -> Result<usize, crate::Error> {
        let written = self.primary.write(buf);
        if let Err(e) = self.copy.write(buf) {
            internal::record_failure("MIRROR", &format!("Copy write failed: {e}"));
        }
        written
    }

    fn close(&self) -> Result<(), crate::Error> {
        if let Err(e) = self.copy.close() {
            internal::record_failure("MIRROR", &format!("Copy close failed: {e}"));
        }
        self.primary.close()
    }
}
