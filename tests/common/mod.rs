//! Shared test transport: records what it receives and how often it is closed.

#![allow(dead_code)]

use rotalog::{Entry, Error, Level, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct Recorder {
    level: Level,
    fail_deliver: bool,
    fail_close: bool,
    seen: Mutex<Vec<Entry>>,
    closes: AtomicUsize,
}

impl Recorder {
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Self {
            level,
            fail_deliver: false,
            fail_close: false,
            seen: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        })
    }

    pub fn failing(level: Level) -> Arc<Self> {
        Arc::new(Self {
            level,
            fail_deliver: true,
            fail_close: true,
            seen: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        })
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.seen.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.entries().into_iter().map(|e| e.level).collect()
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Transport for Recorder {
    fn threshold(&self) -> Level {
        self.level
    }

    fn deliver(&self, entry: &Entry) -> Result<(), Error> {
        if self.fail_deliver {
            return Err(Error::Format("recorder refuses entries".to_string()));
        }
        self.seen.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(Error::Format("recorder refuses to close".to_string()));
        }
        Ok(())
    }
}

pub fn as_transport(recorder: &Arc<Recorder>) -> Arc<dyn Transport> {
    Arc::clone(recorder) as Arc<dyn Transport>
}
