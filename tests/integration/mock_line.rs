//! Mock output line for integration tests.
//!
//! Records every physical write and release in a shared log so tests can
//! inspect the line while the service's worker thread owns it.

use std::sync::{Arc, Mutex, MutexGuard};

use linkled::app::ports::{LineProvider, OutputLine};
use linkled::{DeviceError, Level};

#[derive(Debug, Default)]
pub struct LineLog {
    pub writes: Vec<Level>,
    pub releases: usize,
    /// Fail every write once this many writes have succeeded.
    pub fail_after: Option<usize>,
    /// Make `release` report a failure.
    pub fail_release: bool,
}

#[derive(Clone, Default)]
pub struct SharedLog(Arc<Mutex<LineLog>>);

#[allow(dead_code)]
impl SharedLog {
    pub fn lock(&self) -> MutexGuard<'_, LineLog> {
        self.0.lock().unwrap()
    }

    pub fn writes(&self) -> Vec<Level> {
        self.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    pub fn releases(&self) -> usize {
        self.lock().releases
    }

    pub fn last_write(&self) -> Option<Level> {
        self.lock().writes.last().copied()
    }
}

// ── MockLine ──────────────────────────────────────────────────

pub struct MockLine {
    log: SharedLog,
}

impl MockLine {
    pub fn new(log: &SharedLog) -> Self {
        Self { log: log.clone() }
    }
}

impl OutputLine for MockLine {
    fn write_level(&mut self, level: Level) -> Result<(), DeviceError> {
        let mut log = self.log.lock();
        if log.fail_after.is_some_and(|n| log.writes.len() >= n) {
            return Err(DeviceError::WriteFailed);
        }
        log.writes.push(level);
        Ok(())
    }

    fn release(self) -> Result<(), DeviceError> {
        let mut log = self.log.lock();
        log.releases += 1;
        if log.fail_release {
            Err(DeviceError::ReleaseFailed)
        } else {
            Ok(())
        }
    }
}

// ── MockProvider ──────────────────────────────────────────────

pub struct MockProvider {
    pub log: SharedLog,
    pub opened: Vec<(String, u32)>,
    pub fail_open: Option<DeviceError>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new() -> Self {
        Self {
            log: SharedLog::default(),
            opened: Vec::new(),
            fail_open: None,
        }
    }

    pub fn failing(err: DeviceError) -> Self {
        Self {
            fail_open: Some(err),
            ..Self::new()
        }
    }
}

impl LineProvider for MockProvider {
    type Line = MockLine;

    fn open(&mut self, chip: &str, line: u32) -> Result<MockLine, DeviceError> {
        if let Some(err) = self.fail_open {
            return Err(err);
        }
        self.opened.push((chip.to_owned(), line));
        Ok(MockLine::new(&self.log))
    }
}
