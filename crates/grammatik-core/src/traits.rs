//! Trait seams for the engine's external collaborators.
//!
//! [`CorpusSource`] supplies raw exercise groups; [`Clock`] supplies time to
//! timed practice sessions.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::source::RawGroup;

// ---------------------------------------------------------------------------
// Corpus source
// ---------------------------------------------------------------------------

/// Supplies raw exercise records grouped by (level, checklist item).
///
/// Implementations handle storage only; every record is validated afterwards.
pub trait CorpusSource {
    /// Human-readable description of where the records come from.
    fn describe(&self) -> String;

    /// Return every group, in a stable order.
    fn groups(&self) -> anyhow::Result<Vec<RawGroup>>;
}

impl CorpusSource for Vec<RawGroup> {
    fn describe(&self) -> String {
        format!("{} in-memory group(s)", self.len())
    }

    fn groups(&self) -> anyhow::Result<Vec<RawGroup>> {
        Ok(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic time source for timed sessions.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
