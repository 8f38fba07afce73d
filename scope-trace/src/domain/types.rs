//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep thread ids, points in time and durations from
//! being mixed up, and make function signatures more expressive.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT_TID: Cell<Option<Tid>> = const { Cell::new(None) };
}

/// Thread ID
///
/// A small integer handed out the first time a thread asks for its id.
/// Stable for the lifetime of the thread and unique within the process,
/// but not across process restarts and unrelated to the kernel TID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tid(pub u64);

impl Tid {
    /// Id of the calling thread
    pub fn current() -> Self {
        CURRENT_TID.with(|slot| {
            if let Some(tid) = slot.get() {
                return tid;
            }
            let tid = Tid(NEXT_TID.fetch_add(1, Ordering::Relaxed));
            slot.set(Some(tid));
            tid
        })
    }
}

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TID:{}", self.0)
    }
}

/// Timestamp in microseconds
///
/// Represents a point in time as microseconds since the epoch of the
/// [`SessionWriter`](crate::SessionWriter) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

#[allow(clippy::cast_precision_loss)]
impl Timestamp {
    /// Convert to seconds (f64)
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Convert to microseconds (u64)
    pub fn as_micros(self) -> u64 {
        self.0
    }

    /// Time elapsed between `earlier` and `self`, zero if `earlier` is later
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_seconds())
    }
}

/// Duration in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(pub u64);

#[allow(clippy::cast_precision_loss)]
impl Duration {
    /// Convert to milliseconds (f64)
    pub fn as_millis(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Convert to seconds (f64)
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Convert to microseconds (u64)
    pub fn as_micros(self) -> u64 {
        self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Duration(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.as_millis();
        if ms >= 1000.0 {
            write!(f, "{:.2}s", self.as_seconds())
        } else {
            write!(f, "{ms:.2}ms")
        }
    }
}
