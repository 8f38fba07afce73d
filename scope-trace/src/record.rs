//! Completed measurements handed from timers to the session writer

use std::borrow::Cow;

use crate::domain::{Duration, Tid, Timestamp};

/// One completed measurement of a named region on one thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub name: Cow<'static, str>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub tid: Tid,
}

impl TraceRecord {
    /// Build a record, clamping `end` so it never precedes `start`
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        start: Timestamp,
        end: Timestamp,
        tid: Tid,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end: end.max(start),
            tid,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end.since(self.start)
    }
}
