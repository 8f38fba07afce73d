//! Scope guards that time one region and report it on drop

use std::borrow::Cow;

use crate::domain::{Duration, Tid, Timestamp};
use crate::record::TraceRecord;
use crate::session::SessionWriter;

/// Measures one region of code on the current thread
///
/// The measurement ends on the first of [`stop`](Self::stop) or drop, so
/// early returns, `?` and panics unwinding through the scope all produce
/// exactly one record.
#[must_use = "the region is measured until the timer is dropped; \
              binding it to `_` ends it immediately"]
#[derive(Debug)]
pub struct ScopedTimer<'w> {
    writer: &'w SessionWriter,
    label: Cow<'static, str>,
    start: Timestamp,
    stopped: bool,
}

impl<'w> ScopedTimer<'w> {
    pub fn new(writer: &'w SessionWriter, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            writer,
            label: label.into(),
            start: writer.now(),
            stopped: false,
        }
    }

    /// Finish the measurement and submit it. Later calls do nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        let end = self.writer.now();
        self.stopped = true;

        let record = TraceRecord::new(self.label.clone(), self.start, end, Tid::current());
        self.writer.write_record(&record);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Time since the timer started, whether or not it has been stopped
    pub fn elapsed(&self) -> Duration {
        self.writer.now().since(self.start)
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        self.stop();
    }
}
