//! Session lifecycle and serialized record output
//!
//! A [`SessionWriter`] owns at most one active session. Every record, and the
//! header and footer around them, goes through one mutex so that concurrent
//! timers never interleave their output.

use log::{debug, info, trace, warn};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::domain::{Duration, Timestamp, TraceError};
use crate::export::{write_event, FOOTER, HEADER};
use crate::record::TraceRecord;
use crate::timer::ScopedTimer;

/// The open sink plus the bookkeeping needed to place separators
struct ActiveSession {
    name: String,
    sink: Box<dyn Write + Send>,
    record_count: u64,
}

impl ActiveSession {
    fn open(name: String, mut sink: Box<dyn Write + Send>) -> Result<Self, TraceError> {
        sink.write_all(HEADER.as_bytes())?;
        sink.flush()?;
        Ok(Self {
            name,
            sink,
            record_count: 0,
        })
    }

    fn write(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        // Compose the whole line first so a failed write never leaves a dangling separator
        let mut line = Vec::with_capacity(128);
        if self.record_count > 0 {
            line.push(b',');
        }
        write_event(&mut line, &self.name, record)?;

        self.sink.write_all(&line)?;
        self.sink.flush()?;
        self.record_count += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), TraceError> {
        self.sink.write_all(FOOTER.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }
}

/// Writes timed regions of one session at a time into a Chrome trace file
///
/// Construct one per program and hand out references (or an `Arc`) to the
/// code that opens timers. Dropping the writer ends any session still active.
///
/// Every record is flushed as soon as it is written. That keeps the file
/// complete up to the last closed region, but costs one flush per region, so
/// avoid timing very hot, very short code paths.
///
/// # Example
/// ```no_run
/// use scope_trace::SessionWriter;
///
/// # fn example() -> Result<(), scope_trace::TraceError> {
/// let writer = SessionWriter::new();
/// writer.begin_session("Startup", "startup.json")?;
/// {
///     let _timer = writer.scope("load_config");
///     // ...
/// }
/// writer.end_session()?;
/// # Ok(())
/// # }
/// ```
pub struct SessionWriter {
    epoch: Instant,
    state: Mutex<Option<ActiveSession>>,
}

impl SessionWriter {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            state: Mutex::new(None),
        }
    }

    /// Begin writing a session to `path`, truncating the file.
    ///
    /// An already active session is ended first. If the file cannot be
    /// created the error is returned and no session is active.
    pub fn begin_session(
        &self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), TraceError> {
        let path = path.as_ref();
        let mut state = self.lock();
        Self::close_previous(&mut state);

        let file = File::create(path).map_err(|source| TraceError::SinkOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let name = name.into();
        info!("Beginning trace session '{}' -> {}", name, path.display());
        *state = Some(ActiveSession::open(name, Box::new(BufWriter::new(file)))?);
        Ok(())
    }

    /// Begin writing a session to an arbitrary sink (stdout, a buffer, a socket).
    ///
    /// Same lifecycle as [`begin_session`](Self::begin_session).
    pub fn begin_session_with_sink<W>(
        &self,
        name: impl Into<String>,
        sink: W,
    ) -> Result<(), TraceError>
    where
        W: Write + Send + 'static,
    {
        let mut state = self.lock();
        Self::close_previous(&mut state);

        let name = name.into();
        info!("Beginning trace session '{name}'");
        *state = Some(ActiveSession::open(name, Box::new(sink))?);
        Ok(())
    }

    /// End the active session, writing the footer and releasing the sink.
    ///
    /// Does nothing when no session is active. The session is over even if
    /// the footer could not be written.
    pub fn end_session(&self) -> Result<(), TraceError> {
        let mut state = self.lock();
        let Some(session) = state.take() else {
            return Ok(());
        };
        info!(
            "Ending trace session '{}' ({} records)",
            session.name, session.record_count
        );
        session.finish()
    }

    /// Append one record to the active session.
    ///
    /// Records submitted while no session is active are dropped. Write
    /// failures are logged and the record is lost; they never reach the caller.
    pub fn write_record(&self, record: &TraceRecord) {
        let mut state = self.lock();
        let Some(session) = state.as_mut() else {
            return;
        };
        match session.write(record) {
            Ok(()) => trace!(
                "{} '{}' {}",
                record.tid,
                record.name,
                record.duration()
            ),
            Err(e) => warn!(
                "Dropped record '{}' from session '{}': {}",
                record.name, session.name, e
            ),
        }
    }

    /// Start a timer that reports to this writer when stopped or dropped
    pub fn scope(&self, label: impl Into<Cow<'static, str>>) -> ScopedTimer<'_> {
        ScopedTimer::new(self, label)
    }

    /// Current reading of this writer's clock
    pub fn now(&self) -> Timestamp {
        Timestamp(Duration::from(self.epoch.elapsed()).as_micros())
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    pub fn session_name(&self) -> Option<String> {
        self.lock().as_ref().map(|session| session.name.clone())
    }

    // Every mutation leaves the state consistent, so a panic while holding
    // the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn close_previous(state: &mut Option<ActiveSession>) {
        if let Some(previous) = state.take() {
            debug!(
                "Ending trace session '{}' ({} records) before starting a new one",
                previous.name, previous.record_count
            );
            if let Err(e) = previous.finish() {
                warn!("Failed to finalize previous trace session: {e}");
            }
        }
    }
}

impl Default for SessionWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionWriter")
            .field("session", &self.session_name())
            .finish_non_exhaustive()
    }
}

impl Drop for SessionWriter {
    fn drop(&mut self) {
        if self.is_active() {
            debug!("Trace session still active at teardown, ending it");
        }
        if let Err(e) = self.end_session() {
            warn!("Failed to finalize trace session at teardown: {e}");
        }
    }
}
