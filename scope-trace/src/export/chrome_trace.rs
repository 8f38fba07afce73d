use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;

use crate::record::TraceRecord;

/// Opens the trace container. Every session file starts with exactly these bytes.
pub const HEADER: &str = r#"{"otherData": {},"traceEvents":["#;

/// Closes the trace container.
pub const FOOTER: &str = "]}";

/// Chrome Trace "complete" event
/// Spec: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU/preview
///
/// Field order is part of the file format; serde writes fields in declaration order.
#[derive(Debug, Serialize)]
struct ChromeTraceEvent<'a> {
    /// Category for filtering/coloring
    cat: &'static str,
    /// Duration in microseconds
    dur: u64,
    /// Region label
    name: Cow<'a, str>,
    /// Phase: always "X" (complete)
    ph: &'static str,
    /// Session name, written as given
    pid: &'a str,
    /// Thread ID
    tid: u64,
    /// Start timestamp in microseconds
    ts: u64,
}

/// Replace double quotes with single quotes so a label cannot close the
/// JSON string it is written into.
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    if name.contains('"') {
        Cow::Owned(name.replace('"', "'"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Write one record as a single-line JSON object, without separator.
pub fn write_event<W: Write>(
    writer: &mut W,
    session: &str,
    record: &TraceRecord,
) -> serde_json::Result<()> {
    let event = ChromeTraceEvent {
        cat: "function",
        dur: record.duration().as_micros(),
        name: sanitize_name(&record.name),
        ph: "X",
        pid: session,
        tid: record.tid.0,
        ts: record.start.as_micros(),
    };
    serde_json::to_writer(writer, &event)
}
