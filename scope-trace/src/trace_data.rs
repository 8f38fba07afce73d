//! Trace data models for reading written sessions back
//!
//! Used to validate a trace after a session ends, by the `--check` flag and
//! by the tests.

use serde::Deserialize;
use std::path::Path;

use crate::domain::{Tid, TraceError};

/// Represents a single complete event as written by a session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceEvent {
    pub cat: String,
    pub dur: u64,
    pub name: String,
    pub ph: String,
    pub pid: String,
    pub tid: u64,
    pub ts: u64,
}

impl TraceEvent {
    /// End timestamp in microseconds
    pub fn end(&self) -> u64 {
        self.ts.saturating_add(self.dur)
    }
}

/// A parsed trace file
#[derive(Debug, Deserialize)]
pub struct TraceData {
    #[serde(rename = "otherData", default)]
    pub other_data: serde_json::Value,
    #[serde(rename = "traceEvents")]
    pub events: Vec<TraceEvent>,
}

impl TraceData {
    /// Parse a trace file written by a session
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Distinct thread ids, in order of first appearance
    pub fn threads(&self) -> Vec<Tid> {
        let mut threads = Vec::new();
        for event in &self.events {
            let tid = Tid(event.tid);
            if !threads.contains(&tid) {
                threads.push(tid);
            }
        }
        threads
    }

    pub fn events_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |event| event.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        r#"{"otherData": {},"traceEvents":["#,
        r#"{"cat":"function","dur":40,"name":"Fibonacci 2","ph":"X","pid":"Benchmark","tid":2,"ts":100},"#,
        r#"{"cat":"function","dur":30,"name":"Fibonacci 1","ph":"X","pid":"Benchmark","tid":3,"ts":120},"#,
        r#"{"cat":"function","dur":90,"name":"Fibonacci 3","ph":"X","pid":"Benchmark","tid":2,"ts":60}"#,
        "]}"
    );

    #[test]
    fn test_parse_extracts_all_fields() {
        let data = TraceData::parse(SAMPLE).unwrap();
        assert_eq!(data.events.len(), 3);

        let event = &data.events[0];
        assert_eq!(event.cat, "function");
        assert_eq!(event.name, "Fibonacci 2");
        assert_eq!(event.ph, "X");
        assert_eq!(event.pid, "Benchmark");
        assert_eq!(event.tid, 2);
        assert_eq!(event.ts, 100);
        assert_eq!(event.end(), 140);
    }

    #[test]
    fn test_end_saturates_on_huge_duration() {
        let json = concat!(
            r#"{"otherData": {},"traceEvents":[{"cat":"function","#,
            r#""dur":18446744073709551615,"name":"A","ph":"X","pid":"S","tid":1,"ts":5}]}"#
        );
        let data = TraceData::parse(json).unwrap();
        assert_eq!(data.events[0].dur, u64::MAX);
        assert_eq!(data.events[0].end(), u64::MAX);
    }

    #[test]
    fn test_threads_in_first_seen_order() {
        let data = TraceData::parse(SAMPLE).unwrap();
        assert_eq!(data.threads(), vec![Tid(2), Tid(3)]);
    }

    #[test]
    fn test_events_named() {
        let data = TraceData::parse(SAMPLE).unwrap();
        assert_eq!(data.events_named("Fibonacci 3").count(), 1);
        assert_eq!(data.events_named("Fibonacci 9").count(), 0);
    }

    #[test]
    fn test_parse_invalid_json_returns_error() {
        let result = TraceData::parse(r#"{"otherData": {},"traceEvents":[{"cat":"#);
        assert!(matches!(result, Err(TraceError::Json(_))));
    }

    #[test]
    fn test_missing_file_returns_io_error() {
        let result = TraceData::from_file("nonexistent.json");
        assert!(matches!(result, Err(TraceError::Io(_))));
    }
}
