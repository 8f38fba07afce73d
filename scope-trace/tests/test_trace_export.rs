use scope_trace::trace_data::TraceData;
use scope_trace::{SessionWriter, Tid};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const HEADER: &str = r#"{"otherData": {},"traceEvents":["#;

#[test]
fn test_single_timer_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    let writer = SessionWriter::new();
    writer.begin_session("S", &path).unwrap();
    {
        let mut timer = writer.scope("A");
        thread::sleep(Duration::from_millis(10));
        timer.stop();
    }
    writer.end_session().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!(r#"{HEADER}{{"cat":"function","dur":"#)));
    assert!(content.ends_with(r#"}]}"#));

    let data = TraceData::parse(&content).unwrap();
    assert_eq!(data.events.len(), 1);
    let event = &data.events[0];
    assert_eq!(event.name, "A");
    assert_eq!(event.cat, "function");
    assert_eq!(event.ph, "X");
    assert_eq!(event.pid, "S");
    assert_eq!(event.tid, Tid::current().0);
    assert!(
        (5_000..=50_000).contains(&event.dur),
        "duration {}us outside tolerance",
        event.dur
    );
}

#[test]
fn test_concurrent_timers_on_two_threads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("threads.json");

    let writer = SessionWriter::new();
    writer.begin_session("S", &path).unwrap();

    let barrier = Barrier::new(2);
    let tids: Vec<Tid> = thread::scope(|scope| {
        let handles: Vec<_> = ["left", "right"]
            .into_iter()
            .map(|name| {
                let (writer, barrier) = (&writer, &barrier);
                scope.spawn(move || {
                    let _timer = writer.scope(name);
                    barrier.wait();
                    Tid::current()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    writer.end_session().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let body = &content[HEADER.len()..content.len() - 2];
    assert_eq!(body.matches("},{").count(), 1, "{content}");

    let data = TraceData::parse(&content).unwrap();
    assert_eq!(data.events.len(), 2);
    assert_ne!(data.events[0].tid, data.events[1].tid);
    for (name, tid) in ["left", "right"].iter().zip(&tids) {
        let event = data.events_named(name).next().unwrap();
        assert_eq!(event.tid, tid.0);
    }
}

#[test]
fn test_many_threads_lose_nothing() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 200;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stress.json");

    let writer = Arc::new(SessionWriter::new());
    writer.begin_session("stress", &path).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let writer = Arc::clone(&writer);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let _timer = writer.scope(format!("t{t}-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    writer.end_session().unwrap();

    let data = TraceData::from_file(&path).unwrap();
    assert_eq!(data.events.len(), THREADS * PER_THREAD);
    assert_eq!(data.threads().len(), THREADS);

    let mut names: Vec<_> = data.events.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), THREADS * PER_THREAD, "duplicated records");

    // Per thread, records appear in the order that thread closed them
    for t in 0..THREADS {
        let order: Vec<usize> = data
            .events
            .iter()
            .filter_map(|e| e.name.strip_prefix(&format!("t{t}-")))
            .map(|i| i.parse().unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_quoted_name_is_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quotes.json");

    let writer = SessionWriter::new();
    writer.begin_session("S", &path).unwrap();
    drop(writer.scope(r#"He said "hi""#));
    writer.end_session().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#""name":"He said 'hi'""#), "{content}");
    let data = TraceData::parse(&content).unwrap();
    assert_eq!(data.events[0].name, "He said 'hi'");
}

#[test]
fn test_durations_match_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested.json");

    let writer = SessionWriter::new();
    writer.begin_session("S", &path).unwrap();
    {
        let _outer = writer.scope("outer");
        thread::sleep(Duration::from_millis(2));
        let _inner = writer.scope("inner");
        thread::sleep(Duration::from_millis(2));
    }
    writer.end_session().unwrap();

    let data = TraceData::from_file(&path).unwrap();
    let outer = data.events_named("outer").next().unwrap();
    let inner = data.events_named("inner").next().unwrap();
    assert!(outer.ts <= inner.ts);
    assert!(inner.end() <= outer.end());
    assert!(outer.dur >= inner.dur);
}
