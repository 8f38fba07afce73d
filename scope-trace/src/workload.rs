//! Demo benchmark workload
//!
//! Recursive Fibonacci on one thread per input, with every call traced.
//! Produces many short, deeply nested regions across a few threads, which is
//! what the trace viewer is good at showing.

use std::thread;
use std::time::Duration;

use crate::session::SessionWriter;
use crate::{profile_function, profile_scope};

/// Workload parameters
#[derive(Debug, Clone)]
pub struct Workload {
    /// One thread is spawned per input
    pub inputs: Vec<u32>,
    /// Sleep inside every call so that even the leaves get a visible width
    pub pause: Option<Duration>,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            inputs: vec![9, 10],
            pause: None,
        }
    }
}

/// Traced naive Fibonacci, `fibonacci(1) == fibonacci(2) == 1`
pub fn fibonacci(writer: &SessionWriter, n: u32, pause: Option<Duration>) -> u64 {
    profile_scope!(writer, format!("Fibonacci {n}"));

    if let Some(pause) = pause {
        thread::sleep(pause);
    }

    if n < 3 {
        return 1;
    }
    fibonacci(writer, n - 1, pause) + fibonacci(writer, n - 2, pause)
}

/// Number of calls `fibonacci(n)` makes, itself included
pub fn call_count(n: u32) -> u64 {
    if n < 3 {
        1
    } else {
        1 + call_count(n - 1) + call_count(n - 2)
    }
}

/// Run every input on its own thread and return `(input, result)` pairs in input order
pub fn run_benchmarks(writer: &SessionWriter, workload: &Workload) -> Vec<(u32, u64)> {
    profile_function!(writer);

    thread::scope(|scope| {
        let handles: Vec<_> = workload
            .inputs
            .iter()
            .map(|&n| scope.spawn(move || (n, fibonacci(writer, n, workload.pause))))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}
