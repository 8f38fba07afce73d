//! # scope-trace - Demo Benchmark Entry Point
//!
//! Begins a session, runs the traced Fibonacci workload on one thread per
//! input, ends the session and optionally verifies the written file.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use scope_trace::cli::Args;
use scope_trace::trace_data::TraceData;
use scope_trace::workload::run_benchmarks;
use scope_trace::SessionWriter;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    // clap exits with status 2 on usage errors
    let args = Args::parse();
    std::process::exit(match run(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run(args: &Args) -> Result<()> {
    let writer = SessionWriter::new();
    writer
        .begin_session(args.session.as_str(), &args.output)
        .with_context(|| format!("Failed to start session '{}'", args.session))?;

    if !args.quiet {
        println!("Running benchmarks...");
    }
    let workload = args.workload();
    let results = run_benchmarks(&writer, &workload);
    for (n, value) in &results {
        info!("fibonacci({n}) = {value}");
    }

    writer
        .end_session()
        .with_context(|| format!("Failed to finalize {}", args.output.display()))?;

    if !args.quiet {
        println!("Trace written to {}", args.output.display());
    }

    if args.check {
        let data = TraceData::from_file(&args.output)
            .with_context(|| format!("Trace file {} is not valid", args.output.display()))?;
        println!(
            "{}: {} events on {} threads",
            args.output.display(),
            data.events.len(),
            data.threads().len()
        );
    }

    Ok(())
}
