//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::workload::Workload;

#[derive(Parser, Debug)]
#[command(
    name = "scope-trace",
    about = "Run a traced Fibonacci benchmark and write a Chrome trace file",
    after_help = "\
EXAMPLES:
    scope-trace                               Fibonacci 9 and 10 into results.json
    scope-trace -n 12 14 16 -o fib.json       Three threads, custom output
    RUST_LOG=debug scope-trace --check        Log session events, verify the file"
)]
pub struct Args {
    /// Trace file to write (truncated if it exists)
    #[arg(short, long, value_name = "FILE", default_value = "results.json")]
    pub output: PathBuf,

    /// Session name, written as the `pid` of every event
    #[arg(short, long, default_value = "Benchmark")]
    pub session: String,

    /// Fibonacci inputs, one thread each
    #[arg(
        short = 'n',
        long = "fib",
        value_name = "N",
        num_args = 1..,
        default_values_t = [9u32, 10],
        value_parser = clap::value_parser!(u32).range(1..=40)
    )]
    pub inputs: Vec<u32>,

    /// Sleep this many microseconds inside every traced call (0 to disable)
    ///
    /// Keeps the leaf calls wide enough to show up in the viewer.
    #[arg(long, value_name = "MICROS", default_value = "1")]
    pub pause_us: u64,

    /// Re-read the trace after the session ends and report what it holds
    #[arg(long)]
    pub check: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn workload(&self) -> Workload {
        Workload {
            inputs: self.inputs.clone(),
            pause: (self.pause_us > 0).then(|| Duration::from_micros(self.pause_us)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["scope-trace"]);
        assert_eq!(args.output, PathBuf::from("results.json"));
        assert_eq!(args.session, "Benchmark");
        assert_eq!(args.inputs, [9, 10]);
        assert_eq!(args.workload().pause, Some(Duration::from_micros(1)));
        assert!(!args.check);
    }

    #[test]
    fn test_multiple_inputs_and_pause() {
        let args = Args::parse_from(["scope-trace", "-n", "3", "4", "5", "--pause-us", "1"]);
        let workload = args.workload();
        assert_eq!(workload.inputs, [3, 4, 5]);
        assert_eq!(workload.pause, Some(Duration::from_micros(1)));
    }

    #[test]
    fn test_zero_pause_disables_sleep() {
        let args = Args::parse_from(["scope-trace", "--pause-us", "0"]);
        assert!(args.workload().pause.is_none());
    }

    #[test]
    fn test_input_out_of_range_is_rejected() {
        assert!(Args::try_parse_from(["scope-trace", "-n", "0"]).is_err());
        assert!(Args::try_parse_from(["scope-trace", "-n", "41"]).is_err());
    }
}
