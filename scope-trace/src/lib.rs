//! # scope-trace - Scoped Wall-Clock Timers for Chrome Tracing
//!
//! scope-trace records how long named regions of code take, on which thread,
//! and writes the results as a Chrome Trace Event file that opens unmodified
//! in `chrome://tracing`, <https://ui.perfetto.dev> or Speedscope.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Instrumented code                      │
//! │   profile_scope!(w, "x")   profile_function!(w)   w.scope  │
//! └──────────────┬─────────────────────────────────────────────┘
//!                │ ScopedTimer dropped / stopped
//!                ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │              SessionWriter  (one Mutex)                    │
//! │   begin_session ──▶ header                                 │
//! │   write_record  ──▶ [","] {"cat":"function",...}  + flush  │
//! │   end_session   ──▶ footer                                 │
//! └──────────────┬─────────────────────────────────────────────┘
//!                ▼
//!          trace.json
//! ```
//!
//! ## Module Structure
//!
//! - [`session`]: session lifecycle and serialized record output
//! - [`timer`]: the scope guard that measures one region
//! - [`record`]: the completed measurement passed between the two
//! - [`export`]: the fixed on-disk format
//! - [`trace_data`]: reading a written trace back
//! - [`workload`]: the demo benchmark run by the `scope-trace` binary
//! - [`cli`]: command-line arguments of the binary
//! - [`domain`]: core newtypes (`Tid`, `Timestamp`, `Duration`) and errors
//!
//! ## Typical Usage
//!
//! ```no_run
//! use scope_trace::{profile_scope, SessionWriter};
//!
//! # fn main() -> Result<(), scope_trace::TraceError> {
//! let writer = SessionWriter::new();
//! writer.begin_session("Profile", "results.json")?;
//! {
//!     profile_scope!(writer, "setup");
//!     // ...
//! }
//! writer.end_session()?;
//! # Ok(())
//! # }
//! ```
//!
//! Records written while no session is active are dropped, so the macros can
//! stay in the code permanently. Building without the default `profiling`
//! feature compiles them out entirely.

// Expose modules for testing
pub mod cli;
pub mod domain;
pub mod export;
mod macros;
pub mod record;
pub mod session;
pub mod timer;
pub mod trace_data;
pub mod workload;

pub use domain::{Duration, Tid, Timestamp, TraceError};
pub use record::TraceRecord;
pub use session::SessionWriter;
pub use timer::ScopedTimer;
