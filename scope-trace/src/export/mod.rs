//! Trace export functionality
//!
//! This module owns the on-disk format: the Chrome Trace Event container
//! written around a session and the one-line JSON object written per record.

pub mod chrome_trace;

pub use chrome_trace::{sanitize_name, write_event, FOOTER, HEADER};
