//! Command-line interface for scope-trace
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::Args;
