//! Structured logging
//!
//! One `tracing` subscriber for the whole process: console output always,
//! plus an optional JSON rolling file. Call [`init_logging`] once at startup
//! and hold the returned guard for the program's lifetime.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
