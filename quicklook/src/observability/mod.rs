//! Observability module
//!
//! Logging infrastructure for `QuickLook` batch jobs. Progress and warnings
//! go to stderr through `tracing`; command results go to stdout.

pub mod logging;

pub use logging::{LogFormat, init_logging};
