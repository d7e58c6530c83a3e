//! Dynamic-emulation triage: submit a PE sample to a remote emulation
//! service and turn the returned API-call trace into a suspicious-activity
//! report.

pub mod artifact;
pub mod config;
pub mod emulation;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod service;

pub use error::{Error, Result};
pub use pipeline::{Analysis, analyze};

/// JSON schema version of `--format json` reports.
pub const SCHEMA_VERSION: &str = "0.1.0";
