//! Error taxonomy for the emulation pipeline.
//!
//! Precondition failures (`GateError`, `ConfigError`, `HostError`) abort a run
//! before any network activity. `ServiceError` covers everything that can go
//! wrong once a submission is attempted; the pipeline folds it into an empty
//! outcome instead of propagating it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Local validation failures raised before a sample is submitted.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to inspect {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("only able to handle files up to {limit} bytes (got {size} bytes)")]
    TooLarge { size: u64, limit: u64 },
    #[error("can only handle Windows PE files for emulation")]
    NotPortableExecutable,
}

/// Why a submission produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request to the emulation service failed: {0}")]
    Transport(String),
    #[error("failed to decode service response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
    #[error("emulation service reported an error: {0}")]
    Service(String),
    #[error("malformed emulation response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} environment variable is not set with associated API key")]
    MissingApiKey { var: &'static str },
}

/// Failures reported by the host environment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("file path does not exist")]
    MissingPath,
}

/// Errors that abort a pipeline run before a submission is made.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
