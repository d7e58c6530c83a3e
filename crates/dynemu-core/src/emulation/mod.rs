//! Typed view of a successful emulation response.

pub mod call;
pub mod summary;

pub use call::{CallRecord, SuspicionLevel, WireValue, build_call_table};
pub use summary::SummaryMetadata;

use crate::error::ServiceError;

/// The raw `data.response` object returned by the service.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Calls and run metadata extracted from a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulationResult {
    pub calls: Vec<CallRecord>,
    pub summary: SummaryMetadata,
}

impl EmulationResult {
    pub fn from_payload(payload: &Payload) -> Result<Self, ServiceError> {
        Ok(Self {
            calls: build_call_table(payload)?,
            summary: SummaryMetadata::from_payload(payload)?,
        })
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EmulationOutcome {
    /// Nothing to report; carries the reason.
    Empty(ServiceError),
    Populated(EmulationResult),
}

impl EmulationOutcome {
    /// Fold a submission result into an outcome, extracting the call table
    /// and summary from a successful payload.
    pub fn from_submission(submission: Result<Payload, ServiceError>) -> Self {
        match submission.and_then(|payload| EmulationResult::from_payload(&payload)) {
            Ok(result) => Self::Populated(result),
            Err(cause) => Self::Empty(cause),
        }
    }
}
