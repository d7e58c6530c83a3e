//! Submission of samples to the remote emulation service.

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::{ANALYSIS_ENDPOINT, FILE_FIELD, ServiceClient};
pub use transport::{API_KEY_HEADER, HttpTransport, SubmissionRequest, Transport, TransportResponse};
