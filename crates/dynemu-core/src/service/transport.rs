use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use reqwest::header::USER_AGENT;

use crate::error::ServiceError;

/// Header carrying the service credential.
pub const API_KEY_HEADER: &str = "apiKey";

/// Everything needed to issue one multipart submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionRequest<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    pub user_agent: &'a str,
    pub file_field: &'static str,
    pub file_path: &'a Path,
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Issues submissions on behalf of a [`ServiceClient`](crate::service::ServiceClient).
pub trait Transport {
    fn submit(&self, request: &SubmissionRequest<'_>) -> Result<TransportResponse, ServiceError>;
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport; `None` means the request may block indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn submit(&self, request: &SubmissionRequest<'_>) -> Result<TransportResponse, ServiceError> {
        let form = multipart::Form::new()
            .file(request.file_field, request.file_path)
            .map_err(|e| {
                ServiceError::Transport(format!(
                    "failed to attach {}: {e}",
                    request.file_path.display()
                ))
            })?;

        let response = self
            .client
            .post(request.url)
            .header(API_KEY_HEADER, request.api_key)
            .header(USER_AGENT, request.user_agent)
            .multipart(form)
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
