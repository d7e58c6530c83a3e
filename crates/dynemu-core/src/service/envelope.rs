use serde::Deserialize;

use crate::emulation::Payload;
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(rename = "isError")]
    is_error: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Option<Payload>,
}

/// Interpret a service response body.
///
/// `data.isError == true` maps to [`ServiceError::Service`] with the embedded
/// message; otherwise `data.response` is the payload.
pub fn decode(status: u16, body: &[u8]) -> Result<Payload, ServiceError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| ServiceError::Decode {
        status,
        message: e.to_string(),
    })?;

    let data = envelope.data;
    if data.is_error {
        return Err(ServiceError::Service(
            data.error.unwrap_or_else(|| "unspecified error".to_string()),
        ));
    }

    data.response
        .ok_or_else(|| ServiceError::Malformed("envelope is missing `data.response`".to_string()))
}
