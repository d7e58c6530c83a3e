use std::path::Path;

use tracing::{debug, error};

use crate::config::ServiceConfig;
use crate::emulation::Payload;
use crate::error::ServiceError;
use crate::service::envelope;
use crate::service::transport::{HttpTransport, SubmissionRequest, Transport};

/// Path of the analysis endpoint relative to the base URL.
pub const ANALYSIS_ENDPOINT: &str = "/api/dynamicanalysis";

/// Multipart field the sample is attached under.
pub const FILE_FIELD: &str = "filename1";

/// Submits samples and interprets the service's response envelope.
#[derive(Debug, Clone)]
pub struct ServiceClient<T = HttpTransport> {
    config: ServiceConfig,
    transport: T,
}

impl ServiceClient<HttpTransport> {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> ServiceClient<T> {
    pub fn with_transport(config: ServiceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url, ANALYSIS_ENDPOINT)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit `path` for dynamic emulation.
    ///
    /// Single attempt, no retry. Every failure comes back as a
    /// [`ServiceError`]; a service-reported error is also logged here.
    pub fn dynamic_emulation(&self, path: &Path) -> Result<Payload, ServiceError> {
        let url = self.endpoint();
        debug!(%url, "submitting sample");

        let request = SubmissionRequest {
            url: &url,
            api_key: &self.config.api_key,
            user_agent: &self.config.user_agent,
            file_field: FILE_FIELD,
            file_path: path,
        };

        let response = self.transport.submit(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "service responded");

        let result = envelope::decode(response.status, &response.body);
        if let Err(ServiceError::Service(message)) = &result {
            error!("caught error ({message}) while making request to the API");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::transport::TransportResponse;
    use std::cell::RefCell;

    /// Records every request and replies with a canned result.
    struct CannedTransport {
        reply: Result<TransportResponse, ServiceError>,
        seen: RefCell<Vec<(String, String, String, &'static str)>>,
    }

    impl CannedTransport {
        fn body(body: &str) -> Self {
            Self {
                reply: Ok(TransportResponse {
                    status: 200,
                    body: body.as_bytes().to_vec(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn submit(
            &self,
            request: &SubmissionRequest<'_>,
        ) -> Result<TransportResponse, ServiceError> {
            self.seen.borrow_mut().push((
                request.url.to_string(),
                request.api_key.to_string(),
                request.user_agent.to_string(),
                request.file_field,
            ));
            self.reply.clone()
        }
    }

    fn client(transport: CannedTransport) -> ServiceClient<CannedTransport> {
        ServiceClient::with_transport(
            ServiceConfig::new("https://emu.example/", "secret"),
            transport,
        )
    }

    #[test]
    fn builds_request_against_fixed_endpoint() {
        let client = client(CannedTransport::body(
            r#"{"data":{"isError":false,"response":{"parsed_output":[]}}}"#,
        ));

        client.dynamic_emulation(Path::new("sample.exe")).unwrap();

        let seen = client.transport().seen.borrow();
        assert_eq!(seen.len(), 1);
        let (url, key, agent, field) = &seen[0];
        assert_eq!(url, "https://emu.example/api/dynamicanalysis");
        assert_eq!(key, "secret");
        assert!(agent.starts_with("dynemu/"));
        assert_eq!(*field, "filename1");
    }

    #[test]
    fn service_error_envelope_is_surfaced() {
        let client = client(CannedTransport::body(
            r#"{"data":{"isError":true,"error":"bad file"}}"#,
        ));

        assert_eq!(
            client.dynamic_emulation(Path::new("sample.exe")),
            Err(ServiceError::Service("bad file".into()))
        );
    }

    #[test]
    fn transport_failure_is_returned_not_panicked() {
        let client = client(CannedTransport {
            reply: Err(ServiceError::Transport("connection refused".into())),
            seen: RefCell::new(Vec::new()),
        });

        assert!(matches!(
            client.dynamic_emulation(Path::new("sample.exe")),
            Err(ServiceError::Transport(_))
        ));
    }
}
