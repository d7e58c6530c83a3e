//! Boundary to the host analysis environment that owns the target binary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Metadata the host supplies about the program under analysis.
///
/// Everything except `path` is opaque to the pipeline and only logged or
/// echoed into JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub path: PathBuf,
    pub name: String,
    pub creation_date: String,
    pub language_id: String,
    pub compiler_spec_id: String,
}

/// Supplies the program the pipeline should submit.
pub trait HostEnvironment {
    fn program_info(&self) -> Result<ProgramInfo, HostError>;
}

/// A fixed `ProgramInfo` acts as its own host.
impl HostEnvironment for ProgramInfo {
    fn program_info(&self) -> Result<ProgramInfo, HostError> {
        if self.path.as_os_str().is_empty() {
            return Err(HostError::MissingPath);
        }
        Ok(self.clone())
    }
}
