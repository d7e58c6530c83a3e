//! One end-to-end submission: gate, submit, persist, extract.

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::artifact::ArtifactWriter;
use crate::emulation::EmulationOutcome;
use crate::error::Result;
use crate::host::{HostEnvironment, ProgramInfo};
use crate::sample::{SampleInfo, check_submission, read_sample};
use crate::service::{ServiceClient, Transport};

/// Everything a run produced, ready for rendering.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: ProgramInfo,
    pub sample: SampleInfo,
    pub outcome: EmulationOutcome,
    pub artifact_path: Option<PathBuf>,
}

/// Run one submission for the program the host supplies.
///
/// Precondition failures (host, gate) return `Err` before the transport is
/// touched. Anything that goes wrong after submission ends up in an
/// [`EmulationOutcome::Empty`].
pub fn analyze<T: Transport>(
    host: &dyn HostEnvironment,
    client: &ServiceClient<T>,
    artifacts: &ArtifactWriter,
) -> Result<Analysis> {
    let program = host.program_info()?;
    let path = program.path.as_path();
    debug!("current file path: {}", path.display());
    debug!("current program name: {}", program.name);
    debug!("database creation date: {}", program.creation_date);
    debug!("file language ID: {}", program.language_id);
    debug!("compiler information: {}", program.compiler_spec_id);

    check_submission(path)?;
    let sample = read_sample(path)?;

    info!(
        sha256 = %sample.hash.value,
        size = sample.size_bytes,
        "sending file: {} to start emulation",
        path.display()
    );
    let submission = client.dynamic_emulation(path);

    let artifact_path = match &submission {
        Ok(payload) => artifacts.persist(payload),
        Err(_) => None,
    };

    let outcome = EmulationOutcome::from_submission(submission);
    if let EmulationOutcome::Empty(cause) = &outcome {
        error!("dynamic emulation was not successful: {cause}");
    }

    Ok(Analysis {
        program,
        sample,
        outcome,
        artifact_path,
    })
}
