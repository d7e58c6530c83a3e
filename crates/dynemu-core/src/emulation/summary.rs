use serde::{Deserialize, Serialize};

use crate::emulation::{Payload, WireValue};
use crate::error::ServiceError;

const DYNAMIC_ANALYSIS: &str = "dynamic_analysis";

/// Run-level metadata taken from the first `dynamic_analysis` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub total_runtime: WireValue,
    pub architecture: WireValue,
    pub os_run: WireValue,
    pub api_hash: WireValue,
}

#[derive(Deserialize)]
struct AnalysisRun {
    emulation_total_runtime: WireValue,
    arch: WireValue,
    os_run: WireValue,
    entry_points: Vec<EntryPoint>,
}

#[derive(Deserialize)]
struct EntryPoint {
    apihash: WireValue,
}

impl SummaryMetadata {
    pub fn from_payload(payload: &Payload) -> Result<Self, ServiceError> {
        let runs = payload
            .get(DYNAMIC_ANALYSIS)
            .ok_or_else(|| ServiceError::Malformed(format!("missing `{DYNAMIC_ANALYSIS}`")))?;

        let run = Vec::<AnalysisRun>::deserialize(runs)
            .map_err(|e| ServiceError::Malformed(format!("`{DYNAMIC_ANALYSIS}`: {e}")))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed(format!("`{DYNAMIC_ANALYSIS}` is empty")))?;

        let entry = run.entry_points.into_iter().next().ok_or_else(|| {
            ServiceError::Malformed(format!("`{DYNAMIC_ANALYSIS}[0].entry_points` is empty"))
        })?;

        Ok(Self {
            total_runtime: run.emulation_total_runtime,
            architecture: run.arch,
            os_run: run.os_run,
            api_hash: entry.apihash,
        })
    }
}
