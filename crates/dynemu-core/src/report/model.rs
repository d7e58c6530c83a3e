use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::emulation::{CallRecord, EmulationResult, SummaryMetadata};
use crate::host::ProgramInfo;
use crate::report::tally::SuspicionTally;
use crate::sample::SampleInfo;

/// Machine-readable form of a populated emulation report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub program: ProgramInfo,
    pub sample: SampleInfo,
    pub calls: Vec<CallRecord>,
    pub summary: SummaryMetadata,
    pub total_suspicious_calls: u64,
    /// Where the raw service payload was saved, if anywhere.
    pub artifact_path: Option<String>,
}

impl Report {
    pub fn new(
        tool: ToolInfo,
        program: ProgramInfo,
        sample: SampleInfo,
        result: EmulationResult,
        artifact_path: Option<String>,
    ) -> Self {
        let tally = SuspicionTally::over(&result.calls);

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            program,
            sample,
            calls: result.calls,
            summary: result.summary,
            total_suspicious_calls: tally.total_suspicious_calls,
            artifact_path,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}
