//! Line-oriented text rendering of emulation results.

use crate::emulation::{CallRecord, EmulationResult, SummaryMetadata};
use crate::report::tally::SuspicionTally;

pub const REPORT_HEADER: &str = "DYNAMIC EMULATION REPORT:";
pub const POST_ANALYSIS_HEADER: &str = "POST ANALYSIS REPORT:";
pub const LEGEND: &str =
    "Format: (SUSPICION LEVEL)>>> ADDRESS --> DLL-NAME.FUNCTION-NAME(ARGS) => RETURN-VALUE";

const REPORT_RULE_WIDTH: usize = 85;
const POST_ANALYSIS_RULE_WIDTH: usize = 21;

/// Rendered call log plus the tally accumulated while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLog {
    pub text: String,
    pub tally: SuspicionTally,
}

/// `(<level>)>>> <address> --> <module>.<function>(<args>) => <return>`
pub fn render_call_line(record: &CallRecord) -> String {
    let args = record
        .arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "({})>>> {} --> {}.{}({}) => {}",
        record.suspicion_level,
        record.address,
        record.module,
        record.function,
        args,
        record.return_value
    )
}

/// Render every call in order, counting flagged calls in the same pass.
pub fn render_call_log(calls: &[CallRecord]) -> CallLog {
    tracing::debug!("attempting to build output from emulation");

    let rule = "*".repeat(REPORT_RULE_WIDTH);
    let mut tally = SuspicionTally::default();
    let mut out = String::new();

    out.push_str(REPORT_HEADER);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for record in calls {
        tally.observe(record);
        out.push_str(&render_call_line(record));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(LEGEND);
    out.push('\n');

    CallLog { text: out, tally }
}

pub fn render_post_analysis(summary: &SummaryMetadata, tally: &SuspicionTally) -> String {
    let mut out = String::new();
    out.push_str(POST_ANALYSIS_HEADER);
    out.push('\n');
    out.push_str(&"*".repeat(POST_ANALYSIS_RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Total runtime: {}\n", summary.total_runtime));
    out.push_str(&format!("Architecture: {}\n", summary.architecture));
    out.push_str(&format!("OS run: {}\n", summary.os_run));
    out.push_str(&format!(
        "Total suspicious calls: {}\n",
        tally.total_suspicious_calls
    ));
    out.push_str(&format!("API hash: {}\n", summary.api_hash));
    out
}

/// Full text report: call log, a blank line, then the post-analysis block.
pub fn render_text(result: &EmulationResult) -> String {
    let log = render_call_log(&result.calls);
    let mut out = log.text;
    out.push('\n');
    out.push_str(&render_post_analysis(&result.summary, &log.tally));
    out
}
