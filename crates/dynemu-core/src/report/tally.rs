use serde::{Deserialize, Serialize};

use crate::emulation::CallRecord;

/// Running count of flagged calls for one rendering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionTally {
    pub total_suspicious_calls: u64,
}

impl SuspicionTally {
    /// Count `record` if its suspicion level is non-zero.
    pub fn observe(&mut self, record: &CallRecord) {
        if record.suspicion_level.is_flagged() {
            self.total_suspicious_calls += 1;
        }
    }

    pub fn over<'a>(records: impl IntoIterator<Item = &'a CallRecord>) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.observe(record);
        }
        tally
    }
}
