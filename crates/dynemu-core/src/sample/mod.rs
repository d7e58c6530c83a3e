//! Local handling of the sample file: admission checks and fingerprinting.

pub mod gate;
pub mod read;

pub use gate::{MAX_SUBMISSION_BYTES, PE_MAGIC, check_submission};
pub use read::{SampleHash, SampleInfo, read_sample};
