use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fs, path::Path};

/// Identity of the submitted sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleInfo {
    pub path: String,
    pub size_bytes: u64,
    pub hash: SampleHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleHash {
    pub algorithm: String,
    pub value: String,
}

/// Read a sample and fingerprint it.
///
/// The fingerprint depends only on the file bytes, so the same sample always
/// logs the same identity regardless of where it lives on disk.
pub fn read_sample(path: &Path) -> Result<SampleInfo> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read sample: {}", path.display()))?;

    let digest = Sha256::digest(&bytes);

    Ok(SampleInfo {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        hash: SampleHash {
            algorithm: "sha256".to_string(),
            value: hex::encode(digest),
        },
    })
}
