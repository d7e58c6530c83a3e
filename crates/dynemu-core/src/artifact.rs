//! Persists raw service payloads for later inspection.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::Builder;
use tracing::{error, info};

use crate::emulation::Payload;

pub const ARTIFACT_PREFIX: &str = "dynemu_results_";
pub const ARTIFACT_SUFFIX: &str = ".json";

/// Writes one uniquely named JSON file per payload and leaves it on disk.
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    dir: Option<PathBuf>,
}

impl ArtifactWriter {
    /// Writer targeting the system temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Write `payload` as indented JSON, returning the kept file's path.
    ///
    /// An empty payload writes nothing and returns `Ok(None)`.
    pub fn write(&self, payload: &Payload) -> Result<Option<PathBuf>> {
        if payload.is_empty() {
            return Ok(None);
        }

        let mut builder = Builder::new();
        builder.prefix(ARTIFACT_PREFIX).suffix(ARTIFACT_SUFFIX);
        let file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("failed to create artifact file")?;

        write_pretty(file.as_file(), payload)
            .with_context(|| format!("failed to write artifact: {}", file.path().display()))?;

        let (_, path) = file.keep().context("failed to keep artifact file")?;
        Ok(Some(path))
    }

    /// Like [`write`](Self::write) but logs the result instead of returning
    /// an error, so a failed write never aborts the run.
    pub fn persist(&self, payload: &Payload) -> Option<PathBuf> {
        match self.write(payload) {
            Ok(Some(path)) => {
                info!("full dynamic emulation results saved to: {}", path.display());
                Some(path)
            }
            Ok(None) => {
                info!("error during analysis will not save empty file");
                None
            }
            Err(e) => {
                error!("could not save dynamic emulation results: {e:#}");
                None
            }
        }
    }
}

fn write_pretty(file: &File, payload: &Payload) -> Result<()> {
    let mut writer = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    payload.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}
