use std::fs;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use dynemu_core::error::HostError;
use dynemu_core::host::{HostEnvironment, ProgramInfo};

use crate::args::Args;

/// Host environment assembled from command-line arguments and file metadata.
pub struct CliHost<'a> {
    args: &'a Args,
}

impl<'a> CliHost<'a> {
    pub fn new(args: &'a Args) -> Self {
        Self { args }
    }
}

impl HostEnvironment for CliHost<'_> {
    fn program_info(&self) -> Result<ProgramInfo, HostError> {
        let path = &self.args.sample_path;
        if path.as_os_str().is_empty() {
            return Err(HostError::MissingPath);
        }

        let name = match &self.args.name {
            Some(name) => name.clone(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        };

        Ok(ProgramInfo {
            path: path.clone(),
            name,
            creation_date: creation_date(path),
            language_id: self.args.language_id.clone(),
            compiler_spec_id: self.args.compiler_spec.clone(),
        })
    }
}

/// Creation time where the platform records one, else modification time.
fn creation_date(path: &std::path::Path) -> String {
    fs::metadata(path)
        .and_then(|m| m.created().or_else(|_| m.modified()))
        .map(|t: SystemTime| DateTime::<Utc>::from(t).to_rfc3339())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn name_defaults_to_file_name() {
        let args = Args::parse_from(["dynemu", "/samples/dropper.exe"]);
        let info = CliHost::new(&args).program_info().unwrap();

        assert_eq!(info.name, "dropper.exe");
        assert_eq!(info.language_id, "unknown");
        assert_eq!(info.creation_date, "unknown");
    }

    #[test]
    fn explicit_metadata_is_passed_through() {
        let args = Args::parse_from([
            "dynemu",
            "/samples/a.bin",
            "--name",
            "payload",
            "--language-id",
            "x86:LE:64:default",
            "--compiler-spec",
            "windows",
        ]);
        let info = CliHost::new(&args).program_info().unwrap();

        assert_eq!(info.name, "payload");
        assert_eq!(info.language_id, "x86:LE:64:default");
        assert_eq!(info.compiler_spec_id, "windows");
    }
}
