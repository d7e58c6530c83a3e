use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dynemu_core::artifact::ArtifactWriter;
use dynemu_core::config::ServiceConfig;
use dynemu_core::emulation::EmulationOutcome;
use dynemu_core::report::model::{Report, ToolInfo};
use dynemu_core::report::render;
use dynemu_core::service::ServiceClient;

mod args;
mod host;

/// Run aborted: rejected sample, missing credential, or local I/O failure.
const EXIT_ABORTED: u8 = 2;
/// Submission attempted but nothing to report.
const EXIT_EMPTY: u8 = 1;

fn main() -> ExitCode {
    let args = args::Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(EXIT_ABORTED)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(args: &args::Args) -> dynemu_core::Result<ExitCode> {
    let config = ServiceConfig::from_env(args.base_url.as_str())?
        .with_timeout(args.timeout_secs.map(Duration::from_secs));
    let client = ServiceClient::new(config)?;
    let artifacts = match &args.artifact_dir {
        Some(dir) => ArtifactWriter::in_dir(dir),
        None => ArtifactWriter::new(),
    };

    let analysis = dynemu_core::analyze(&host::CliHost::new(args), &client, &artifacts)?;

    let EmulationOutcome::Populated(result) = analysis.outcome else {
        return Ok(ExitCode::from(EXIT_EMPTY));
    };

    let output = match args.format {
        args::OutputFormat::Text => render::render_text(&result),
        args::OutputFormat::Json => {
            let tool = ToolInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            };
            let report = Report::new(
                tool,
                analysis.program,
                analysis.sample,
                result,
                analysis.artifact_path.map(|p| p.display().to_string()),
            );
            let mut json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => print!("{output}"),
    }

    info!("emulation performed successfully");
    Ok(ExitCode::SUCCESS)
}
