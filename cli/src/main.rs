//! Conformance CLI binary.
//!
//! Entry point for the `conformance` command-line tool.

mod cli;
mod exit;

use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use conformance_core::compression::CodecRegistry;
use conformance_core::logger::{Logger, StderrLogger};
use conformance_core::process::ProcessSubject;
use conformance_core::runner::{HarnessConfig, RunController, RunError};

use crate::cli::Cli;
use crate::exit::{codes, exit_code};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::from(codes::SUCCESS),
                _ => ExitCode::from(codes::FAILURE),
            };
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(codes::FAILURE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let base = match &cli.config {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HarnessConfig::default(),
    };
    let config = cli.apply(base)?;

    let logger = StderrLogger::new(cli.verbosity());
    let registry = CodecRegistry::standard(&config.toolset());
    let subject = ProcessSubject::new(config.subject_invoker(), &logger);
    let controller = RunController::new(config, &registry, &subject, &logger);

    let result = controller.run();
    match &result {
        // Already reported by the controller.
        Err(RunError::Failed(_)) => {}
        Err(e) => logger.info(&format!("error: {} ({})", e, e.kind())),
        Ok(_) => {}
    }
    Ok(exit_code(&result))
}
