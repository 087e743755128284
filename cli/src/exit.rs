//! Exit codes for the conformance CLI.

use conformance_core::runner::{RunError, RunReport};

/// Exit code constants.
pub mod codes {
    /// Every pipeline passed for every file.
    pub const SUCCESS: u8 = 0;
    /// Usage error, tool failure, mismatch or container failure.
    pub const FAILURE: u8 = 1;
}

/// Map a finished run to an exit code.
pub fn exit_code(result: &Result<RunReport, RunError>) -> u8 {
    match result {
        Ok(report) if report.passed() => codes::SUCCESS,
        _ => codes::FAILURE,
    }
}
