//! Shared helpers for phase tests.

use bramble::{run_source, Error, RunConfig, RunOutcome};

/// Run with printing suppressed.
pub fn run(source: &str) -> Result<RunOutcome, Error> {
    run_source(source, &RunConfig::silent())
}

/// Run to completion and return the print log.
pub fn logs(source: &str) -> Vec<String> {
    match run(source) {
        Ok(outcome) => outcome.logs,
        Err(err) => panic!("`{source}` failed: {err}"),
    }
}

/// Run expecting failure.
pub fn fail(source: &str) -> Error {
    match run(source) {
        Ok(outcome) => panic!("`{source}` succeeded with logs {:?}", outcome.logs),
        Err(err) => err,
    }
}
