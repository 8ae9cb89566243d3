//! Run configuration.

use bramble_eval::{silent_handler, stdout_handler, Interpreter, DEFAULT_MAX_CALL_DEPTH};

/// Where `print` output goes. The log is collected either way.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PrintMode {
    #[default]
    Stdout,
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub print: PrintMode,
    /// Nested user-level calls allowed before the run fails.
    pub max_call_depth: usize,
}

impl RunConfig {
    /// Default configuration with printing suppressed.
    pub fn silent() -> Self {
        RunConfig {
            print: PrintMode::Silent,
            ..RunConfig::default()
        }
    }

    pub(crate) fn interpreter(&self) -> Interpreter {
        let handler = match self.print {
            PrintMode::Stdout => stdout_handler(),
            PrintMode::Silent => silent_handler(),
        };
        Interpreter::builder()
            .print_handler(handler)
            .max_call_depth(self.max_call_depth)
            .build()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            print: PrintMode::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
