//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use bramble_stack::DepthLimit;

use super::Interpreter;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default bound on nested user-level calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2000;

/// Builder for creating Interpreter instances.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set where `print` output goes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the maximum call depth before a recursion error is raised.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            logs: Vec::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            depth: DepthLimit::new(self.max_call_depth),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
