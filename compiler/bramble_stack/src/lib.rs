//! Stack safety for the recursive parser and evaluator.
//!
//! Two separate concerns live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so that
//!   deeply nested expressions (`((((...))))`, long `else if` chains) do not
//!   overflow while being parsed or evaluated.
//! - [`DepthLimit`] counts nested user-level calls so that runaway recursion
//!   in a script is reported as an error instead of exhausting memory.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack in 1MB segments.
//! - **WASM targets**: passthrough, the host manages the stack.

use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`DepthLimit::enter`] when the limit would be exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximum call depth of {} exceeded", self.limit)
    }
}

impl std::error::Error for DepthExceeded {}

/// Counter for nested calls.
///
/// Every successful [`enter`](Self::enter) must be paired with one
/// [`exit`](Self::exit), including on error paths.
#[derive(Clone, Copy, Debug)]
pub struct DepthLimit {
    current: usize,
    max: usize,
}

impl DepthLimit {
    pub const fn new(max: usize) -> Self {
        DepthLimit { current: 0, max }
    }

    #[inline]
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.current >= self.max {
            return Err(DepthExceeded { limit: self.max });
        }
        self.current += 1;
        Ok(())
    }

    #[inline]
    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
