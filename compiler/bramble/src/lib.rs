//! Bramble - a small dynamic language run by a tree-walking interpreter.
//!
//! # Architecture
//!
//! ```text
//! source
//!     │
//!     ▼
//! lex() ──► TokenList
//!     │
//!     ▼
//! parse() ──► Program
//!     │
//!     ▼
//! Interpreter::interpret() ──► Value + print log
//! ```
//!
//! Each phase stops at its first error. [`run_source`] drives all three and
//! folds their errors into [`Error`].

mod config;
mod error;

use std::sync::Once;

use tracing::debug;

pub use bramble_eval::{
    EvalError, EvalErrorKind, Interpreter, Scopes, Value, DEFAULT_MAX_CALL_DEPTH,
};
pub use bramble_ir::Program;
pub use bramble_lexer::{lex, LexError, LexErrorKind};
pub use bramble_parse::{parse, ParseError, ParseErrorKind};
pub use config::{PrintMode, RunConfig};
pub use error::{Error, ErrorCategory};

/// What a successful run leaves behind.
#[derive(Debug)]
pub struct RunOutcome {
    /// Value of the last top-level statement.
    pub value: Value,
    /// Every line printed, in order.
    pub logs: Vec<String>,
}

/// Lex, parse and run `source` in a fresh root scope.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn run_source(source: &str, config: &RunConfig) -> Result<RunOutcome, Error> {
    let tokens = lex(source)?;
    debug!(tokens = tokens.len(), "lexed");
    let program = parse(&tokens)?;
    debug!(statements = program.body.len(), "parsed");

    let mut interpreter = config.interpreter();
    let value = interpreter.interpret(&program, &Scopes::root())?;
    Ok(RunOutcome {
        value,
        logs: interpreter.take_logs(),
    })
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=bramble_eval=debug`; set `BRAMBLE_LOG_TREE` as well
/// for indented, span-nested output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("BRAMBLE_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
