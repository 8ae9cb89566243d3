//! Grammar productions, split by construct.
//!
//! - `stmt`: statement dispatch, declarations, control flow
//! - `class`: class bodies
//! - `expr/`: the expression precedence chain

mod class;
mod expr;
mod stmt;
