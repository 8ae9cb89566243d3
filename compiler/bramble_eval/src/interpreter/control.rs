//! `if`, `while` and `for`.

use bramble_ir::ast::{ForStmt, IfStmt, WhileStmt};
use bramble_ir::Stmt;

use super::{Flow, FlowResult, Interpreter, Scopes};
use crate::environment::Variable;
use crate::value::{is_truthy, Value};

impl Interpreter {
    /// A taken branch runs in its own frame; a `return` inside it
    /// propagates out of the `if`.
    pub(super) fn eval_if(&mut self, stmt: &IfStmt, scopes: &Scopes) -> FlowResult {
        let condition = self.eval_expr(&stmt.condition, scopes)?;
        if is_truthy(&condition) {
            return self.eval_block(&stmt.then_branch, scopes);
        }
        match &stmt.else_branch {
            Some(branch) => self.eval_stmt(branch, &scopes.child()),
            None => Ok(Flow::Normal(Value::None)),
        }
    }

    /// The counter lives in one frame for the whole loop; each iteration's
    /// body gets a new child of it. After an iteration completes the counter
    /// is `start + iterations`.
    pub(super) fn eval_while(&mut self, stmt: &WhileStmt, scopes: &Scopes) -> FlowResult {
        let counter_scopes = scopes.child();
        if let Some(counter) = &stmt.counter {
            counter_scopes
                .current
                .declare(&counter.name, Variable::local(Value::Number(counter.start)))?;
        }

        let mut completed = 0.0;
        loop {
            let body_scopes = counter_scopes.child();
            let condition = self.eval_expr(&stmt.condition, &body_scopes)?;
            if !is_truthy(&condition) {
                break;
            }
            if let Flow::Return(value) = self.eval_sequence(&stmt.body, &body_scopes)? {
                return Ok(Flow::Return(value));
            }
            completed += 1.0;
            if let Some(counter) = &stmt.counter {
                counter_scopes
                    .current
                    .set_value(&counter.name, Value::Number(counter.start + completed));
            }
        }
        Ok(Flow::Normal(Value::None))
    }

    /// The initializer's frame is shared by every iteration, so the loop
    /// variable is updated in place. When it was declared with a numeric
    /// value it is also reset to `start + iterations` after each update.
    pub(super) fn eval_for(&mut self, stmt: &ForStmt, scopes: &Scopes) -> FlowResult {
        let loop_scopes = scopes.child();
        self.eval_stmt(&stmt.init, &loop_scopes)?;

        let counter = match stmt.init.as_ref() {
            Stmt::VarDecl(decl) => loop_scopes
                .current
                .try_lookup(&decl.name)
                .and_then(|variable| variable.value.as_number())
                .map(|start| (decl.name.as_str(), start)),
            _ => None,
        };

        let mut completed = 0.0;
        loop {
            let condition = self.eval_expr(&stmt.condition, &loop_scopes)?;
            if !is_truthy(&condition) {
                break;
            }
            if let Flow::Return(value) = self.eval_block(&stmt.body, &loop_scopes)? {
                return Ok(Flow::Return(value));
            }
            self.eval_expr(&stmt.update, &loop_scopes)?;
            completed += 1.0;

            if let Some((name, start)) = counter {
                let still_numeric = loop_scopes
                    .current
                    .try_lookup(name)
                    .is_some_and(|variable| variable.value.as_number().is_some());
                if still_numeric {
                    loop_scopes
                        .current
                        .set_value(name, Value::Number(start + completed));
                }
            }
        }
        Ok(Flow::Normal(Value::None))
    }
}
