//! Class declarations and instantiation.

use std::rc::Rc;

use bramble_ir::ast::{ClassDecl, ClassMember};
use bramble_ir::Expr;
use tracing::debug;

use super::call::Invocation;
use super::{Interpreter, Scopes};
use crate::environment::{Environment, Variable};
use crate::errors::{not_a_class, EvalError, EvalResult};
use crate::value::{
    ClassMemberValue, ClassMethodValue, ClassValue, ClassVariableValue, ConstructorValue,
    InstanceBinding, Value,
};

impl Interpreter {
    /// Build the class descriptor once and declare it in the current frame.
    ///
    /// Field initializers run now, in the declaring scope, so instances that
    /// never overwrite a field share its initial value.
    pub(super) fn eval_class(&mut self, decl: &ClassDecl, scopes: &Scopes) -> EvalResult {
        let class_env = Environment::child(&scopes.current);

        let constructor = decl.constructor.as_ref().map(|ctor| {
            Rc::new(ConstructorValue {
                params: ctor.params.clone(),
                body: Rc::clone(&ctor.body),
                env: class_env.clone(),
            })
        });
        let public = self.build_members(&decl.public, &class_env, scopes)?;
        let private = self.build_members(&decl.private, &class_env, scopes)?;

        debug!(
            class = %decl.name,
            public = public.len(),
            private = private.len(),
            has_constructor = constructor.is_some(),
            "declared class"
        );

        let class = ClassValue {
            name: decl.name.clone(),
            constructor,
            public,
            private,
            env: class_env,
        };
        scopes
            .current
            .declare(&decl.name, Variable::local(Value::Class(Rc::new(class))))
    }

    fn build_members(
        &mut self,
        members: &[ClassMember],
        class_env: &Environment,
        scopes: &Scopes,
    ) -> Result<Vec<ClassMemberValue>, EvalError> {
        members
            .iter()
            .map(|member| match member {
                ClassMember::Method(method) => {
                    Ok(ClassMemberValue::Method(Rc::new(ClassMethodValue {
                        name: method.name.clone(),
                        params: method.params.clone(),
                        body: Rc::clone(&method.body),
                        env: class_env.clone(),
                        is_static: method.is_static,
                        is_private: method.is_private,
                        binding: None,
                    })))
                }
                ClassMember::Field(field) => {
                    let value = match &field.value {
                        Some(expr) => self.eval_expr(expr, scopes)?,
                        None => Value::None,
                    };
                    Ok(ClassMemberValue::Field(Rc::new(ClassVariableValue {
                        name: field.name.clone(),
                        value,
                        is_private: field.is_private,
                        is_readonly: field.is_readonly,
                    })))
                }
            })
            .collect()
    }

    /// `new Name(args)`: run the constructor against the full view of a new
    /// instance and hand back its public view.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class_name))]
    pub(super) fn eval_new(
        &mut self,
        class_name: &str,
        args: &[Expr],
        scopes: &Scopes,
    ) -> EvalResult {
        let class = match scopes.current.lookup(class_name)?.value {
            Value::Class(class) => class,
            other => return Err(not_a_class(class_name, &other)),
        };
        let binding = InstanceBinding::new(Rc::clone(&class));

        if let Some(ctor) = &class.constructor {
            let args = args
                .iter()
                .map(|arg| self.eval_expr(arg, scopes))
                .collect::<Result<Vec<_>, _>>()?;
            let name = format!("{} constructor", class.name);
            self.invoke(
                Invocation {
                    name: &name,
                    params: &ctor.params,
                    body: &ctor.body,
                    env: &ctor.env,
                    this: Some(Value::Object(binding.build_self(false))),
                },
                args,
            )?;
        }

        Ok(Value::Object(binding.build_self(true)))
    }
}
