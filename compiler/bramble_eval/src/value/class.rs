//! Class descriptors and per-instance views.
//!
//! A class value is built once per declaration. Each `new` allocates one
//! shared store and wraps it in an [`InstanceBinding`]; every instance method
//! handed out for that instance carries the binding, from which it rebuilds
//! the full view (`this`) on demand. The public view returned to callers is
//! a copy of the store with private names filtered out.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bramble_ir::ast::Stmt;
use bramble_ir::Params;

use super::{ConstructorValue, ObjectRef, Value};
use crate::environment::Environment;

pub struct ClassMethodValue {
    pub name: String,
    pub params: Params,
    pub body: Rc<[Stmt]>,
    pub env: Environment,
    pub is_static: bool,
    pub is_private: bool,
    /// Instance this method was handed out for. Static methods and the
    /// descriptors stored on the class itself have none.
    pub binding: Option<InstanceBinding>,
}

impl ClassMethodValue {
    /// A copy of this descriptor bound to `binding`.
    pub fn bind(&self, binding: InstanceBinding) -> ClassMethodValue {
        ClassMethodValue {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            env: self.env.clone(),
            is_static: self.is_static,
            is_private: self.is_private,
            binding: Some(binding),
        }
    }
}

impl fmt::Debug for ClassMethodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMethodValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("is_static", &self.is_static)
            .field("is_private", &self.is_private)
            .field("bound", &self.binding.is_some())
            .finish_non_exhaustive()
    }
}

/// A field descriptor. `value` is evaluated once, when the class is declared.
#[derive(Debug)]
pub struct ClassVariableValue {
    pub name: String,
    pub value: Value,
    pub is_private: bool,
    pub is_readonly: bool,
}

#[derive(Clone, Debug)]
pub enum ClassMemberValue {
    Method(Rc<ClassMethodValue>),
    Field(Rc<ClassVariableValue>),
}

impl ClassMemberValue {
    pub fn name(&self) -> &str {
        match self {
            ClassMemberValue::Method(m) => &m.name,
            ClassMemberValue::Field(f) => &f.name,
        }
    }
}

#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    pub constructor: Option<Rc<ConstructorValue>>,
    pub public: Vec<ClassMemberValue>,
    pub private: Vec<ClassMemberValue>,
    pub env: Environment,
}

impl ClassValue {
    pub fn has_public(&self, name: &str) -> bool {
        self.public.iter().any(|m| m.name() == name)
    }
}

/// One instance's shared store plus the class that shapes its views.
#[derive(Clone)]
pub struct InstanceBinding {
    store: ObjectRef,
    class: Rc<ClassValue>,
}

impl InstanceBinding {
    /// Start a new instance of `class` with an empty store.
    pub fn new(class: Rc<ClassValue>) -> Self {
        InstanceBinding {
            store: Rc::new(RefCell::new(indexmap::IndexMap::new())),
            class,
        }
    }

    /// Rebuild a view of this instance.
    ///
    /// The full view (`public_only == false`) is the shared store itself,
    /// topped up with any member not yet present. The public view is a
    /// shallow copy of the store with every private name removed, unless a
    /// public member of that name exists.
    pub fn build_self(&self, public_only: bool) -> ObjectRef {
        let view = if public_only {
            Rc::new(RefCell::new(self.store.borrow().clone()))
        } else {
            Rc::clone(&self.store)
        };

        {
            let mut entries = view.borrow_mut();
            for member in &self.class.public {
                if !entries.contains_key(member.name()) {
                    entries.insert(member.name().to_string(), self.member_value(member));
                }
            }
            for member in &self.class.private {
                if public_only {
                    if !self.class.has_public(member.name()) {
                        entries.shift_remove(member.name());
                    }
                } else if !entries.contains_key(member.name()) {
                    entries.insert(member.name().to_string(), self.member_value(member));
                }
            }
        }

        view
    }

    fn member_value(&self, member: &ClassMemberValue) -> Value {
        match member {
            ClassMemberValue::Method(method) if method.is_static => {
                Value::ClassMethod(Rc::clone(method))
            }
            ClassMemberValue::Method(method) => {
                Value::ClassMethod(Rc::new(method.bind(self.clone())))
            }
            ClassMemberValue::Field(field) => field.value.clone(),
        }
    }
}

// The store holds methods bound back to this binding, so a derived Debug
// would never terminate.
impl fmt::Debug for InstanceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceBinding")
            .field("class", &self.class.name)
            .finish_non_exhaustive()
    }
}
