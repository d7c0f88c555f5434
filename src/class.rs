use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::{Callable, Function};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

/// Name of the constructor method a class may declare.
pub const INITIALIZER_METHOD: &str = "init";

/// A class value: its name, an optional superclass, and its method table.
///
/// The superclass chain is a singly linked list of classes; self-inheritance
/// is rejected statically, so the chain is acyclic by construction.
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<Class>>,
        methods: HashMap<String, Function>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Look a method up in this class, then up the superclass chain,
    /// stopping at the first match.
    pub fn find_method(&self, name: &str) -> Option<&Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method);
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }
}

impl Callable for Rc<Class> {
    /// Calling a class enforces the same argument-count contract as calling
    /// a function: the initializer's arity, or zero if there is none.
    fn arity(&self) -> usize {
        self.find_method(INITIALIZER_METHOD)
            .map_or(0, |initializer| initializer.arity())
    }

    /// Construct a new instance; if an `init` method exists anywhere in the
    /// chain, bind it to the instance and run it, discarding its result.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> RuntimeResult<Value> {
        debug!("Constructing a {} instance", self.name);

        let instance = Rc::new(Instance::new(Rc::clone(self)));

        if let Some(initializer) = self.find_method(INITIALIZER_METHOD) {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments, paren)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

/// A mutable instance of a class: a back-reference to the class plus a field
/// table. Fields are created lazily on first assignment, untyped.
pub struct Instance {
    pub class: Rc<Class>,
    fields: RefCell<HashMap<String, Value>>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    /// Property read: fields first (they shadow same-named methods), then the
    /// class/superclass method table with the method bound to this receiver.
    pub fn get(instance: &Rc<Instance>, name: &Token) -> RuntimeResult<Value> {
        if let Some(value) = instance.fields.borrow().get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = instance.class.find_method(&name.lexeme) {
            return Ok(Value::Function(Rc::new(method.bind(Rc::clone(instance)))));
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    /// Property write: unconditionally creates or overwrites the field.
    pub fn set(&self, name: &Token, value: Value) {
        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for Instance {
    // Shallow: fields may reference bound methods that reference us back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
