use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::class::Instance;
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionDecl;
use crate::token::Token;
use crate::value::Value;

/// Anything that can sit to the left of a call: user functions, classes
/// (constructors), and native functions. The evaluator checks `arity`
/// against the argument count before ever entering `call`.
pub trait Callable {
    fn arity(&self) -> usize;

    /// Invoke with already-evaluated arguments. `paren` is the call-site
    /// token, used to attribute errors that carry no token of their own.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> RuntimeResult<Value>;
}

/// A user-declared function or method: the declaration node, the environment
/// captured at declaration time (the closure), and whether this is a class
/// initializer.
pub struct Function {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// A copy of this function with `this` fixed to the given instance:
    /// one extra single-entry frame is layered on the original closure.
    /// This is how a method becomes an independent callable with its
    /// receiver attached.
    pub fn bind(&self, instance: Rc<Instance>) -> Function {
        debug!("Binding '{}' to a {} instance", self.name(), instance.class.name);

        let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &self.closure,
        ))));
        environment
            .borrow_mut()
            .define("this", Value::Instance(instance));

        Function::new(
            Rc::clone(&self.declaration),
            environment,
            self.is_initializer,
        )
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        _paren: &Token,
    ) -> RuntimeResult<Value> {
        debug!("Calling function '{}'", self.name());

        let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &self.closure,
        ))));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        let flow = interpreter.execute_block(&self.declaration.body, environment)?;

        // An initializer always yields the instance, whatever the body did.
        if self.is_initializer {
            return Environment::get_at(&self.closure, 0, "this").ok_or_else(|| {
                RuntimeError::new(
                    self.declaration.name.clone(),
                    "Initializer has no 'this' binding.",
                )
            });
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for Function {
    // Shallow on purpose: the closure chain can reference this function.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/// A host-provided function exposed to scripts, such as `clock`.
#[derive(Debug)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: fn(&[Value]) -> Result<Value, String>,
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> RuntimeResult<Value> {
        debug!("Calling native function '{}'", self.name);

        (self.func)(&arguments).map_err(|message| RuntimeError::new(paren.clone(), message))
    }
}
