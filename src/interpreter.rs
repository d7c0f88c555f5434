//! Recursive tree-walking evaluator for the **Tarn** core.
//!
//! Single-threaded and depth-first. Storage lives in chained
//! [`Environment`] frames; invocation goes through the [`Callable`] family;
//! variable references that the resolver annotated with a depth are read with
//! exact-depth lookups, everything else falls back to the global frame.
//!
//! `return` is not an error: statement execution yields a [`Flow`] that is
//! either `Normal` or `Return(value)`, and the value rides that channel up to
//! the nearest function-call boundary. Runtime errors ride the `Err` channel
//! and are caught only in [`Interpreter::interpret`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use crate::callable::{Callable, Function, NativeFunction};
use crate::class::{Class, Instance, INITIALIZER_METHOD};
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeResult};
use crate::expr::{Expr, ExprId};
use crate::report::Reporter;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Result of executing a statement: either fall through to the next one, or
/// unwind to the nearest enclosing function-call boundary carrying a value.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    /// Resolution table: per-node binding depth, recorded by the resolver.
    /// References absent from the table are treated as globals.
    locals: HashMap<ExprId, usize>,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// Creates a new Interpreter printing to stdout, with native functions
    /// such as `clock` installed in the globals.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates a new Interpreter with `print` routed to the given sink.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");
        globals.borrow_mut().define(
            "clock",
            Value::Native(Rc::new(NativeFunction {
                name: "clock".to_string(),
                arity: 0,
                func: |_args: &[Value]| {
                    let timestamp: f64 = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map_err(|e| format!("Clock error: {}", e))?
                        .as_secs_f64();
                    Ok(Value::Number(timestamp))
                },
            })),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Record a resolved binding depth for a reference. Called by the
    /// resolver during its pass; read-only afterwards.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Read a binding from the global frame, for drivers and tests.
    pub fn global(&self, name: &str) -> Option<Value> {
        Environment::get_at(&self.globals, 0, name)
    }

    /// Runs a resolved program. A runtime error is reported through the
    /// shared facility and halts the remaining statements; it never
    /// propagates to the host.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut dyn Reporter) {
        debug!("Interpreting {} statements", statements.len());

        for statement in statements {
            if let Err(error) = self.execute(statement) {
                debug!("Runtime error: {}", error);
                reporter.runtime_error(&error);
                return;
            }
        }

        info!("Interpretation completed successfully");
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> RuntimeResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.print_value(&value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}' = {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));
                self.execute_block(statements, environment)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                // Capture the current environment as the closure, and define
                // the name into that same environment so the function can
                // call itself and siblings declared after it.
                debug!("Defining function '{}'", declaration.name.lexeme);
                let function = Function::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment.borrow_mut().define(
                    &declaration.name.lexeme,
                    Value::Function(Rc::new(function)),
                );
                Ok(Flow::Normal)
            }

            Stmt::Return { keyword: _, value } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods),
        }
    }

    /// Executes statements in the given environment, restoring the previous
    /// environment on every exit path, unwind included.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> RuntimeResult<Flow> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = self.run_block(statements);
        self.environment = previous;
        result
    }

    fn run_block(&mut self, statements: &[Stmt]) -> RuntimeResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> RuntimeResult<Flow> {
        debug!("Declaring class '{}'", name.lexeme);

        let superclass = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    return Err(RuntimeError::new(
                        expr.token().clone(),
                        "Superclass must be a class.",
                    ));
                }
            },
            None => None,
        };

        // Pre-define the name so method bodies can refer to the enclosing
        // class; the finished class value is assigned over it below.
        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        // Methods close over a frame that binds 'super' only when there is a
        // superclass to dispatch to.
        let method_closure = match &superclass {
            Some(class) => {
                let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));
                environment
                    .borrow_mut()
                    .define("super", Value::Class(Rc::clone(class)));
                environment
            }
            None => Rc::clone(&self.environment),
        };

        let mut method_table = HashMap::new();
        for method in methods {
            let is_initializer = method.name.lexeme == INITIALIZER_METHOD;
            let function = Function::new(
                Rc::clone(method),
                Rc::clone(&method_closure),
                is_initializer,
            );
            method_table.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(name.lexeme.clone(), superclass, method_table);
        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal { value } => self.evaluate_literal(value),

            Expr::Grouping { expression } => self.evaluate(expression),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                // Short-circuit: if the left value decides, yield it as-is.
                if operator.token_type == TokenType::OR {
                    if is_truthy(&left) {
                        return Ok(left);
                    }
                } else if !is_truthy(&left) {
                    return Ok(left);
                }
                self.evaluate(right)
            }

            Expr::Variable { id, name } => self.look_up_variable(name, *id),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                debug!("Assigning {} to '{}'", value, name.lexeme);
                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?;
                    }
                    None => {
                        self.globals.borrow_mut().assign(name, value.clone())?;
                    }
                }
                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }
                self.call_value(callee, args, paren)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => Instance::get(&instance, name),
                _ => Err(RuntimeError::new(
                    name.clone(),
                    "Only instances have properties.",
                )),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;
                let Value::Instance(instance) = object else {
                    return Err(RuntimeError::new(
                        name.clone(),
                        "Only instances have fields.",
                    ));
                };
                let value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(keyword, *id),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn evaluate_literal(&self, token: &Token) -> RuntimeResult<Value> {
        match &token.token_type {
            TokenType::NUMBER(n) => Ok(Value::Number(*n)),
            TokenType::STRING(s) => Ok(Value::String(s.clone())),
            TokenType::TRUE => Ok(Value::Bool(true)),
            TokenType::FALSE => Ok(Value::Bool(false)),
            TokenType::NIL => Ok(Value::Nil),
            _ => Err(RuntimeError::new(token.clone(), "Invalid literal.")),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> RuntimeResult<Value> {
        let right = self.evaluate(right)?;
        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new(
                    operator.clone(),
                    "Operand must be a number.",
                )),
            },
            TokenType::BANG => Ok(Value::Bool(!is_truthy(&right))),
            _ => Err(RuntimeError::new(operator.clone(), "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> RuntimeResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.token_type {
            // '+' is overloaded: numeric addition, or concatenation when
            // either operand is text (the other is stringified).
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), b) => Ok(Value::String(format!("{}{}", a, b))),
                (a, Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
                _ => Err(RuntimeError::new(
                    operator.clone(),
                    "Operands must be numbers or strings.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Number(a * b))
            }

            TokenType::SLASH => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => Err(RuntimeError::new(
                operator.clone(),
                "Invalid binary operator.",
            )),
        }
    }

    fn number_operands(
        operator: &Token,
        left: &Value,
        right: &Value,
    ) -> RuntimeResult<(f64, f64)> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::new(
                operator.clone(),
                "Operands must be numbers.",
            )),
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> RuntimeResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, &name.lexeme)
                .ok_or_else(|| {
                    RuntimeError::new(
                        name.clone(),
                        format!("Undefined variable '{}'.", name.lexeme),
                    )
                }),
            // Unresolved references are assumed global, checked at first use.
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_super(
        &mut self,
        id: ExprId,
        keyword: &Token,
        method: &Token,
    ) -> RuntimeResult<Value> {
        let Some(&distance) = self.locals.get(&id) else {
            return Err(RuntimeError::new(
                keyword.clone(),
                "Can't use 'super' outside of a class.",
            ));
        };

        // 'super' lives in the statically recorded frame; 'this' sits one
        // frame nearer, bound when the method was attached to its receiver.
        let superclass = match Environment::get_at(&self.environment, distance, "super") {
            Some(Value::Class(class)) => class,
            _ => {
                return Err(RuntimeError::new(
                    keyword.clone(),
                    "Can't use 'super' outside of a class.",
                ));
            }
        };
        let Some(this_distance) = distance.checked_sub(1) else {
            return Err(RuntimeError::new(
                keyword.clone(),
                "Can't use 'super' outside of a class.",
            ));
        };
        let object = match Environment::get_at(&self.environment, this_distance, "this") {
            Some(Value::Instance(instance)) => instance,
            _ => {
                return Err(RuntimeError::new(
                    keyword.clone(),
                    "Can't use 'super' outside of a class.",
                ));
            }
        };

        let function = superclass.find_method(&method.lexeme).ok_or_else(|| {
            RuntimeError::new(
                method.clone(),
                format!("Undefined property '{}'.", method.lexeme),
            )
        })?;

        Ok(Value::Function(Rc::new(function.bind(object))))
    }

    /// Dispatches a call: checks the callee is callable, enforces arity, and
    /// invokes. The callee body is never entered on an arity mismatch.
    fn call_value(
        &mut self,
        callee: Value,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> RuntimeResult<Value> {
        let callable: &dyn Callable = match &callee {
            Value::Function(function) => function.as_ref(),
            Value::Native(native) => native.as_ref(),
            Value::Class(class) => class,
            _ => {
                return Err(RuntimeError::new(
                    paren.clone(),
                    "Can only call functions and classes.",
                ));
            }
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError::new(
                paren.clone(),
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            ));
        }

        callable.call(self, arguments, paren)
    }

    fn print_value(&mut self, value: &Value) {
        if let Err(error) = writeln!(self.output, "{}", value) {
            warn!("print failed: {}", error);
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Truthiness rule: nil and false are falsy; every other value, including
/// zero and the empty string, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}
