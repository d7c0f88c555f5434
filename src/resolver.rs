//! Static resolver pass for the **Tarn** core.
//!
//! This resolver does three things in one tree walk:
//! 1. Build lexical scopes (a stack of maps tracking declared/defined state)
//!    to catch a variable read from its own not-yet-complete initializer.
//! 2. Report static errors in batch through the shared reporting facility:
//!    redeclaration in one scope, invalid `return`, misuse of `this`/`super`,
//!    a class inheriting from itself. Reporting never stops the pass.
//! 3. Record, for each variable/`this`/`super` occurrence, how many enclosing
//!    frames the interpreter must traverse to reach its binding — so the
//!    interpreter never falls back to a dynamic lookup that could land on a
//!    later shadowing local. References found in no scope are left
//!    unresolved and assumed global, validated only at first runtime use.

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info};

use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::report::Reporter;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

/// What kind of function body encloses the current node. Used to validate
/// `return` statements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body encloses the current node. Used to validate
/// `this` and `super`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Resolver: tracks scopes, enforces the static rules, and records binding
/// distances by calling back into the interpreter's resolution table.
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    reporter: &'a mut dyn Reporter,
    scopes: Vec<HashMap<String, bool>>, // false=declared, true=defined
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver bound to the given interpreter and reporter.
    pub fn new(interpreter: &'a mut Interpreter, reporter: &'a mut dyn Reporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Walk all top-level statements, reporting every static error found.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        info!(
            "Beginning resolve pass over {} statement(s)",
            statements.len()
        );
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(statements) => {
                self.begin_scope();
                for statement in statements {
                    self.resolve_stmt(statement);
                }
                self.end_scope();
            }

            Stmt::Var { name, initializer } => {
                // declare → resolve initializer → define, so that the
                // initializer cannot read the variable it initializes
                self.declare(name);
                if let Some(expr) = initializer {
                    self.resolve_expr(expr);
                }
                self.define(name);
            }

            Stmt::Function(declaration) => {
                // The name is visible inside its own body.
                self.declare(&declaration.name);
                self.define(&declaration.name);
                self.resolve_function(declaration, FunctionType::Function);
            }

            Stmt::Expression(expr) | Stmt::Print(expr) => {
                self.resolve_expr(expr);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.reporter
                        .error_at(keyword, "Can't return from top-level code.");
                }
                if let Some(expr) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.reporter
                            .error_at(keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expr(expr);
                }
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.resolve_class(name, superclass.as_ref(), methods),
        }
    }

    fn resolve_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(name);
        self.define(name);

        if let Some(Expr::Variable {
            name: superclass_name,
            ..
        }) = superclass
        {
            if superclass_name.lexeme == name.lexeme {
                self.reporter
                    .error_at(superclass_name, "A class can't inherit from itself.");
            }
        }

        if let Some(expr) = superclass {
            self.current_class = ClassType::Subclass;
            self.resolve_expr(expr);

            // Frame binding 'super' wraps the method scopes, mirroring the
            // environment the interpreter builds at declaration time.
            self.begin_scope();
            self.scope_define("super");
        }

        self.begin_scope();
        self.scope_define("this");

        for method in methods {
            let declaration = if method.name.lexeme == crate::class::INITIALIZER_METHOD {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}

            Expr::Grouping { expression } => {
                self.resolve_expr(expression);
            }

            Expr::Unary { right, .. } => {
                self.resolve_expr(right);
            }

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Variable { id, name } => {
                // Cannot read a local in its own initializer.
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.reporter.error_at(
                            name,
                            "Can't read local variable in its own initializer.",
                        );
                    }
                }
                self.resolve_local(*id, name);
            }

            Expr::Assign { id, name, value } => {
                // First resolve the right-hand side, then bind the target.
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Expr::Get { object, .. } => {
                self.resolve_expr(object);
            }

            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }

            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.reporter
                        .error_at(keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local(*id, keyword);
            }

            Expr::Super { id, keyword, .. } => {
                if self.current_class == ClassType::None {
                    self.reporter
                        .error_at(keyword, "Can't use 'super' outside of a class.");
                } else if self.current_class != ClassType::Subclass {
                    self.reporter
                        .error_at(keyword, "Can't use 'super' in a class with no superclass.");
                }
                self.resolve_local(*id, keyword);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────

    /// Enter a fresh scope for a function's parameters and body.
    fn resolve_function(&mut self, function: &FunctionDecl, declaration: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = declaration;

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        for statement in &function.body {
            self.resolve_stmt(statement);
        }
        self.end_scope();

        self.current_function = enclosing;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Mark a name as declared but not yet usable in the innermost scope.
    /// At the top level there is no scope and globals may redeclare freely.
    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                self.reporter
                    .error_at(name, "Already a variable with this name in this scope.");
            }
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Insert a synthetic binding ('this' / 'super') into the innermost scope.
    fn scope_define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Binding-distance helper
    // ─────────────────────────────────────────────────────────────────────

    /// Record this occurrence as a local at the depth of the innermost scope
    /// containing the name, or leave it unresolved (assumed global).
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                debug!("Resolved '{}' at depth {}", name.lexeme, depth);
                self.interpreter.resolve(id, depth);
                return;
            }
        }

        debug!("Resolved '{}' as global", name.lexeme);
    }
}
