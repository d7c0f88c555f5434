//! Shared helpers for the integration tests: hand-built syntax trees (the
//! parser is an external collaborator), a collecting reporter, and an
//! in-memory print sink.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tarn::error::RuntimeError;
use tarn::expr::{Expr, ExprIdGen};
use tarn::interpreter::Interpreter;
use tarn::report::Reporter;
use tarn::resolver::Resolver;
use tarn::stmt::{FunctionDecl, Stmt};
use tarn::token::{Token, TokenType};
use tarn::value::Value;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─────────────────────────────────────────────────────────────────────────
// Token and expression builders
// ─────────────────────────────────────────────────────────────────────────

pub fn ident(name: &str) -> Token {
    Token::new(TokenType::IDENTIFIER, name, 1)
}

fn operator(lexeme: &str) -> Token {
    let token_type = match lexeme {
        "+" => TokenType::PLUS,
        "-" => TokenType::MINUS,
        "*" => TokenType::STAR,
        "/" => TokenType::SLASH,
        ">" => TokenType::GREATER,
        ">=" => TokenType::GREATER_EQUAL,
        "<" => TokenType::LESS,
        "<=" => TokenType::LESS_EQUAL,
        "==" => TokenType::EQUAL_EQUAL,
        "!=" => TokenType::BANG_EQUAL,
        "!" => TokenType::BANG,
        "and" => TokenType::AND,
        "or" => TokenType::OR,
        _ => panic!("unknown operator lexeme '{}'", lexeme),
    };
    Token::new(token_type, lexeme, 1)
}

/// Expression factory handing out fresh node ids, the way the external
/// parser would.
#[derive(Default)]
pub struct Ast {
    ids: RefCell<ExprIdGen>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&self) -> tarn::expr::ExprId {
        self.ids.borrow_mut().fresh()
    }

    pub fn number(&self, n: f64) -> Expr {
        Expr::Literal {
            value: Token::new(TokenType::NUMBER(n), n.to_string(), 1),
        }
    }

    pub fn string(&self, s: &str) -> Expr {
        Expr::Literal {
            value: Token::new(TokenType::STRING(s.to_string()), format!("\"{}\"", s), 1),
        }
    }

    pub fn boolean(&self, b: bool) -> Expr {
        let token = if b {
            Token::new(TokenType::TRUE, "true", 1)
        } else {
            Token::new(TokenType::FALSE, "false", 1)
        };
        Expr::Literal { value: token }
    }

    pub fn nil(&self) -> Expr {
        Expr::Literal {
            value: Token::new(TokenType::NIL, "nil", 1),
        }
    }

    pub fn grouping(&self, expression: Expr) -> Expr {
        Expr::Grouping {
            expression: Box::new(expression),
        }
    }

    pub fn unary(&self, op: &str, right: Expr) -> Expr {
        Expr::Unary {
            operator: operator(op),
            right: Box::new(right),
        }
    }

    pub fn binary(&self, left: Expr, op: &str, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            operator: operator(op),
            right: Box::new(right),
        }
    }

    pub fn logical(&self, left: Expr, op: &str, right: Expr) -> Expr {
        Expr::Logical {
            left: Box::new(left),
            operator: operator(op),
            right: Box::new(right),
        }
    }

    pub fn variable(&self, name: &str) -> Expr {
        Expr::Variable {
            id: self.fresh(),
            name: ident(name),
        }
    }

    pub fn assign(&self, name: &str, value: Expr) -> Expr {
        Expr::Assign {
            id: self.fresh(),
            name: ident(name),
            value: Box::new(value),
        }
    }

    pub fn call(&self, callee: Expr, arguments: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            paren: Token::new(TokenType::RIGHT_PAREN, ")", 1),
            arguments,
        }
    }

    pub fn get(&self, object: Expr, name: &str) -> Expr {
        Expr::Get {
            object: Box::new(object),
            name: ident(name),
        }
    }

    pub fn set(&self, object: Expr, name: &str, value: Expr) -> Expr {
        Expr::Set {
            object: Box::new(object),
            name: ident(name),
            value: Box::new(value),
        }
    }

    pub fn this(&self) -> Expr {
        Expr::This {
            id: self.fresh(),
            keyword: Token::new(TokenType::THIS, "this", 1),
        }
    }

    pub fn super_(&self, method: &str) -> Expr {
        Expr::Super {
            id: self.fresh(),
            keyword: Token::new(TokenType::SUPER, "super", 1),
            method: ident(method),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Statement builders
// ─────────────────────────────────────────────────────────────────────────

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expression(expr)
}

pub fn print_stmt(expr: Expr) -> Stmt {
    Stmt::Print(expr)
}

pub fn var_stmt(name: &str, initializer: Option<Expr>) -> Stmt {
    Stmt::Var {
        name: ident(name),
        initializer,
    }
}

pub fn block(statements: Vec<Stmt>) -> Stmt {
    Stmt::Block(statements)
}

pub fn if_stmt(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    }
}

pub fn while_stmt(condition: Expr, body: Stmt) -> Stmt {
    Stmt::While {
        condition,
        body: Box::new(body),
    }
}

pub fn fun_decl(name: &str, params: &[&str], body: Vec<Stmt>) -> Rc<FunctionDecl> {
    Rc::new(FunctionDecl {
        name: ident(name),
        params: params.iter().map(|p| ident(p)).collect(),
        body,
    })
}

pub fn fun_stmt(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::Function(fun_decl(name, params, body))
}

pub fn return_stmt(value: Option<Expr>) -> Stmt {
    Stmt::Return {
        keyword: Token::new(TokenType::RETURN, "return", 1),
        value,
    }
}

pub fn class_stmt(name: &str, superclass: Option<Expr>, methods: Vec<Rc<FunctionDecl>>) -> Stmt {
    Stmt::Class {
        name: ident(name),
        superclass,
        methods,
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Reporter and output capture
// ─────────────────────────────────────────────────────────────────────────

/// Collects diagnostics instead of printing them.
#[derive(Debug, Default)]
pub struct CollectReporter {
    pub static_errors: Vec<String>,
    pub runtime_errors: Vec<String>,
}

impl CollectReporter {
    pub fn had_error(&self) -> bool {
        !self.static_errors.is_empty()
    }

    pub fn had_runtime_error(&self) -> bool {
        !self.runtime_errors.is_empty()
    }
}

impl Reporter for CollectReporter {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.static_errors
            .push(format!("[line {}] Error{}: {}", line, location, message));
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.runtime_errors.push(error.to_string());
    }
}

/// A cloneable in-memory sink for `print` output.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Run harness
// ─────────────────────────────────────────────────────────────────────────

pub struct Run {
    pub interpreter: Interpreter,
    pub reporter: CollectReporter,
    pub output: SharedBuf,
}

/// Resolve then interpret, the way a driver would: execution is suppressed
/// when the resolve pass reported any static error.
pub fn run(program: &[Stmt]) -> Run {
    init_logs();

    let output = SharedBuf::default();
    let mut interpreter = Interpreter::with_output(Box::new(output.clone()));
    let mut reporter = CollectReporter::default();

    Resolver::new(&mut interpreter, &mut reporter).resolve(program);
    if !reporter.had_error() {
        interpreter.interpret(program, &mut reporter);
    }

    Run {
        interpreter,
        reporter,
        output,
    }
}

pub fn global(run: &Run, name: &str) -> Value {
    run.interpreter
        .global(name)
        .unwrap_or_else(|| panic!("global '{}' not defined", name))
}

pub fn global_number(run: &Run, name: &str) -> f64 {
    match global(run, name) {
        Value::Number(n) => n,
        other => panic!("global '{}' is not a number: {}", name, other),
    }
}

pub fn global_string(run: &Run, name: &str) -> String {
    match global(run, name) {
        Value::String(s) => s,
        other => panic!("global '{}' is not a string: {}", name, other),
    }
}

pub fn global_bool(run: &Run, name: &str) -> bool {
    match global(run, name) {
        Value::Bool(b) => b,
        other => panic!("global '{}' is not a boolean: {}", name, other),
    }
}

/// Asserts that exactly the expected program output was printed.
pub fn assert_printed(run: &Run, expected: &str) {
    assert_eq!(run.output.contents(), expected);
}

pub fn assert_runtime_error(run: &Run, fragment: &str) {
    assert!(
        run.reporter
            .runtime_errors
            .iter()
            .any(|e| e.contains(fragment)),
        "expected a runtime error containing '{}', got: {:?}",
        fragment,
        run.reporter.runtime_errors
    );
}

pub fn assert_static_error(run: &Run, fragment: &str) {
    assert!(
        run.reporter
            .static_errors
            .iter()
            .any(|e| e.contains(fragment)),
        "expected a static error containing '{}', got: {:?}",
        fragment,
        run.reporter.static_errors
    );
}
