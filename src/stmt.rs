use std::rc::Rc;

use crate::expr::Expr;
use crate::token::Token;

/// A function or method declaration.
///
/// Shared (`Rc`) between the syntax tree and any function values created from
/// it, so a closure never has to clone the body.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),

    Print(Expr),

    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Function(Rc<FunctionDecl>),

    Return {
        keyword: Token,
        value: Option<Expr>,
    },

    Class {
        name: Token,
        /// Always a `Expr::Variable` when present; evaluated at declaration
        /// time and required to yield a class value.
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },
}
