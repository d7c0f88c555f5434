use serde::Serialize;

use crate::token::Token;

/// Identity of a resolvable expression node.
///
/// The resolver records binding depths against node identity, not name: two
/// occurrences of the same variable name are distinct entries. The external
/// parser hands out ids with [`ExprIdGen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExprId(pub u32);

/// Fresh-id counter for the parser building the tree.
#[derive(Debug, Default)]
pub struct ExprIdGen {
    next: u32,
}

impl ExprIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> ExprId {
        let id = ExprId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    /// A literal value carried by its token (number, string, true, false, nil).
    Literal { value: Token },

    /// A parenthesized expression.
    Grouping { expression: Box<Expr> },

    /// `-expr` or `!expr`.
    Unary { operator: Token, right: Box<Expr> },

    /// Arithmetic, comparison, and equality operators.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short-circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// A variable reference.
    Variable { id: ExprId, name: Token },

    /// Assignment to an already-declared variable.
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    /// A call: callee, the closing paren (for error attribution), arguments.
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// Property read: `object.name`.
    Get { object: Box<Expr>, name: Token },

    /// Property write: `object.name = value`.
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// The `this` keyword inside a method body.
    This { id: ExprId, keyword: Token },

    /// `super.method` inside a subclass method body.
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },
}

impl Expr {
    /// A representative token for this expression, used to attribute errors.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Literal { value } => value,

            Expr::Grouping { expression } => expression.token(),

            Expr::Unary { operator, .. } => operator,

            Expr::Binary { operator, .. } => operator,

            Expr::Logical { operator, .. } => operator,

            Expr::Variable { name, .. } => name,

            Expr::Assign { name, .. } => name,

            Expr::Call { paren, .. } => paren,

            Expr::Get { name, .. } => name,

            Expr::Set { name, .. } => name,

            Expr::This { keyword, .. } => keyword,

            Expr::Super { keyword, .. } => keyword,
        }
    }

    pub fn line(&self) -> usize {
        self.token().line
    }
}
