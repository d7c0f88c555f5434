//! Runtime error type for the **Tarn** evaluation core.
//!
//! Static (resolution) errors are never thrown: the resolver reports them in
//! batch through the shared [`Reporter`](crate::report::Reporter) facility and
//! keeps going. Only runtime failures travel the error channel, unwinding the
//! recursive evaluator with `?` until the interpreter's top-level entry point
//! catches and reports them.
//!
//! The `return` unwind is deliberately *not* represented here; it is the
//! [`Flow`](crate::interpreter::Flow) result variant, structurally separate
//! from the error path.

use thiserror::Error;

use crate::token::Token;

/// A runtime evaluation failure: the offending token plus a message.
///
/// Examples: an undefined variable or property, a type mismatch on an
/// operator, calling a non-callable value, or an argument-count mismatch.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    /// The token evaluation was looking at when it failed.
    pub token: Token,

    /// Human-readable description.
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }
}

/// Result alias for runtime evaluation.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
