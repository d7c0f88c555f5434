//! Shared error-reporting facility.
//!
//! The core never prints diagnostics on its own and never decides process
//! exit codes: the resolver and interpreter hand every error to a
//! host-supplied [`Reporter`], and the driver inspects the reporter's flags
//! to map "static error occurred" / "runtime error occurred" onto whatever
//! policy it wants.

use crate::error::RuntimeError;
use crate::token::{Token, TokenType};

/// Receives static and runtime diagnostics from the core.
pub trait Reporter {
    /// Report a static error at a source line. `location` is either empty or
    /// a ` at '...'` fragment naming the offending lexeme.
    fn report(&mut self, line: usize, location: &str, message: &str);

    /// Report a runtime error caught at the evaluator's top level.
    fn runtime_error(&mut self, error: &RuntimeError);

    /// Report a static error attributed to a token.
    fn error_at(&mut self, token: &Token, message: &str) {
        if token.token_type == TokenType::EOF {
            self.report(token.line, " at end", message);
        } else {
            let location = format!(" at '{}'", token.lexeme);
            self.report(token.line, &location, message);
        }
    }
}

/// Default reporter: prints to stderr and tracks what kinds of errors were
/// seen, for the driver's exit-code mapping.
#[derive(Debug, Default)]
pub struct StderrReporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any static error was reported.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// True if any runtime error was reported.
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clear the flags. An interactive host calls this between input units so
    /// one bad line does not poison the session.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {}] Error{}: {}", line, location, message);
        self.had_error = true;
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{}", error);
        self.had_runtime_error = true;
    }
}
