use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{RuntimeError, RuntimeResult};
use crate::token::Token;
use crate::value::Value;

/// A chained scope frame: a name-to-value map plus an optional reference to
/// the enclosing frame. The global frame has no enclosing frame.
///
/// Frames are shared by reference: any closure, bound method, or active call
/// may hold the same frame alive after the block that created it has finished
/// executing, and a mutation through one holder is visible through all.
#[derive(Debug, Clone)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create the global (outermost) frame.
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    /// Create a frame nested inside `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Insert or overwrite a binding in this frame only. Redeclaration is
    /// allowed and simply replaces the old value.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look a name up in this frame, then outward through the chain.
    pub fn get(&self, name: &Token) -> RuntimeResult<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(RuntimeError::new(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Mutate an existing binding, searching this frame then outward.
    pub fn assign(&mut self, name: &Token, value: Value) -> RuntimeResult<()> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(RuntimeError::new(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Read a binding at an exact depth: walk precisely `distance` enclosing
    /// links, then look only in the landed frame. The name may also exist in
    /// intermediate frames; those are intentionally skipped so that the
    /// resolver's recorded depth is honored rather than nearest-match search.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Option<Value> {
        let frame = Self::ancestor(env, distance)?;
        let value = frame.borrow().values.get(name).cloned();
        value
    }

    /// Mutate a binding at an exact depth, mirroring [`Environment::get_at`].
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> RuntimeResult<()> {
        match Self::ancestor(env, distance) {
            Some(frame) => {
                frame.borrow_mut().values.insert(name.lexeme.clone(), value);
                Ok(())
            }
            None => Err(RuntimeError::new(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            )),
        }
    }

    /// The frame exactly `distance` enclosing links away, if the chain is
    /// that deep.
    fn ancestor(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
    ) -> Option<Rc<RefCell<Environment>>> {
        let mut frame = Rc::clone(env);
        for _ in 0..distance {
            let enclosing = frame.borrow().enclosing.clone()?;
            frame = enclosing;
        }
        Some(frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
