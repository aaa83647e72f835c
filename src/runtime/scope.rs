use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::errors::InterpreterError;
use super::Value;

/// Lexically nested name table. Children point at their parents, forming
/// the resolution chain; constness is recorded in the declaring scope.
///
/// Scopes are created for the global root, and for every function call
/// (parented to the function's captured scope, not the caller's). Loop and
/// `if` bodies share the enclosing scope.
#[derive(Debug)]
pub struct Scope {
  parent: Option<Rc<Scope>>,
  variables: RefCell<HashMap<String, Value>>,
  constants: RefCell<HashSet<String>>,
}

impl Scope {
  pub fn root() -> Rc<Scope> {
    Rc::new(Scope {
      parent: None,
      variables: RefCell::new(HashMap::new()),
      constants: RefCell::new(HashSet::new()),
    })
  }

  pub fn child(parent: &Rc<Scope>) -> Rc<Scope> {
    Rc::new(Scope {
      parent: Some(Rc::clone(parent)),
      variables: RefCell::new(HashMap::new()),
      constants: RefCell::new(HashSet::new()),
    })
  }

  /// Declares a fresh name in THIS scope; redeclaring any existing name
  /// here is an error regardless of constness.
  pub fn declare(&self, name: &str, value: Value, constant: bool) -> Result<(), InterpreterError> {
    if self.variables.borrow().contains_key(name) {
      return Err(InterpreterError::VariableAlreadyDeclared {
        name: name.to_string(),
        token: None,
      });
    }

    if constant {
      self.constants.borrow_mut().insert(name.to_string());
    }

    self.variables.borrow_mut().insert(name.to_string(), value);

    Ok(())
  }

  /// Walks the parent chain to the defining scope and reassigns there.
  /// Fails when the name is missing or constant where it was declared.
  pub fn assign(&self, name: &str, value: Value) -> Result<Value, InterpreterError> {
    if self.variables.borrow().contains_key(name) {
      if self.constants.borrow().contains(name) {
        return Err(InterpreterError::AssignmentToConstant {
          name: name.to_string(),
          token: None,
        });
      }

      self
        .variables
        .borrow_mut()
        .insert(name.to_string(), value.clone());

      return Ok(value);
    }

    match &self.parent {
      | Some(parent) => parent.assign(name, value),
      | None => {
        Err(InterpreterError::VariableNotFound {
          name: name.to_string(),
          token: None,
        })
      },
    }
  }

  /// Resolves a name through the chain and returns its value.
  pub fn get(&self, name: &str) -> Result<Value, InterpreterError> {
    if let Some(value) = self.variables.borrow().get(name) {
      return Ok(value.clone());
    }

    match &self.parent {
      | Some(parent) => parent.get(name),
      | None => {
        Err(InterpreterError::VariableNotFound {
          name: name.to_string(),
          token: None,
        })
      },
    }
  }

  /// Installs or updates a loop variable directly in this scope,
  /// bypassing the redeclaration check.
  pub fn set_local(&self, name: &str, value: Value) {
    self.variables.borrow_mut().insert(name.to_string(), value);
  }

  /// Seeds a built-in into the scope as a constant. Only used while
  /// populating a fresh global scope.
  pub fn install_constant(&self, name: &str, value: Value) {
    self.constants.borrow_mut().insert(name.to_string());
    self.variables.borrow_mut().insert(name.to_string(), value);
  }
}
