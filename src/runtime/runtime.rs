use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::builtins;
use crate::errors::{LangError, LoaderError, Wrappable};
use crate::loader::ImportResolver;
use crate::parser;
use super::{Interpreter, Scope, Value};

/// Front-end facade over the whole pipeline: lexing, parsing, import
/// resolution and evaluation against a persistent global scope preloaded
/// with the built-ins.
pub struct Runtime {
  pub interpreter: Interpreter,
  pub globals: Rc<Scope>,
}

impl Runtime {
  pub fn new() -> Runtime {
    let globals = Scope::root();
    builtins::install(&globals);

    Runtime {
      interpreter: Interpreter::new(),
      globals,
    }
  }

  /// Parses and evaluates `source` against the persistent global scope.
  /// Used by the REPL; imports resolve relative to the current directory.
  pub fn eval_source(&mut self, source: &str, file_name: &str) -> Result<Value, LangError> {
    let program = parser::parse(source, file_name)?;
    let program = ImportResolver::new().resolve(program, Path::new(file_name))?;

    self.interpreter.eval_program(&program, &self.globals)
  }

  /// Reads, parses, resolves and evaluates a source file.
  pub fn eval_file(&mut self, path: &str) -> Result<Value, LangError> {
    let source = fs::read_to_string(path).map_err(|error| {
      LoaderError::Read {
        path: path.to_string(),
        message: error.to_string(),
      }
      .wrap()
    })?;

    let program = parser::parse(&source, path)?;
    let program = ImportResolver::new().resolve(program, Path::new(path))?;

    self.interpreter.eval_program(&program, &self.globals)
  }
}

impl Default for Runtime {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_state_persists_between_sources() {
    let mut runtime = Runtime::new();

    runtime.eval_source("var x = 1", "repl").unwrap();
    let value = runtime.eval_source("x + 1", "repl").unwrap();

    assert_eq!(value, Value::Numeric(2.0));
  }

  #[test]
  fn test_builtins_are_installed() {
    let mut runtime = Runtime::new();

    assert_eq!(
      runtime.eval_source("type(pi)", "repl").unwrap(),
      Value::String("numeric".to_string())
    );
  }

  #[test]
  fn test_builtins_are_constant() {
    let mut runtime = Runtime::new();

    assert!(runtime.eval_source("pi = 3", "repl").is_err());
  }

  #[test]
  fn test_missing_file() {
    let mut runtime = Runtime::new();

    assert!(runtime.eval_file("does-not-exist.gloob").is_err());
  }
}
