use super::*;
use crate::lexer::Token;

#[derive(Clone, Debug, PartialEq)]
pub enum InterpreterError {
  VariableNotFound { name: String, token: Option<Token> },
  VariableAlreadyDeclared { name: String, token: Option<Token> },
  /// Reserved: a declared slot always holds `null`, so this cannot fire.
  VariableNotInitialized { name: String, token: Option<Token> },
  AssignmentToConstant { name: String, token: Option<Token> },
  InvalidAssignmentTarget,
  InvalidOperands { operator: String, left: &'static str, right: &'static str },
  UnknownOperator { operator: String },
  DivisionByZero,
  PropertyNotFound { property: String, token: Option<Token> },
  NotAnObject { property: String, type_name: &'static str, token: Option<Token> },
  CannotAssignProperty { property: String, type_name: &'static str, token: Option<Token> },
  NotIndexable { type_name: &'static str },
  IndexNotNumeric,
  ArrayIndexOutOfBounds { index: i64, length: usize },
  StringIndexOutOfBounds { index: i64, length: usize },
  NotCallable { type_name: &'static str },
  ArityMismatch { name: String, expected: usize, got: usize },
  UnknownMethod { receiver: &'static str, method: String, token: Option<Token> },
  RangeBoundsNotNumeric,
  RangeIncrementNotNumeric,
  ForEachNotArray { type_name: &'static str },
  Builtin { name: &'static str, message: String },
}

impl InterpreterError {
  /// The token nearest to the offending node, when one was recorded.
  pub fn token(&self) -> Option<&Token> {
    match self {
      | InterpreterError::VariableNotFound { token, .. }
      | InterpreterError::VariableAlreadyDeclared { token, .. }
      | InterpreterError::VariableNotInitialized { token, .. }
      | InterpreterError::AssignmentToConstant { token, .. }
      | InterpreterError::PropertyNotFound { token, .. }
      | InterpreterError::NotAnObject { token, .. }
      | InterpreterError::CannotAssignProperty { token, .. }
      | InterpreterError::UnknownMethod { token, .. } => token.as_ref(),
      | _ => None,
    }
  }

  /// Attaches a location token if the error does not carry one yet. Scope
  /// operations raise location-free errors; the evaluator knows the node.
  pub fn with_token(self, location: Token) -> Self {
    match self {
      | InterpreterError::VariableNotFound { name, token: None } => {
        InterpreterError::VariableNotFound { name, token: Some(location) }
      },
      | InterpreterError::VariableAlreadyDeclared { name, token: None } => {
        InterpreterError::VariableAlreadyDeclared { name, token: Some(location) }
      },
      | InterpreterError::VariableNotInitialized { name, token: None } => {
        InterpreterError::VariableNotInitialized { name, token: Some(location) }
      },
      | InterpreterError::AssignmentToConstant { name, token: None } => {
        InterpreterError::AssignmentToConstant { name, token: Some(location) }
      },
      | error => error,
    }
  }

  pub fn message(&self) -> String {
    match self {
      | InterpreterError::VariableNotFound { name, .. } => {
        format!("variable '{name}' not found")
      },
      | InterpreterError::VariableAlreadyDeclared { name, .. } => {
        format!("variable '{name}' is already declared in this scope")
      },
      | InterpreterError::VariableNotInitialized { name, .. } => {
        format!("variable '{name}' is not initialized")
      },
      | InterpreterError::AssignmentToConstant { name, .. } => {
        format!("constant '{name}' cannot be reassigned")
      },
      | InterpreterError::InvalidAssignmentTarget => {
        "only variables, properties and array elements can be assigned to".to_string()
      },
      | InterpreterError::InvalidOperands { operator, left, right } => {
        format!("invalid operand types for '{operator}': {left} and {right}")
      },
      | InterpreterError::UnknownOperator { operator } => {
        format!("unknown operator '{operator}'")
      },
      | InterpreterError::DivisionByZero => "division by zero".to_string(),
      | InterpreterError::PropertyNotFound { property, .. } => {
        format!("property '{property}' not found on object")
      },
      | InterpreterError::NotAnObject { property, type_name, .. } => {
        format!("cannot access property '{property}' on {type_name}")
      },
      | InterpreterError::CannotAssignProperty { property, type_name, .. } => {
        format!("cannot assign property '{property}' on {type_name}")
      },
      | InterpreterError::NotIndexable { type_name } => {
        format!("cannot index into {type_name}")
      },
      | InterpreterError::IndexNotNumeric => "index must be numeric".to_string(),
      | InterpreterError::ArrayIndexOutOfBounds { index, length } => {
        format!("array index out of bounds: {index} (array length: {length})")
      },
      | InterpreterError::StringIndexOutOfBounds { index, length } => {
        format!("string index out of bounds: {index} (string length: {length})")
      },
      | InterpreterError::NotCallable { type_name } => {
        format!("cannot call a value of type {type_name}")
      },
      | InterpreterError::ArityMismatch { name, expected, got } => {
        format!("function '{name}' expects {expected} arguments, got {got}")
      },
      | InterpreterError::UnknownMethod { receiver, method, .. } => {
        format!("unknown {receiver} method '{method}'")
      },
      | InterpreterError::RangeBoundsNotNumeric => {
        "range loop requires numeric 'from' and 'to' values".to_string()
      },
      | InterpreterError::RangeIncrementNotNumeric => {
        "range loop increment must be numeric".to_string()
      },
      | InterpreterError::ForEachNotArray { type_name } => {
        format!("foreach loop requires an array, got {type_name}")
      },
      | InterpreterError::Builtin { name, message } => format!("{name}(): {message}"),
    }
  }
}

impl Wrappable for InterpreterError {
  type Wrapper = LangError;

  fn wrap(self) -> LangError {
    LangError::Interpreter(self)
  }
}
