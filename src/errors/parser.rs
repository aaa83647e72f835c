use super::*;
use crate::lexer::{Token, TokenKind};

#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
  Expected { expected: TokenKind, found: Token },
  ExpectedIdentifier { found: Token },
  ExpectedFunctionName { found: Token },
  ExpectedParameter { found: Token },
  ExpectedImportPath { found: Token },
  ConstWithoutValue { found: Token },
  UnexpectedToken { found: Token },
}

impl ParseError {
  /// The offending token, used for the location hint and caret underline.
  pub fn token(&self) -> &Token {
    match self {
      | ParseError::Expected { found, .. }
      | ParseError::ExpectedIdentifier { found }
      | ParseError::ExpectedFunctionName { found }
      | ParseError::ExpectedParameter { found }
      | ParseError::ExpectedImportPath { found }
      | ParseError::ConstWithoutValue { found }
      | ParseError::UnexpectedToken { found } => found,
    }
  }

  pub fn message(&self) -> String {
    match self {
      | ParseError::Expected { expected, found } => {
        format!("expected {expected}, but instead found '{found}'")
      },
      | ParseError::ExpectedIdentifier { found } => {
        format!("expected an identifier, but found '{found}'")
      },
      | ParseError::ExpectedFunctionName { found } => {
        format!("expected a function name, but found '{found}'")
      },
      | ParseError::ExpectedParameter { found } => {
        format!("function parameters must be plain identifiers, but found '{found}'")
      },
      | ParseError::ExpectedImportPath { found } => {
        format!("expected a string path after 'import', but found '{found}'")
      },
      | ParseError::ConstWithoutValue { .. } => {
        "a constant declaration must have a value".to_string()
      },
      | ParseError::UnexpectedToken { found } => format!("unexpected token '{found}'"),
    }
  }
}

impl Wrappable for ParseError {
  type Wrapper = LangError;

  fn wrap(self) -> LangError {
    LangError::Parser(self)
  }
}
