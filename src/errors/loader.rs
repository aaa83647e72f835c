use super::*;
use crate::lexer::Token;

#[derive(Clone, Debug, PartialEq)]
pub enum LoaderError {
  /// The imported file could not be read or resolved on disk.
  Read { path: String, message: String },
  /// A canonical path was reached twice during one resolution pass.
  CircularImport { path: String, token: Option<Token> },
}

impl LoaderError {
  pub fn token(&self) -> Option<&Token> {
    match self {
      | LoaderError::Read { .. } => None,
      | LoaderError::CircularImport { token, .. } => token.as_ref(),
    }
  }

  pub fn message(&self) -> String {
    match self {
      | LoaderError::Read { path, message } => {
        format!("failed to read '{path}': {message}")
      },
      | LoaderError::CircularImport { path, .. } => {
        format!("circular import detected: '{path}'")
      },
    }
  }
}

impl Wrappable for LoaderError {
  type Wrapper = LangError;

  fn wrap(self) -> LangError {
    LangError::Loader(self)
  }
}
