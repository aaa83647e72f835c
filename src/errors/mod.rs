pub use interpreter::*;
pub use loader::*;
pub use parser::*;

#[macro_use]
mod helpers;

mod interpreter;
mod loader;
mod parser;

use std::fmt;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::lexer::Token;

/// This trait allows for wrapping a given error in a more generic error.
pub trait Wrappable {
  type Wrapper;

  fn wrap(self) -> Self::Wrapper;
}

#[derive(Clone, Debug, PartialEq)]
pub enum LangError {
  Parser(ParseError),
  Interpreter(InterpreterError),
  Loader(LoaderError),
}

impl fmt::Display for LangError {
  fn fmt(&self, writer: &mut fmt::Formatter) -> fmt::Result {
    let buffer = match self {
      | LangError::Parser(error) => {
        report_to_string("Syntax Error", &error.message(), Some(error.token()))?
      },
      | LangError::Interpreter(error) => {
        report_to_string("Runtime Error", &error.message(), error.token())?
      },
      | LangError::Loader(error) => {
        report_to_string("Import Error", &error.message(), error.token())?
      },
    };

    write!(writer, "{buffer}")
  }
}

/// Renders a labeled report with the offending source line and a caret
/// underline when a token is available, or a bare `severity: message` line
/// when it is not.
fn report_to_string(
  severity: &'static str,
  message: &str,
  token: Option<&Token>,
) -> Result<String, fmt::Error> {
  let Some(token) = token else {
    return Ok(format!("{severity}: {message}"));
  };

  let source = token.source.clone();
  let name = source.file_name();

  let config = Config::default()
    .with_cross_gap(false)
    .with_underlines(true)
    .with_tab_width(4);

  let mut buffer = vec![];

  Report::build(
    ReportKind::Custom(severity, Color::Red),
    name,
    token.span.0 as usize,
  )
  .with_message(message)
  .with_label(Label::new((name, span!(token.span))))
  .with_config(config)
  .finish()
  .write((name, Source::from(source.as_str())), &mut buffer)
  .map_err(|_| fmt::Error)?;

  Ok(String::from_utf8_lossy(&buffer).to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser;

  #[test]
  fn test_token_free_errors_render_as_plain_lines() {
    let error = LangError::Interpreter(InterpreterError::DivisionByZero);

    assert_eq!(error.to_string(), "Runtime Error: division by zero");
  }

  #[test]
  fn test_loader_errors_render_as_import_errors() {
    let error = LangError::Loader(LoaderError::Read {
      path: "missing.gloob".to_string(),
      message: "not found".to_string(),
    });

    assert_eq!(
      error.to_string(),
      "Import Error: failed to read 'missing.gloob': not found"
    );
  }

  #[test]
  fn test_syntax_error_report_includes_message_and_file() {
    let error = parser::parse("var = 1", "broken.gloob").unwrap_err();
    let rendered = error.to_string();

    assert!(rendered.contains("expected an identifier"));
    assert!(rendered.contains("broken.gloob"));
  }
}
