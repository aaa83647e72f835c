use super::combinators;
use super::statement;
use crate::ast::Program;
use crate::errors::{LangError, Wrappable};
use crate::lexer::{Lexer, TokenKind};
use crate::source::{Input, SourceCode};

pub struct Parser {
  lexer: Lexer,
}

impl Parser {
  pub fn new(lexer: Lexer) -> Self {
    Parser { lexer }
  }

  /// Parses the whole token stream into a [Program]. The first syntax
  /// error aborts parsing.
  pub fn parse_program(&mut self) -> Result<Program, LangError> {
    let mut input = Input::new(self.lexer.lex());
    let mut statements = vec![];

    loop {
      input = combinators::skip_newlines(input);

      if input.kind() == TokenKind::Eof {
        break;
      }

      let (statement, rest) = statement::parse_statement(input).map_err(Wrappable::wrap)?;

      statements.push(statement);
      input = rest;
    }

    Ok(Program { statements })
  }
}

/// Parses `source` as a complete program, attributing tokens and
/// diagnostics to `file_name`.
pub fn parse(source: &str, file_name: &str) -> Result<Program, LangError> {
  let code = SourceCode::from_string(source.to_string(), file_name);

  Parser::new(Lexer::new(&code)).parse_program()
}
