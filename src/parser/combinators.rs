use crate::errors::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::source::Input;

pub fn expect(expected: TokenKind, input: Input) -> Result<Input, ParseError> {
  if input.kind() == expected {
    Ok(input.next())
  } else {
    Err(ParseError::Expected {
      expected,
      found: input.read(),
    })
  }
}

pub fn expect_identifier(input: Input) -> Result<(Token, Input), ParseError> {
  if input.kind() == TokenKind::Identifier {
    Ok((input.read(), input.next()))
  } else {
    Err(ParseError::ExpectedIdentifier {
      found: input.read(),
    })
  }
}

/// Skips newline, comment and stray semicolon tokens. Used wherever a
/// statement boundary or a bracketed list tolerates line breaks; operator
/// loops never skip, so a newline ends an expression statement.
pub fn skip_newlines(input: Input) -> Input {
  let mut input = input;

  while matches!(
    input.kind(),
    TokenKind::Newline | TokenKind::Comment | TokenKind::Semicolon
  ) {
    input = input.next();
  }

  input
}

/// True at the tokens that terminate an initializer-less `var x` or a bare
/// `return`.
pub fn at_statement_end(input: &Input) -> bool {
  matches!(
    input.kind(),
    TokenKind::Newline
      | TokenKind::Comment
      | TokenKind::Semicolon
      | TokenKind::CloseCurly
      | TokenKind::Eof
  )
}
