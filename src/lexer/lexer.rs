use super::parser;
use super::{Token, TokenKind};
use crate::source::SourceCode;

/// Token producer: walks the raw bytes, delegates single-token recognition
/// to the nom layer and keeps line/column bookkeeping for diagnostics.
pub struct Lexer {
  code: SourceCode,
  pos: usize,
  line: u32,
  column: u32,
}

impl Lexer {
  pub fn new(code: &SourceCode) -> Self {
    Lexer {
      code: code.clone(),
      pos: 0,
      line: 1,
      column: 1,
    }
  }

  pub fn source(&self) -> SourceCode {
    self.code.clone()
  }

  /// Tokenizes the whole source into a vector terminated by a single `Eof`
  /// token. Never fails: bytes that match no token become `Unknown` tokens
  /// and are reported downstream by the parser.
  pub fn lex(&mut self) -> Vec<Token> {
    let mut tokens = vec![];

    while self.pos < self.code.len() {
      let byte = self.code.as_bytes()[self.pos];

      match byte {
        | b' ' | b'\t' | b'\r' => {
          self.pos += 1;
          self.column += 1;
        },
        | b'\n' => {
          tokens.push(self.capture(
            TokenKind::Newline,
            "\n".to_string(),
            self.line,
            self.column,
            self.column,
            (self.pos as u32, self.pos as u32 + 1),
          ));

          self.pos += 1;
          self.line += 1;
          self.column = 1;
        },
        | _ => tokens.push(self.read_next()),
      }
    }

    tokens.push(self.capture(
      TokenKind::Eof,
      "EOF".to_string(),
      self.line,
      self.column,
      self.column,
      (self.pos as u32, self.pos as u32),
    ));

    tokens
  }

  fn read_next(&mut self) -> Token {
    let start = self.pos;
    let line = self.line;
    let column_start = self.column;
    let remaining = &self.code.as_bytes()[self.pos..];

    match parser::token(remaining) {
      | Ok((rest, (kind, literal))) => {
        let consumed = remaining.len() - rest.len();
        self.advance(consumed);

        self.capture(
          kind,
          literal,
          line,
          column_start,
          self.column - 1,
          (start as u32, (start + consumed) as u32),
        )
      },
      // Skip the offending byte and keep going; the parser reports it.
      | Err(..) => {
        let literal = String::from_utf8_lossy(&remaining[..1]).to_string();
        self.advance(1);

        self.capture(
          TokenKind::Unknown,
          literal,
          line,
          column_start,
          column_start,
          (start as u32, start as u32 + 1),
        )
      },
    }
  }

  fn advance(&mut self, consumed: usize) {
    for offset in 0..consumed {
      if self.code.as_bytes()[self.pos + offset] == b'\n' {
        self.line += 1;
        self.column = 1;
      } else {
        self.column += 1;
      }
    }

    self.pos += consumed;
  }

  #[allow(clippy::too_many_arguments)]
  fn capture(
    &self,
    kind: TokenKind,
    literal: String,
    line: u32,
    column_start: u32,
    column_end: u32,
    span: (u32, u32),
  ) -> Token {
    Token {
      kind,
      literal,
      line,
      column_start,
      column_end,
      span,
      source: self.code.clone(),
    }
  }
}
