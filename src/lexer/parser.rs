use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, one_of};
use nom::combinator::{map, opt, rest};
use nom::multi::{many0, many1};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

use super::TokenKind;
use crate::utils;

pub type ScanResult<'a, T> = IResult<&'a [u8], T>;

/// A recognized token kind paired with its literal text. String literals
/// drop their quotes here; everything else keeps the matched text.
pub type Scanned = (TokenKind, String);

// Primitives.

fn lower(input: &[u8]) -> ScanResult<'_, char> {
  one_of("abcdefghijklmnopqrstuvwxyz")(input)
}

fn upper(input: &[u8]) -> ScanResult<'_, char> {
  one_of("ABCDEFGHIJKLMNOPQRSTUVWXYZ")(input)
}

fn decimal(input: &[u8]) -> ScanResult<'_, char> {
  one_of("0123456789")(input)
}

fn letter(input: &[u8]) -> ScanResult<'_, char> {
  alt((lower, upper))(input)
}

// Non-terminals.

/// Recognizes a single token. Whitespace and newlines are handled by the
/// lexer driver before this runs.
pub fn token(input: &[u8]) -> ScanResult<'_, Scanned> {
  alt((comment, operator, identifier, number, string, delimiter))(input)
}

fn comment(input: &[u8]) -> ScanResult<'_, Scanned> {
  map(
    preceded(tag("//"), take_while(|byte| byte != b'\n')),
    |text: &[u8]| (TokenKind::Comment, String::from_utf8_lossy(text).to_string()),
  )(input)
}

fn operator(input: &[u8]) -> ScanResult<'_, Scanned> {
  alt((
    map(tag("=="), |_| (TokenKind::EqualEqual, "==".to_string())),
    map(tag("!="), |_| (TokenKind::NotEqual, "!=".to_string())),
    map(tag(">="), |_| (TokenKind::GreaterThanEqual, ">=".to_string())),
    map(tag("<="), |_| (TokenKind::LessThanEqual, "<=".to_string())),
    map(tag("&&"), |_| (TokenKind::And, "&&".to_string())),
    map(tag("||"), |_| (TokenKind::Or, "||".to_string())),
    map(char('='), |_| (TokenKind::Equal, "=".to_string())),
    map(char('>'), |_| (TokenKind::GreaterThan, ">".to_string())),
    map(char('<'), |_| (TokenKind::LessThan, "<".to_string())),
    map(char('!'), |_| (TokenKind::Exclamation, "!".to_string())),
    map(char('&'), |_| (TokenKind::Ampersand, "&".to_string())),
    map(char('|'), |_| (TokenKind::Pipe, "|".to_string())),
    map(one_of("+-*/%"), |op| (TokenKind::Operator, op.to_string())),
  ))(input)
}

fn identifier(input: &[u8]) -> ScanResult<'_, Scanned> {
  map(
    tuple((letter, many0(alt((letter, decimal))))),
    |(head, tail): (char, Vec<char>)| {
      let ident = utils::vec::cons(head, tail).into_iter().collect::<String>();

      let kind = match ident.as_bytes() {
        | b"var" => TokenKind::Var,
        | b"const" => TokenKind::Const,
        | b"fun" | b"function" => TokenKind::Function,
        | b"loop" => TokenKind::Loop,
        | b"if" => TokenKind::If,
        | b"else" => TokenKind::Else,
        | b"return" => TokenKind::Return,
        | b"break" => TokenKind::Break,
        | b"continue" => TokenKind::Continue,
        | b"import" => TokenKind::Import,
        | b"true" => TokenKind::True,
        | b"false" => TokenKind::False,
        | b"yes" => TokenKind::Yes,
        | b"no" => TokenKind::No,
        | b"on" => TokenKind::On,
        | b"off" => TokenKind::Off,
        | b"from" => TokenKind::From,
        | b"to" => TokenKind::To,
        | b"null" => TokenKind::Null,
        | _ => TokenKind::Identifier,
      };

      (kind, ident)
    },
  )(input)
}

fn number(input: &[u8]) -> ScanResult<'_, Scanned> {
  map(
    tuple((many1(decimal), opt(preceded(char('.'), many1(decimal))))),
    |(whole, fraction): (Vec<char>, Option<Vec<char>>)| {
      let mut literal = whole.into_iter().collect::<String>();

      if let Some(digits) = fraction {
        literal.push('.');
        literal.extend(digits);
      }

      (TokenKind::Number, literal)
    },
  )(input)
}

/// Strings are delimited by matching `'` or `"` with no escape processing;
/// newlines are allowed inside. An unterminated string swallows the rest
/// of the input as a single `Unknown` token, which the parser reports.
fn string(input: &[u8]) -> ScanResult<'_, Scanned> {
  alt((
    string_quoted(b'"'),
    string_quoted(b'\''),
    string_unterminated(b'"'),
    string_unterminated(b'\''),
  ))(input)
}

fn string_quoted(quote: u8) -> impl Fn(&[u8]) -> ScanResult<'_, Scanned> {
  move |input| {
    map(
      delimited(
        char(quote as char),
        take_while(move |byte| byte != quote),
        char(quote as char),
      ),
      |content: &[u8]| (TokenKind::String, String::from_utf8_lossy(content).to_string()),
    )(input)
  }
}

fn string_unterminated(quote: u8) -> impl Fn(&[u8]) -> ScanResult<'_, Scanned> {
  move |input| {
    map(preceded(char(quote as char), rest), |content: &[u8]| {
      (TokenKind::Unknown, String::from_utf8_lossy(content).to_string())
    })(input)
  }
}

fn delimiter(input: &[u8]) -> ScanResult<'_, Scanned> {
  map(one_of("(){}[]:;,."), |ch| {
    let kind = match ch {
      | '(' => TokenKind::OpenParen,
      | ')' => TokenKind::CloseParen,
      | '{' => TokenKind::OpenCurly,
      | '}' => TokenKind::CloseCurly,
      | '[' => TokenKind::OpenSquare,
      | ']' => TokenKind::CloseSquare,
      | ':' => TokenKind::Colon,
      | ';' => TokenKind::Semicolon,
      | ',' => TokenKind::Comma,
      | _ => TokenKind::Dot,
    };

    (kind, ch.to_string())
  })(input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_ok;

  #[test]
  fn test_identifier() {
    assert_ok!(token(b"counter0 "), (TokenKind::Identifier, "counter0".to_string()));
  }

  #[test]
  fn test_keywords() {
    assert_ok!(token(b"var "), (TokenKind::Var, "var".to_string()));
    assert_ok!(token(b"const "), (TokenKind::Const, "const".to_string()));
    assert_ok!(token(b"fun "), (TokenKind::Function, "fun".to_string()));
    assert_ok!(token(b"function "), (TokenKind::Function, "function".to_string()));
    assert_ok!(token(b"loop "), (TokenKind::Loop, "loop".to_string()));
    assert_ok!(token(b"from "), (TokenKind::From, "from".to_string()));
    assert_ok!(token(b"to "), (TokenKind::To, "to".to_string()));
    assert_ok!(token(b"yes "), (TokenKind::Yes, "yes".to_string()));
    assert_ok!(token(b"off "), (TokenKind::Off, "off".to_string()));
    assert_ok!(token(b"null "), (TokenKind::Null, "null".to_string()));
  }

  #[test]
  fn test_keyword_prefix_is_identifier() {
    assert_ok!(token(b"variable "), (TokenKind::Identifier, "variable".to_string()));
    assert_ok!(token(b"iffy "), (TokenKind::Identifier, "iffy".to_string()));
  }

  #[test]
  fn test_number() {
    assert_ok!(token(b"0 "), (TokenKind::Number, "0".to_string()));
    assert_ok!(token(b"42 "), (TokenKind::Number, "42".to_string()));
    assert_ok!(token(b"3.14 "), (TokenKind::Number, "3.14".to_string()));
  }

  #[test]
  fn test_string() {
    assert_ok!(token(b"\"Hello World\""), (TokenKind::String, "Hello World".to_string()));
    assert_ok!(token(b"'single'"), (TokenKind::String, "single".to_string()));
    assert_ok!(token(b"\"it's\""), (TokenKind::String, "it's".to_string()));
  }

  #[test]
  fn test_string_unterminated() {
    assert_ok!(token(b"\"oops"), (TokenKind::Unknown, "oops".to_string()));
  }

  #[test]
  fn test_operators() {
    assert_ok!(token(b"== "), (TokenKind::EqualEqual, "==".to_string()));
    assert_ok!(token(b"= "), (TokenKind::Equal, "=".to_string()));
    assert_ok!(token(b"!= "), (TokenKind::NotEqual, "!=".to_string()));
    assert_ok!(token(b">= "), (TokenKind::GreaterThanEqual, ">=".to_string()));
    assert_ok!(token(b"<= "), (TokenKind::LessThanEqual, "<=".to_string()));
    assert_ok!(token(b"&& "), (TokenKind::And, "&&".to_string()));
    assert_ok!(token(b"|| "), (TokenKind::Or, "||".to_string()));
    assert_ok!(token(b"- "), (TokenKind::Operator, "-".to_string()));
    assert_ok!(token(b"% "), (TokenKind::Operator, "%".to_string()));
  }

  #[test]
  fn test_comment() {
    assert_ok!(
      token(b"// trailing note\nrest"),
      (TokenKind::Comment, " trailing note".to_string())
    );
  }

  #[test]
  fn test_comment_vs_division() {
    assert_ok!(token(b"/ 2"), (TokenKind::Operator, "/".to_string()));
  }

  #[test]
  fn test_delimiters() {
    assert_ok!(token(b"("), (TokenKind::OpenParen, "(".to_string()));
    assert_ok!(token(b"]"), (TokenKind::CloseSquare, "]".to_string()));
    assert_ok!(token(b"."), (TokenKind::Dot, ".".to_string()));
    assert_ok!(token(b":"), (TokenKind::Colon, ":".to_string()));
  }
}
