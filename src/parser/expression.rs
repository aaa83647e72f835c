use super::combinators;
use crate::ast;
use crate::ast::{Expression, Literal, Property};
use crate::errors::ParseError;
use crate::lexer::TokenKind;
use crate::source::Input;

pub fn parse_expression(input: Input) -> Result<(Expression, Input), ParseError> {
  parse_assignment(input)
}

/// Assignment binds loosest and is right-associative. Whether the target
/// is actually assignable is enforced by the evaluator.
fn parse_assignment(input: Input) -> Result<(Expression, Input), ParseError> {
  let (target, input) = parse_logical(input)?;

  if input.kind() == TokenKind::Equal {
    let (value, input) = parse_expression(input.next())?;

    return Ok((
      Expression::Assignment {
        target: Box::new(target),
        value: Box::new(value),
      },
      input,
    ));
  }

  Ok((target, input))
}

fn parse_logical(input: Input) -> Result<(Expression, Input), ParseError> {
  let (mut left, mut input) = parse_comparison(input)?;

  while matches!(input.kind(), TokenKind::And | TokenKind::Or) {
    let operator = input.read().literal;
    let (right, rest) = parse_comparison(input.next())?;

    left = ast::binary(left, operator, right);
    input = rest;
  }

  Ok((left, input))
}

fn parse_comparison(input: Input) -> Result<(Expression, Input), ParseError> {
  let (mut left, mut input) = parse_additive(input)?;

  while matches!(
    input.kind(),
    TokenKind::EqualEqual
      | TokenKind::NotEqual
      | TokenKind::GreaterThan
      | TokenKind::GreaterThanEqual
      | TokenKind::LessThan
      | TokenKind::LessThanEqual
  ) {
    let operator = input.read().literal;
    let (right, rest) = parse_additive(input.next())?;

    left = ast::binary(left, operator, right);
    input = rest;
  }

  Ok((left, input))
}

fn parse_additive(input: Input) -> Result<(Expression, Input), ParseError> {
  let (mut left, mut input) = parse_multiplicative(input)?;

  while at_operator(&input, &["+", "-"]) {
    let operator = input.read().literal;
    let (right, rest) = parse_multiplicative(input.next())?;

    left = ast::binary(left, operator, right);
    input = rest;
  }

  Ok((left, input))
}

fn parse_multiplicative(input: Input) -> Result<(Expression, Input), ParseError> {
  let (mut left, mut input) = parse_primary(input)?;

  while at_operator(&input, &["*", "/", "%"]) {
    let operator = input.read().literal;
    let (right, rest) = parse_primary(input.next())?;

    left = ast::binary(left, operator, right);
    input = rest;
  }

  Ok((left, input))
}

fn at_operator(input: &Input, operators: &[&str]) -> bool {
  input.kind() == TokenKind::Operator && operators.contains(&input.read().literal.as_str())
}

pub fn parse_primary(input: Input) -> Result<(Expression, Input), ParseError> {
  // Prefix minus desugars to a subtraction from zero, which keeps the node
  // set closed and errors out on non-numeric operands.
  if at_operator(&input, &["-"]) {
    let (operand, input) = parse_primary(input.next())?;
    return Ok((
      ast::binary(Expression::Literal(Literal::Numeric(0.0)), "-", operand),
      input,
    ));
  }

  let (expression, input) = match input.kind() {
    | TokenKind::Identifier => {
      let token = input.read();

      (
        Expression::Identifier {
          name: token.literal.clone(),
          token,
        },
        input.next(),
      )
    },
    | TokenKind::Number => {
      let token = input.read();
      let value = token
        .literal
        .parse::<f64>()
        .map_err(|_| ParseError::UnexpectedToken { found: token })?;

      (Expression::Literal(Literal::Numeric(value)), input.next())
    },
    | TokenKind::String => {
      (
        Expression::Literal(Literal::String(input.read().literal)),
        input.next(),
      )
    },
    | TokenKind::True | TokenKind::Yes | TokenKind::On => {
      (Expression::Literal(Literal::Boolean(true)), input.next())
    },
    | TokenKind::False | TokenKind::No | TokenKind::Off => {
      (Expression::Literal(Literal::Boolean(false)), input.next())
    },
    | TokenKind::Null => (Expression::Literal(Literal::Null), input.next()),
    | TokenKind::Break => (Expression::Break, input.next()),
    | TokenKind::OpenParen => {
      let (expression, input) = parse_expression(combinators::skip_newlines(input.next()))?;
      let input = combinators::expect(TokenKind::CloseParen, combinators::skip_newlines(input))?;

      (expression, input)
    },
    | TokenKind::OpenCurly => parse_object(input)?,
    | TokenKind::OpenSquare => parse_array(input)?,
    | _ => {
      return Err(ParseError::UnexpectedToken {
        found: input.read(),
      });
    },
  };

  parse_postfix(expression, input)
}

/// Member access, indexing and calls chain after any primary, in any
/// combination: `"hi".upper()`, `points[1].x`, `make()()`.
fn parse_postfix(
  expression: Expression,
  input: Input,
) -> Result<(Expression, Input), ParseError> {
  let mut expression = expression;
  let mut input = input;

  loop {
    match input.kind() {
      | TokenKind::Dot => {
        let (token, rest) = combinators::expect_identifier(input.next())?;

        expression = Expression::Member {
          object: Box::new(expression),
          property: token.literal.clone(),
          token,
        };
        input = rest;
      },
      | TokenKind::OpenSquare => {
        let (index, rest) = parse_expression(combinators::skip_newlines(input.next()))?;
        let rest = combinators::expect(TokenKind::CloseSquare, combinators::skip_newlines(rest))?;

        expression = Expression::Index {
          array: Box::new(expression),
          index: Box::new(index),
        };
        input = rest;
      },
      | TokenKind::OpenParen => {
        let (arguments, rest) = parse_arguments(input)?;

        expression = Expression::Call {
          callee: Box::new(expression),
          arguments,
        };
        input = rest;
      },
      | _ => return Ok((expression, input)),
    }
  }
}

/// Parses a parenthesized argument list. Commas and newlines separate the
/// arguments; trailing commas are tolerated.
pub fn parse_arguments(input: Input) -> Result<(Vec<Expression>, Input), ParseError> {
  let mut input = combinators::expect(TokenKind::OpenParen, input)?;
  let mut arguments = vec![];

  loop {
    input = combinators::skip_newlines(input);

    match input.kind() {
      | TokenKind::CloseParen => break,
      | TokenKind::Comma => input = input.next(),
      | _ => {
        let (argument, rest) = parse_expression(input)?;

        arguments.push(argument);
        input = rest;
      },
    }
  }

  Ok((arguments, input.next()))
}

fn parse_object(input: Input) -> Result<(Expression, Input), ParseError> {
  let mut input = combinators::expect(TokenKind::OpenCurly, input)?;
  let mut properties = vec![];

  loop {
    input = combinators::skip_newlines(input);

    if input.kind() == TokenKind::CloseCurly {
      break;
    }

    let (key, rest) = combinators::expect_identifier(input)?;
    let rest = combinators::expect(TokenKind::Colon, rest)?;
    let (value, rest) = parse_expression(combinators::skip_newlines(rest))?;

    properties.push(Property {
      key: key.literal,
      value,
    });

    input = combinators::skip_newlines(rest);

    if input.kind() == TokenKind::Comma {
      input = input.next();
    }
  }

  Ok((Expression::Object { properties }, input.next()))
}

fn parse_array(input: Input) -> Result<(Expression, Input), ParseError> {
  let mut input = combinators::expect(TokenKind::OpenSquare, input)?;
  let mut elements = vec![];

  loop {
    input = combinators::skip_newlines(input);

    match input.kind() {
      | TokenKind::CloseSquare => break,
      | TokenKind::Comma => input = input.next(),
      | _ => {
        let (element, rest) = parse_expression(input)?;

        elements.push(element);
        input = rest;
      },
    }
  }

  Ok((Expression::Array { elements }, input.next()))
}

#[cfg(test)]
mod tests {
  use super::super::testing;
  use super::*;
  use crate::ast;

  #[test]
  fn test_expressions() {
    testing::is_ok(&parse_expression, "42");
    testing::is_ok(&parse_expression, "3.14");
    testing::is_ok(&parse_expression, "'single quoted'");
    testing::is_ok(&parse_expression, r#""double quoted""#);
    testing::is_ok(&parse_expression, "yes");
    testing::is_ok(&parse_expression, "off");
    testing::is_ok(&parse_expression, "null");
    testing::is_ok(&parse_expression, "name");
    testing::is_ok(&parse_expression, "(1 + 2) * 3");
    testing::is_ok(&parse_expression, "[]");
    testing::is_ok(&parse_expression, "[1, 2, 3]");
    testing::is_ok(&parse_expression, "{ name: 'Mo', age: 3 }");
    testing::is_ok(&parse_expression, "a = b = c");
    testing::is_ok(&parse_expression, "points[1].x");
    testing::is_ok(&parse_expression, "'hi'.upper()");
    testing::is_ok(&parse_expression, "a && b || c");
    testing::is_ok(&parse_expression, "-x + 1");
  }

  #[test]
  fn test_literal() {
    testing::assert_eq(
      &parse_expression,
      "42",
      Expression::Literal(Literal::Numeric(42.0)),
    );
  }

  #[test]
  fn test_precedence() {
    testing::assert_eq(
      &parse_expression,
      "1 + 2 * 3",
      ast::binary(
        Expression::Literal(Literal::Numeric(1.0)),
        "+",
        ast::binary(
          Expression::Literal(Literal::Numeric(2.0)),
          "*",
          Expression::Literal(Literal::Numeric(3.0)),
        ),
      ),
    );
  }

  #[test]
  fn test_left_associativity() {
    testing::assert_eq(
      &parse_expression,
      "10 - 2 - 3",
      ast::binary(
        ast::binary(
          Expression::Literal(Literal::Numeric(10.0)),
          "-",
          Expression::Literal(Literal::Numeric(2.0)),
        ),
        "-",
        Expression::Literal(Literal::Numeric(3.0)),
      ),
    );
  }

  #[test]
  fn test_comparison_binds_looser_than_additive() {
    testing::assert_eq(
      &parse_expression,
      "a + 1 > b",
      ast::binary(
        ast::binary(
          testing::identifier("a"),
          "+",
          Expression::Literal(Literal::Numeric(1.0)),
        ),
        ">",
        testing::identifier("b"),
      ),
    );
  }

  #[test]
  fn test_subtraction_without_spaces() {
    testing::assert_eq(
      &parse_expression,
      "a-1",
      ast::binary(
        testing::identifier("a"),
        "-",
        Expression::Literal(Literal::Numeric(1.0)),
      ),
    );
  }

  #[test]
  fn test_prefix_minus() {
    testing::assert_eq(
      &parse_expression,
      "-10",
      ast::binary(
        Expression::Literal(Literal::Numeric(0.0)),
        "-",
        Expression::Literal(Literal::Numeric(10.0)),
      ),
    );
  }

  #[test]
  fn test_prefix_minus_binds_tighter_than_multiplication() {
    testing::assert_eq(
      &parse_expression,
      "-2 * 3",
      ast::binary(
        ast::binary(
          Expression::Literal(Literal::Numeric(0.0)),
          "-",
          Expression::Literal(Literal::Numeric(2.0)),
        ),
        "*",
        Expression::Literal(Literal::Numeric(3.0)),
      ),
    );
  }

  #[test]
  fn test_assignment_is_right_associative() {
    testing::assert_eq(
      &parse_expression,
      "a = b = 1",
      Expression::Assignment {
        target: Box::new(testing::identifier("a")),
        value: Box::new(Expression::Assignment {
          target: Box::new(testing::identifier("b")),
          value: Box::new(Expression::Literal(Literal::Numeric(1.0))),
        }),
      },
    );
  }

  #[test]
  fn test_member_access_chain() {
    testing::assert_eq(
      &parse_expression,
      "point.x",
      Expression::Member {
        object: Box::new(testing::identifier("point")),
        property: "x".to_string(),
        token: testing::token(),
      },
    );
  }

  #[test]
  fn test_call_chain() {
    testing::assert_eq(
      &parse_expression,
      "a.push(4)",
      Expression::Call {
        callee: Box::new(Expression::Member {
          object: Box::new(testing::identifier("a")),
          property: "push".to_string(),
          token: testing::token(),
        }),
        arguments: vec![Expression::Literal(Literal::Numeric(4.0))],
      },
    );
  }

  #[test]
  fn test_array_literal() {
    testing::assert_eq(
      &parse_expression,
      "[1, 2]",
      Expression::Array {
        elements: vec![
          Expression::Literal(Literal::Numeric(1.0)),
          Expression::Literal(Literal::Numeric(2.0)),
        ],
      },
    );
  }

  #[test]
  fn test_array_literal_multiline() {
    let code = "[\n  1,\n  2,\n]";

    testing::assert_eq(
      &parse_expression,
      code,
      Expression::Array {
        elements: vec![
          Expression::Literal(Literal::Numeric(1.0)),
          Expression::Literal(Literal::Numeric(2.0)),
        ],
      },
    );
  }

  #[test]
  fn test_object_literal_preserves_order() {
    testing::assert_eq(
      &parse_expression,
      "{ b: 1, a: 2 }",
      Expression::Object {
        properties: vec![
          Property {
            key: "b".to_string(),
            value: Expression::Literal(Literal::Numeric(1.0)),
          },
          Property {
            key: "a".to_string(),
            value: Expression::Literal(Literal::Numeric(2.0)),
          },
        ],
      },
    );
  }

  #[test]
  fn test_break_is_an_expression() {
    testing::assert_eq(&parse_expression, "break", Expression::Break);
  }

  #[test]
  fn test_newline_ends_expression() {
    // The newline is not consumed, so `2` is not part of this expression.
    let (expression, _) = parse_expression(testing::tokenize("1\n2")).unwrap();
    assert_eq!(expression, Expression::Literal(Literal::Numeric(1.0)));
  }

  #[test]
  fn test_unexpected_token() {
    assert!(parse_expression(testing::tokenize("@")).is_err());
    assert!(parse_expression(testing::tokenize("'unterminated")).is_err());
  }
}
