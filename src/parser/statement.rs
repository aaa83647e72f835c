use std::rc::Rc;

use super::combinators;
use super::expression;
use crate::ast::{ElseIf, LoopStatement, Statement};
use crate::errors::ParseError;
use crate::lexer::TokenKind;
use crate::source::Input;

/// Dispatches on the leading keyword; anything else parses as an
/// expression statement.
pub fn parse_statement(input: Input) -> Result<(Statement, Input), ParseError> {
  match input.kind() {
    | TokenKind::Import => parse_import(input),
    | TokenKind::Var | TokenKind::Const => parse_variable_declaration(input),
    | TokenKind::Function => parse_function_declaration(input),
    | TokenKind::If => parse_if(input),
    | TokenKind::Loop => parse_loop(input),
    | TokenKind::Return => parse_return(input),
    | _ => {
      let (expression, input) = expression::parse_expression(input)?;
      Ok((Statement::Expression(expression), input))
    },
  }
}

fn parse_import(input: Input) -> Result<(Statement, Input), ParseError> {
  let input = input.next();

  if input.kind() != TokenKind::String {
    return Err(ParseError::ExpectedImportPath {
      found: input.read(),
    });
  }

  let token = input.read();

  Ok((
    Statement::Import {
      path: token.literal.clone(),
      token,
    },
    input.next(),
  ))
}

fn parse_variable_declaration(input: Input) -> Result<(Statement, Input), ParseError> {
  let constant = input.kind() == TokenKind::Const;
  let (name, input) = combinators::expect_identifier(input.next())?;

  // `var x` with no initializer declares a null slot; `const x` does not.
  if combinators::at_statement_end(&input) {
    if constant {
      return Err(ParseError::ConstWithoutValue {
        found: input.read(),
      });
    }

    let input = if input.kind() == TokenKind::Semicolon {
      input.next()
    } else {
      input
    };

    return Ok((
      Statement::VariableDeclaration {
        constant,
        name: name.literal.clone(),
        token: name,
        value: None,
      },
      input,
    ));
  }

  let input = combinators::expect(TokenKind::Equal, input)?;
  let (value, input) = expression::parse_expression(input)?;

  let input = if input.kind() == TokenKind::Semicolon {
    input.next()
  } else {
    input
  };

  Ok((
    Statement::VariableDeclaration {
      constant,
      name: name.literal.clone(),
      token: name,
      value: Some(value),
    },
    input,
  ))
}

fn parse_function_declaration(input: Input) -> Result<(Statement, Input), ParseError> {
  let input = input.next();

  if input.kind() != TokenKind::Identifier {
    return Err(ParseError::ExpectedFunctionName {
      found: input.read(),
    });
  }

  let name = input.read().literal;
  let (parameters, input) = parse_parameters(input.next())?;
  let input = combinators::expect(TokenKind::OpenCurly, input)?;
  let (body, input) = parse_block(input)?;

  Ok((
    Statement::FunctionDeclaration {
      name,
      parameters,
      body: Rc::new(body),
    },
    input,
  ))
}

/// Parameter lists allow newlines and trailing commas, but every entry
/// must be a bare identifier.
fn parse_parameters(input: Input) -> Result<(Vec<String>, Input), ParseError> {
  let mut input = combinators::expect(TokenKind::OpenParen, input)?;
  let mut parameters = vec![];

  loop {
    input = combinators::skip_newlines(input);

    match input.kind() {
      | TokenKind::CloseParen => break,
      | TokenKind::Comma => input = input.next(),
      | TokenKind::Identifier => {
        parameters.push(input.read().literal);
        input = input.next();
      },
      | _ => {
        return Err(ParseError::ExpectedParameter {
          found: input.read(),
        });
      },
    }
  }

  Ok((parameters, input.next()))
}

/// Parses statements up to the closing brace. The opening brace has
/// already been consumed.
pub fn parse_block(input: Input) -> Result<(Vec<Statement>, Input), ParseError> {
  let mut input = input;
  let mut statements = vec![];

  loop {
    input = combinators::skip_newlines(input);

    if matches!(input.kind(), TokenKind::CloseCurly | TokenKind::Eof) {
      break;
    }

    let (statement, rest) = parse_statement(input)?;

    statements.push(statement);
    input = rest;
  }

  let input = combinators::expect(TokenKind::CloseCurly, input)?;

  Ok((statements, input))
}

fn parse_if(input: Input) -> Result<(Statement, Input), ParseError> {
  let (condition, input) = expression::parse_expression(input.next())?;
  let input = combinators::expect(TokenKind::OpenCurly, input)?;
  let (body, mut input) = parse_block(input)?;

  let mut else_ifs = vec![];
  let mut else_body = vec![];

  // `else if` is two tokens; `elseif` would be a plain identifier.
  loop {
    let ahead = combinators::skip_newlines(input.clone());

    if ahead.kind() != TokenKind::Else {
      break;
    }

    let after_else = ahead.next();

    if after_else.kind() == TokenKind::If {
      let (condition, rest) = expression::parse_expression(after_else.next())?;
      let rest = combinators::expect(TokenKind::OpenCurly, rest)?;
      let (body, rest) = parse_block(rest)?;

      else_ifs.push(ElseIf { condition, body });
      input = rest;
    } else {
      let rest = combinators::expect(TokenKind::OpenCurly, after_else)?;
      let (statements, rest) = parse_block(rest)?;

      else_body = statements;
      input = rest;
      break;
    }
  }

  Ok((
    Statement::If {
      condition,
      body,
      else_ifs,
      else_body,
    },
    input,
  ))
}

/// Loop shape is decided by lookahead: `{` means infinite, an identifier
/// followed by `from` means range or foreach (range when a `to` follows
/// the start expression), anything else is a while condition.
fn parse_loop(input: Input) -> Result<(Statement, Input), ParseError> {
  let input = input.next();

  if input.kind() == TokenKind::OpenCurly {
    let (body, input) = parse_block(input.next())?;
    return Ok((Statement::Loop(LoopStatement::infinite(body)), input));
  }

  if input.kind() == TokenKind::Identifier && input.next().kind() == TokenKind::From {
    let loop_var = input.read().literal;
    let (from, input) = expression::parse_expression(input.next().next())?;

    if input.kind() == TokenKind::To {
      let (to, input) = expression::parse_expression(input.next())?;

      let (increment, input) = if input.kind() == TokenKind::Colon {
        let (increment, input) = expression::parse_expression(input.next())?;
        (Some(increment), input)
      } else {
        (None, input)
      };

      let input = combinators::expect(TokenKind::OpenCurly, input)?;
      let (body, input) = parse_block(input)?;

      return Ok((
        Statement::Loop(LoopStatement::range(loop_var, from, to, increment, body)),
        input,
      ));
    }

    let input = combinators::expect(TokenKind::OpenCurly, input)?;
    let (body, input) = parse_block(input)?;

    return Ok((
      Statement::Loop(LoopStatement::for_each(loop_var, from, body)),
      input,
    ));
  }

  let (condition, input) = expression::parse_expression(input)?;
  let input = combinators::expect(TokenKind::OpenCurly, input)?;
  let (body, input) = parse_block(input)?;

  Ok((
    Statement::Loop(LoopStatement::with_condition(condition, body)),
    input,
  ))
}

fn parse_return(input: Input) -> Result<(Statement, Input), ParseError> {
  let input = input.next();

  if combinators::at_statement_end(&input) {
    return Ok((Statement::Return { value: None }, input));
  }

  let (value, input) = expression::parse_expression(input)?;

  Ok((Statement::Return { value: Some(value) }, input))
}
