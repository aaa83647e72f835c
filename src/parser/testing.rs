use std::fmt;
use std::rc::Rc;

use crate::ast::{ElseIf, Expression, LoopStatement, Property, Statement};
use crate::errors::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::source::{Input, SourceCode};

/// Placeholder token used when comparing ASTs structurally: [assert_eq]
/// replaces every token on both sides with this one so that positions do
/// not participate in the comparison.
pub fn token() -> Token {
  Token {
    kind: TokenKind::Unknown,
    literal: String::new(),
    line: 0,
    column_start: 0,
    column_end: 0,
    span: (0, 0),
    source: SourceCode::from_str(""),
  }
}

pub fn identifier(name: &str) -> Expression {
  Expression::Identifier {
    name: name.to_string(),
    token: token(),
  }
}

pub fn tokenize(source: &str) -> Input {
  Input::new(Lexer::new(&SourceCode::from_str(source)).lex())
}

pub fn parse<T, F>(function: &F, source: &str) -> T
where
  F: Fn(Input) -> Result<(T, Input), ParseError>,
{
  match function(tokenize(source)) {
    | Ok((value, _)) => value,
    | Err(error) => panic!("failed to parse {source:?}: {error:?}"),
  }
}

pub fn is_ok<T, F>(function: &F, source: &str)
where
  F: Fn(Input) -> Result<(T, Input), ParseError>,
{
  if let Err(error) = function(tokenize(source)) {
    panic!("failed to parse {source:?}: {error:?}");
  }
}

pub fn assert_eq<T, F>(function: &F, source: &str, expected: T)
where
  T: Strip + PartialEq + fmt::Debug,
  F: Fn(Input) -> Result<(T, Input), ParseError>,
{
  let actual = parse(function, source);
  assert_eq!(actual.strip(), expected.strip());
}

/// Rewrites every token in a node to the placeholder, leaving only the
/// structure to compare.
pub trait Strip {
  fn strip(self) -> Self;
}

impl Strip for Expression {
  fn strip(self) -> Self {
    match self {
      | Expression::Literal(literal) => Expression::Literal(literal),
      | Expression::Identifier { name, .. } => Expression::Identifier { name, token: token() },
      | Expression::Binary { left, operator, right } => {
        Expression::Binary {
          left: Box::new(left.strip()),
          operator,
          right: Box::new(right.strip()),
        }
      },
      | Expression::Assignment { target, value } => {
        Expression::Assignment {
          target: Box::new(target.strip()),
          value: Box::new(value.strip()),
        }
      },
      | Expression::Object { properties } => {
        Expression::Object {
          properties: properties
            .into_iter()
            .map(|Property { key, value }| Property { key, value: value.strip() })
            .collect(),
        }
      },
      | Expression::Member { object, property, .. } => {
        Expression::Member {
          object: Box::new(object.strip()),
          property,
          token: token(),
        }
      },
      | Expression::Array { elements } => {
        Expression::Array {
          elements: elements.into_iter().map(Strip::strip).collect(),
        }
      },
      | Expression::Index { array, index } => {
        Expression::Index {
          array: Box::new(array.strip()),
          index: Box::new(index.strip()),
        }
      },
      | Expression::Call { callee, arguments } => {
        Expression::Call {
          callee: Box::new(callee.strip()),
          arguments: arguments.into_iter().map(Strip::strip).collect(),
        }
      },
      | Expression::Break => Expression::Break,
    }
  }
}

impl Strip for Statement {
  fn strip(self) -> Self {
    match self {
      | Statement::VariableDeclaration { constant, name, value, .. } => {
        Statement::VariableDeclaration {
          constant,
          name,
          token: token(),
          value: value.map(Strip::strip),
        }
      },
      | Statement::FunctionDeclaration { name, parameters, body } => {
        Statement::FunctionDeclaration {
          name,
          parameters,
          body: Rc::new(body.iter().cloned().map(Strip::strip).collect()),
        }
      },
      | Statement::If { condition, body, else_ifs, else_body } => {
        Statement::If {
          condition: condition.strip(),
          body: strip_block(body),
          else_ifs: else_ifs
            .into_iter()
            .map(|ElseIf { condition, body }| {
              ElseIf {
                condition: condition.strip(),
                body: strip_block(body),
              }
            })
            .collect(),
          else_body: strip_block(else_body),
        }
      },
      | Statement::Loop(node) => {
        Statement::Loop(LoopStatement {
          condition: node.condition.map(Strip::strip),
          body: strip_block(node.body),
          loop_var: node.loop_var,
          from: node.from.map(Strip::strip),
          to: node.to.map(Strip::strip),
          increment: node.increment.map(Strip::strip),
          for_each: node.for_each,
        })
      },
      | Statement::Return { value } => {
        Statement::Return {
          value: value.map(Strip::strip),
        }
      },
      | Statement::Import { path, .. } => Statement::Import { path, token: token() },
      | Statement::Expression(expression) => Statement::Expression(expression.strip()),
    }
  }
}

fn strip_block(statements: Vec<Statement>) -> Vec<Statement> {
  statements.into_iter().map(Strip::strip).collect()
}
