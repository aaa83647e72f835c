use super::{Expression, LoopStatement, Statement};

impl LoopStatement {
  pub fn infinite(body: Vec<Statement>) -> Self {
    LoopStatement {
      condition: None,
      body,
      loop_var: None,
      from: None,
      to: None,
      increment: None,
      for_each: false,
    }
  }

  pub fn with_condition(condition: Expression, body: Vec<Statement>) -> Self {
    LoopStatement {
      condition: Some(condition),
      ..Self::infinite(body)
    }
  }

  pub fn range(
    loop_var: String,
    from: Expression,
    to: Expression,
    increment: Option<Expression>,
    body: Vec<Statement>,
  ) -> Self {
    LoopStatement {
      loop_var: Some(loop_var),
      from: Some(from),
      to: Some(to),
      increment,
      ..Self::infinite(body)
    }
  }

  pub fn for_each(loop_var: String, iterable: Expression, body: Vec<Statement>) -> Self {
    LoopStatement {
      loop_var: Some(loop_var),
      from: Some(iterable),
      for_each: true,
      ..Self::infinite(body)
    }
  }
}

/// Builds a binary expression node without the `Box` noise at call sites.
pub fn binary(left: Expression, operator: impl Into<String>, right: Expression) -> Expression {
  Expression::Binary {
    left: Box::new(left),
    operator: operator.into(),
    right: Box::new(right),
  }
}
