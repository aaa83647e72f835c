use std::rc::Rc;

use crate::ast::{ElseIf, Expression, Literal, LoopStatement, Program, Statement};
use crate::builtins;
use crate::errors::{InterpreterError, LangError, Wrappable};
use crate::lexer::Token;
use super::operations;
use super::{FunctionValue, Properties, Scope, Value};

/// Tree-walking evaluator. Every statement and expression evaluates to a
/// [Value]; `Break` and `Return` sentinels travel as values and are
/// intercepted by loops and call dispatch.
pub struct Interpreter;

impl Interpreter {
  pub fn new() -> Self {
    Interpreter
  }

  /// Evaluates a program against a scope, returning the value of its last
  /// statement.
  pub fn eval_program(&mut self, program: &Program, scope: &Rc<Scope>) -> Result<Value, LangError> {
    let mut last = Value::Null;

    for statement in &program.statements {
      last = self.eval_statement(statement, scope)?;
    }

    Ok(last)
  }

  pub fn eval_statement(
    &mut self,
    statement: &Statement,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    match statement {
      | Statement::Expression(expression) => self.eval_expression(expression, scope),
      | Statement::VariableDeclaration { constant, name, token, value } => {
        let value = match value {
          | Some(expression) => self.eval_expression(expression, scope)?,
          | None => Value::Null,
        };

        scope
          .declare(name, value.clone(), *constant)
          .map_err(|error| error.with_token(token.clone()).wrap())?;

        Ok(value)
      },
      | Statement::FunctionDeclaration { name, parameters, body } => {
        let function = Value::Function(Rc::new(FunctionValue {
          name: name.clone(),
          parameters: parameters.clone(),
          body: Rc::clone(body),
          scope: Rc::clone(scope),
        }));

        scope
          .declare(name, function.clone(), false)
          .map_err(Wrappable::wrap)?;

        Ok(function)
      },
      | Statement::If { condition, body, else_ifs, else_body } => {
        self.eval_if(condition, body, else_ifs, else_body, scope)
      },
      | Statement::Loop(node) => self.eval_loop(node, scope),
      | Statement::Return { value } => {
        let value = match value {
          | Some(expression) => self.eval_expression(expression, scope)?,
          | None => Value::Null,
        };

        Ok(Value::Return(Box::new(value)))
      },
      // Imports are expanded before evaluation; one that survives (nested
      // inside a function body) is a no-op.
      | Statement::Import { .. } => Ok(Value::Null),
    }
  }

  /// Runs a statement list in the given scope, stopping at the first
  /// control-flow sentinel and propagating it.
  fn eval_block(&mut self, statements: &[Statement], scope: &Rc<Scope>) -> Result<Value, LangError> {
    let mut last = Value::Null;

    for statement in statements {
      last = self.eval_statement(statement, scope)?;

      if matches!(last, Value::Break | Value::Return(..)) {
        break;
      }
    }

    Ok(last)
  }

  fn eval_if(
    &mut self,
    condition: &Expression,
    body: &[Statement],
    else_ifs: &[ElseIf],
    else_body: &[Statement],
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    if self.eval_expression(condition, scope)?.truthy() {
      return self.eval_block(body, scope);
    }

    for clause in else_ifs {
      if self.eval_expression(&clause.condition, scope)?.truthy() {
        return self.eval_block(&clause.body, scope);
      }
    }

    if !else_body.is_empty() {
      return self.eval_block(else_body, scope);
    }

    Ok(Value::Null)
  }

  fn eval_loop(&mut self, node: &LoopStatement, scope: &Rc<Scope>) -> Result<Value, LangError> {
    if let Some(name) = &node.loop_var {
      if node.for_each {
        return self.eval_for_each(name, node, scope);
      }

      return self.eval_range_loop(name, node, scope);
    }

    let mut result = Value::Null;

    loop {
      if let Some(condition) = &node.condition {
        if !self.eval_expression(condition, scope)?.truthy() {
          break;
        }
      }

      match self.eval_block(&node.body, scope)? {
        | Value::Break => return Ok(Value::Null),
        | sentinel @ Value::Return(..) => return Ok(sentinel),
        | value => result = value,
      }
    }

    Ok(result)
  }

  /// Range loops run from `from` to `to` inclusive. The increment sign
  /// decides the direction when given; otherwise the bounds do. The loop
  /// variable lives in the CURRENT scope, not a child.
  fn eval_range_loop(
    &mut self,
    name: &str,
    node: &LoopStatement,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let (Some(from), Some(to)) = (&node.from, &node.to) else {
      return Err(InterpreterError::RangeBoundsNotNumeric.wrap());
    };

    let from = self.eval_expression(from, scope)?;
    let to = self.eval_expression(to, scope)?;

    let (Value::Numeric(from), Value::Numeric(to)) = (from, to) else {
      return Err(InterpreterError::RangeBoundsNotNumeric.wrap());
    };

    let increment = match &node.increment {
      | Some(expression) => {
        match self.eval_expression(expression, scope)? {
          | Value::Numeric(value) => Some(value),
          | _ => return Err(InterpreterError::RangeIncrementNotNumeric.wrap()),
        }
      },
      | None => None,
    };

    let step = increment.unwrap_or(1.0);
    let forward = match increment {
      | Some(step) => step > 0.0,
      | None => from <= to,
    };

    let mut result = Value::Null;
    let mut current = from;

    loop {
      if forward && current > to {
        break;
      }

      if !forward && current < to {
        break;
      }

      scope.set_local(name, Value::Numeric(current));

      match self.eval_block(&node.body, scope)? {
        | Value::Break => return Ok(Value::Null),
        | sentinel @ Value::Return(..) => return Ok(sentinel),
        | value => result = value,
      }

      current += step;
    }

    Ok(result)
  }

  fn eval_for_each(
    &mut self,
    name: &str,
    node: &LoopStatement,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let Some(iterable) = &node.from else {
      return Err(InterpreterError::ForEachNotArray { type_name: "null" }.wrap());
    };

    let iterable = self.eval_expression(iterable, scope)?;

    // Iterate over a snapshot so body mutations cannot invalidate the
    // walk.
    let elements = match &iterable {
      | Value::Array(elements) => elements.borrow().clone(),
      | value => {
        return Err(
          InterpreterError::ForEachNotArray {
            type_name: value.type_name(),
          }
          .wrap(),
        );
      },
    };

    let mut result = Value::Null;

    for element in elements {
      scope.set_local(name, element);

      match self.eval_block(&node.body, scope)? {
        | Value::Break => return Ok(Value::Null),
        | sentinel @ Value::Return(..) => return Ok(sentinel),
        | value => result = value,
      }
    }

    Ok(result)
  }

  pub fn eval_expression(
    &mut self,
    expression: &Expression,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    match expression {
      | Expression::Literal(literal) => {
        Ok(match literal {
          | Literal::Numeric(value) => Value::Numeric(*value),
          | Literal::String(value) => Value::String(value.clone()),
          | Literal::Boolean(value) => Value::Boolean(*value),
          | Literal::Null => Value::Null,
        })
      },
      | Expression::Identifier { name, token } => {
        scope
          .get(name)
          .map_err(|error| error.with_token(token.clone()).wrap())
      },
      | Expression::Binary { left, operator, right } => {
        self.eval_binary(left, operator, right, scope)
      },
      | Expression::Assignment { target, value } => self.eval_assignment(target, value, scope),
      | Expression::Object { properties } => {
        let mut object = Properties::new();

        for property in properties {
          let value = self.eval_expression(&property.value, scope)?;
          object.insert(property.key.clone(), value);
        }

        Ok(Value::object(object))
      },
      | Expression::Array { elements } => {
        let mut values = vec![];

        for element in elements {
          values.push(self.eval_expression(element, scope)?);
        }

        Ok(Value::array(values))
      },
      | Expression::Member { object, property, token } => {
        self.eval_member(object, property, token, scope)
      },
      | Expression::Index { array, index } => self.eval_index(array, index, scope),
      | Expression::Call { callee, arguments } => self.eval_call(callee, arguments, scope),
      | Expression::Break => Ok(Value::Break),
    }
  }

  fn eval_binary(
    &mut self,
    left: &Expression,
    operator: &str,
    right: &Expression,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let left = self.eval_expression(left, scope)?;
    let right = self.eval_expression(right, scope)?;

    // Logical operators coerce both evaluated operands via truthiness;
    // there is no short-circuiting.
    match operator {
      | "&&" => Ok(Value::Boolean(left.truthy() && right.truthy())),
      | "||" => Ok(Value::Boolean(left.truthy() || right.truthy())),
      | _ => operations::binary(operator, &left, &right).map_err(Wrappable::wrap),
    }
  }

  fn eval_assignment(
    &mut self,
    target: &Expression,
    value: &Expression,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    match target {
      | Expression::Identifier { name, token } => {
        let value = self.eval_expression(value, scope)?;

        scope
          .assign(name, value)
          .map_err(|error| error.with_token(token.clone()).wrap())
      },
      | Expression::Member { object, property, token } => {
        let receiver = self.eval_expression(object, scope)?;

        match receiver {
          | Value::Object(properties) => {
            let value = self.eval_expression(value, scope)?;
            properties.borrow_mut().insert(property.clone(), value.clone());

            Ok(value)
          },
          | receiver => {
            Err(
              InterpreterError::CannotAssignProperty {
                property: property.clone(),
                type_name: receiver.type_name(),
                token: Some(token.clone()),
              }
              .wrap(),
            )
          },
        }
      },
      | Expression::Index { array, index } => {
        let receiver = self.eval_expression(array, scope)?;

        match receiver {
          | Value::Array(elements) => {
            let index = self.eval_index_value(index, scope)?;
            let length = elements.borrow().len();

            let slot = to_zero_based(index, length).ok_or_else(|| {
              InterpreterError::ArrayIndexOutOfBounds { index, length }.wrap()
            })?;

            let value = self.eval_expression(value, scope)?;
            elements.borrow_mut()[slot] = value.clone();

            Ok(value)
          },
          // Strings are immutable, so indexed assignment to them lands
          // here too.
          | receiver => {
            Err(
              InterpreterError::NotIndexable {
                type_name: receiver.type_name(),
              }
              .wrap(),
            )
          },
        }
      },
      | _ => Err(InterpreterError::InvalidAssignmentTarget.wrap()),
    }
  }

  /// Member access dispatches on the receiver kind: arrays and strings
  /// produce bound native methods, objects look up properties.
  fn eval_member(
    &mut self,
    object: &Expression,
    property: &str,
    token: &Token,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let receiver = self.eval_expression(object, scope)?;

    match &receiver {
      | Value::Array(elements) => {
        builtins::arrays::method(elements, property)
          .map(Value::NativeFunction)
          .ok_or_else(|| {
            InterpreterError::UnknownMethod {
              receiver: "array",
              method: property.to_string(),
              token: Some(token.clone()),
            }
            .wrap()
          })
      },
      | Value::String(text) => {
        builtins::strings::method(text, property)
          .map(Value::NativeFunction)
          .ok_or_else(|| {
            InterpreterError::UnknownMethod {
              receiver: "string",
              method: property.to_string(),
              token: Some(token.clone()),
            }
            .wrap()
          })
      },
      | Value::Object(properties) => {
        properties.borrow().get(property).cloned().ok_or_else(|| {
          InterpreterError::PropertyNotFound {
            property: property.to_string(),
            token: Some(token.clone()),
          }
          .wrap()
        })
      },
      | receiver => {
        Err(
          InterpreterError::NotAnObject {
            property: property.to_string(),
            type_name: receiver.type_name(),
            token: Some(token.clone()),
          }
          .wrap(),
        )
      },
    }
  }

  /// Arrays and strings index 1-based; strings index by byte and yield a
  /// one-byte string.
  fn eval_index(
    &mut self,
    array: &Expression,
    index: &Expression,
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let receiver = self.eval_expression(array, scope)?;
    let index = self.eval_index_value(index, scope)?;

    match &receiver {
      | Value::Array(elements) => {
        let elements = elements.borrow();

        let slot = to_zero_based(index, elements.len()).ok_or_else(|| {
          InterpreterError::ArrayIndexOutOfBounds {
            index,
            length: elements.len(),
          }
          .wrap()
        })?;

        Ok(elements[slot].clone())
      },
      | Value::String(text) => {
        let bytes = text.as_bytes();

        let slot = to_zero_based(index, bytes.len()).ok_or_else(|| {
          InterpreterError::StringIndexOutOfBounds {
            index,
            length: bytes.len(),
          }
          .wrap()
        })?;

        Ok(Value::String(
          String::from_utf8_lossy(&bytes[slot..=slot]).to_string(),
        ))
      },
      | receiver => {
        Err(
          InterpreterError::NotIndexable {
            type_name: receiver.type_name(),
          }
          .wrap(),
        )
      },
    }
  }

  fn eval_index_value(
    &mut self,
    expression: &Expression,
    scope: &Rc<Scope>,
  ) -> Result<i64, LangError> {
    match self.eval_expression(expression, scope)? {
      | Value::Numeric(value) => Ok(value as i64),
      | _ => Err(InterpreterError::IndexNotNumeric.wrap()),
    }
  }

  fn eval_call(
    &mut self,
    callee: &Expression,
    arguments: &[Expression],
    scope: &Rc<Scope>,
  ) -> Result<Value, LangError> {
    let callee = self.eval_expression(callee, scope)?;

    match callee {
      | Value::NativeFunction(native) => {
        let arguments = self.eval_arguments(arguments, scope)?;

        (native.function)(&arguments, scope)
      },
      | Value::Function(function) => {
        if arguments.len() != function.parameters.len() {
          return Err(
            InterpreterError::ArityMismatch {
              name: function.name.clone(),
              expected: function.parameters.len(),
              got: arguments.len(),
            }
            .wrap(),
          );
        }

        let arguments = self.eval_arguments(arguments, scope)?;

        // Calls run in a fresh child of the CAPTURED scope, not of the
        // caller's scope.
        let call_scope = Scope::child(&function.scope);

        for (parameter, value) in function.parameters.iter().zip(arguments) {
          call_scope
            .declare(parameter, value, false)
            .map_err(Wrappable::wrap)?;
        }

        let mut result = Value::Null;

        for statement in function.body.iter() {
          result = self.eval_statement(statement, &call_scope)?;

          if matches!(result, Value::Return(..)) {
            break;
          }
        }

        // An explicit return unwraps; otherwise the last statement's
        // value is the implicit return.
        match result {
          | Value::Return(value) => Ok(*value),
          | value => Ok(value),
        }
      },
      | callee => {
        Err(
          InterpreterError::NotCallable {
            type_name: callee.type_name(),
          }
          .wrap(),
        )
      },
    }
  }

  fn eval_arguments(
    &mut self,
    arguments: &[Expression],
    scope: &Rc<Scope>,
  ) -> Result<Vec<Value>, LangError> {
    let mut values = vec![];

    for argument in arguments {
      values.push(self.eval_expression(argument, scope)?);
    }

    Ok(values)
  }
}

impl Default for Interpreter {
  fn default() -> Self {
    Self::new()
  }
}

/// Converts a user-facing 1-based index into an internal 0-based slot,
/// or `None` when it is out of bounds.
fn to_zero_based(index: i64, length: usize) -> Option<usize> {
  if index < 1 || index as usize > length {
    None
  } else {
    Some(index as usize - 1)
  }
}

#[cfg(test)]
mod tests {
  use indoc::indoc;

  use super::super::testing;
  use super::*;
  use crate::errors::{InterpreterError, LangError};

  #[test]
  fn test_literals() {
    assert_eq!(testing::eval("42"), Value::Numeric(42.0));
    assert_eq!(testing::eval("'hi'"), Value::String("hi".to_string()));
    assert_eq!(testing::eval("yes"), Value::Boolean(true));
    assert_eq!(testing::eval("off"), Value::Boolean(false));
    assert_eq!(testing::eval("null"), Value::Null);
  }

  #[test]
  fn test_arithmetic() {
    assert_eq!(testing::eval("1 + 2 * 3"), Value::Numeric(7.0));
    assert_eq!(testing::eval("(1 + 2) * 3"), Value::Numeric(9.0));
    assert_eq!(testing::eval("1-1"), Value::Numeric(0.0));
    assert_eq!(testing::eval("10 % 3"), Value::Numeric(1.0));
  }

  #[test]
  fn test_string_operators() {
    assert_eq!(
      testing::eval(r#""-" * 3 + ">""#),
      Value::String("--->".to_string())
    );

    assert_eq!(
      testing::eval(r#""n = " + 4"#),
      Value::String("n = 4".to_string())
    );
  }

  #[test]
  fn test_variables() {
    let code = indoc! {"
      var a = 1
      var b = 2
      a = a + b
      a
    "};

    assert_eq!(testing::eval(code), Value::Numeric(3.0));
  }

  #[test]
  fn test_declaration_evaluates_to_its_value() {
    assert_eq!(testing::eval("var x = 42"), Value::Numeric(42.0));
    assert_eq!(testing::eval("var x"), Value::Null);
  }

  #[test]
  fn test_const_cannot_be_reassigned() {
    let error = testing::try_eval("const k = 1\nk = 2").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::AssignmentToConstant { .. })
    ));
  }

  #[test]
  fn test_redeclaration_is_an_error() {
    let error = testing::try_eval("var x = 1\nvar x = 2").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::VariableAlreadyDeclared { .. })
    ));
  }

  #[test]
  fn test_unknown_variable() {
    let error = testing::try_eval("missing").unwrap_err();

    match error {
      | LangError::Interpreter(InterpreterError::VariableNotFound { name, token }) => {
        assert_eq!(name, "missing");
        assert!(token.is_some());
      },
      | error => panic!("unexpected error: {error:?}"),
    }
  }

  #[test]
  fn test_if_else_chain() {
    let code = indoc! {"
      var x = 5

      if x > 10 {
        'big'
      } else if x > 3 {
        'medium'
      } else {
        'small'
      }
    "};

    assert_eq!(testing::eval(code), Value::String("medium".to_string()));
  }

  #[test]
  fn test_if_without_match_is_null() {
    assert_eq!(testing::eval("if no { 1 }"), Value::Null);
  }

  #[test]
  fn test_truthiness_of_conditions() {
    assert_eq!(testing::eval("if 0 { 1 } else { 2 }"), Value::Numeric(2.0));
    assert_eq!(testing::eval("if '' { 1 } else { 2 }"), Value::Numeric(2.0));
    assert_eq!(testing::eval("if [] { 1 } else { 2 }"), Value::Numeric(1.0));
    assert_eq!(testing::eval("if null { 1 } else { 2 }"), Value::Numeric(2.0));
  }

  #[test]
  fn test_while_loop() {
    let code = indoc! {"
      var n = 0

      loop n < 5 {
        n = n + 1
      }

      n
    "};

    assert_eq!(testing::eval(code), Value::Numeric(5.0));
  }

  #[test]
  fn test_infinite_loop_breaks() {
    let code = indoc! {"
      var n = 0

      loop {
        n = n + 1

        if n == 3 {
          break
        }
      }

      n
    "};

    assert_eq!(testing::eval(code), Value::Numeric(3.0));
  }

  #[test]
  fn test_range_loop() {
    let code = indoc! {"
      var sum = 0

      loop i from 1 to 4 {
        sum = sum + i
      }

      sum
    "};

    assert_eq!(testing::eval(code), Value::Numeric(10.0));
  }

  #[test]
  fn test_range_loop_with_negative_increment() {
    let code = indoc! {"
      var seen = []

      loop i from 10 to 6: -2 {
        seen.push(i)
      }

      seen.join(' ')
    "};

    assert_eq!(testing::eval(code), Value::String("10 8 6".to_string()));
  }

  #[test]
  fn test_range_loop_runs_once_when_bounds_match() {
    let code = indoc! {"
      var count = 0

      loop i from 3 to 3 {
        count = count + 1
      }

      count
    "};

    assert_eq!(testing::eval(code), Value::Numeric(1.0));
  }

  #[test]
  fn test_range_loop_variable_lives_in_the_current_scope() {
    let code = indoc! {"
      loop i from 1 to 3 { }
      i
    "};

    assert_eq!(testing::eval(code), Value::Numeric(3.0));
  }

  #[test]
  fn test_foreach_loop() {
    let code = indoc! {"
      var total = 0

      loop n from [1, 2, 3] {
        total = total + n
      }

      total
    "};

    assert_eq!(testing::eval(code), Value::Numeric(6.0));
  }

  #[test]
  fn test_foreach_over_mutated_array_does_not_crash() {
    let code = indoc! {"
      var items = [1, 2, 3]
      var count = 0

      loop n from items {
        items.push(n)
        count = count + 1
      }

      count
    "};

    assert_eq!(testing::eval(code), Value::Numeric(3.0));
  }

  #[test]
  fn test_foreach_requires_array() {
    let error = testing::try_eval("loop x from 'abc' { }").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::ForEachNotArray { .. })
    ));
  }

  #[test]
  fn test_fibonacci_with_implicit_return() {
    let code = indoc! {"
      fun fib(n) {
        if n <= 1 {
          return n
        }

        fib(n-1) + fib(n-2)
      }

      fib(10)
    "};

    assert_eq!(testing::eval(code), Value::Numeric(55.0));
  }

  #[test]
  fn test_implicit_return_of_last_statement() {
    let code = indoc! {"
      fun add(a, b) { a + b }
      add(2, 3)
    "};

    assert_eq!(testing::eval(code), Value::Numeric(5.0));
  }

  #[test]
  fn test_bare_return_yields_null() {
    let code = indoc! {"
      fun nothing() { return }
      nothing()
    "};

    assert_eq!(testing::eval(code), Value::Null);
  }

  #[test]
  fn test_return_stops_the_enclosing_loop() {
    let code = indoc! {"
      fun first() {
        loop i from 1 to 10 {
          return i
        }
      }

      first()
    "};

    assert_eq!(testing::eval(code), Value::Numeric(1.0));
  }

  #[test]
  fn test_arity_mismatch() {
    let error = testing::try_eval("fun f(a) { a }\nf(1, 2)").unwrap_err();

    match error {
      | LangError::Interpreter(InterpreterError::ArityMismatch { name, expected, got }) => {
        assert_eq!(name, "f");
        assert_eq!(expected, 1);
        assert_eq!(got, 2);
      },
      | error => panic!("unexpected error: {error:?}"),
    }
  }

  #[test]
  fn test_calling_a_non_function() {
    let error = testing::try_eval("var x = 1\nx()").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::NotCallable { type_name: "numeric" })
    ));
  }

  #[test]
  fn test_closure_captures_declaration_scope() {
    let code = indoc! {"
      fun make() {
        var c = 0

        fun inc() {
          c = c + 1
          c
        }

        inc
      }

      var f = make()
      f()
      f()
    "};

    assert_eq!(testing::eval(code), Value::Numeric(2.0));
  }

  #[test]
  fn test_two_closures_do_not_share_state() {
    let code = indoc! {"
      fun make() {
        var c = 0

        fun inc() {
          c = c + 1
          c
        }

        inc
      }

      var f = make()
      var g = make()
      f()
      f()
      g()
    "};

    assert_eq!(testing::eval(code), Value::Numeric(1.0));
  }

  #[test]
  fn test_call_scope_is_not_the_callers() {
    let code = indoc! {"
      var x = 'global'

      fun read() { x }

      fun shadowing() {
        var x = 'local'
        read()
      }

      shadowing()
    "};

    assert_eq!(testing::eval(code), Value::String("global".to_string()));
  }

  #[test]
  fn test_array_indexing_is_one_based() {
    assert_eq!(testing::eval("[10, 20, 30][1]"), Value::Numeric(10.0));
    assert_eq!(testing::eval("[10, 20, 30][3]"), Value::Numeric(30.0));
  }

  #[test]
  fn test_array_index_out_of_bounds() {
    for code in ["[1, 2][0]", "[1, 2][3]"] {
      let error = testing::try_eval(code).unwrap_err();

      assert!(matches!(
        error,
        LangError::Interpreter(InterpreterError::ArrayIndexOutOfBounds { .. })
      ));
    }
  }

  #[test]
  fn test_array_index_assignment() {
    let code = indoc! {"
      var a = [1, 2, 3]
      a[2] = 20
      a[2]
    "};

    assert_eq!(testing::eval(code), Value::Numeric(20.0));
  }

  #[test]
  fn test_string_indexing_is_one_based_and_byte_oriented() {
    assert_eq!(testing::eval("'abc'[1]"), Value::String("a".to_string()));
    assert_eq!(testing::eval("'abc'[3]"), Value::String("c".to_string()));
  }

  #[test]
  fn test_string_index_out_of_bounds() {
    let error = testing::try_eval("'abc'[4]").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::StringIndexOutOfBounds { .. })
    ));
  }

  #[test]
  fn test_indexed_assignment_to_string_is_an_error() {
    let error = testing::try_eval("var s = 'abc'\ns[1] = 'x'").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::NotIndexable { type_name: "string" })
    ));
  }

  #[test]
  fn test_objects() {
    let code = indoc! {"
      var point = { x: 1, y: 2 }
      point.y
    "};

    assert_eq!(testing::eval(code), Value::Numeric(2.0));
  }

  #[test]
  fn test_object_property_assignment_and_growth() {
    let code = indoc! {"
      var point = { x: 1 }
      point.x = 10
      point.z = 3
      point.x + point.z
    "};

    assert_eq!(testing::eval(code), Value::Numeric(13.0));
  }

  #[test]
  fn test_missing_property() {
    let error = testing::try_eval("({ x: 1 }).y").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::PropertyNotFound { .. })
    ));
  }

  #[test]
  fn test_duplicate_object_keys_last_wins() {
    assert_eq!(testing::eval("({ x: 1, x: 2 }).x"), Value::Numeric(2.0));
  }

  #[test]
  fn test_containers_alias_by_reference() {
    let code = indoc! {"
      var a = [1]
      var b = a
      b.push(2)
      a.len()
    "};

    assert_eq!(testing::eval(code), Value::Numeric(2.0));
  }

  #[test]
  fn test_self_referential_object_is_tolerated() {
    let code = indoc! {"
      var o = { x: 1 }
      o.me = o
      o.me.me.x
    "};

    assert_eq!(testing::eval(code), Value::Numeric(1.0));
  }

  #[test]
  fn test_logical_operators_coerce_to_boolean() {
    assert_eq!(testing::eval("1 && 'x'"), Value::Boolean(true));
    assert_eq!(testing::eval("0 || ''"), Value::Boolean(false));
    assert_eq!(testing::eval("no || 'x'"), Value::Boolean(true));
  }

  #[test]
  fn test_logical_operators_evaluate_both_operands() {
    // No short-circuiting: the right operand runs even when the left
    // already decides the result.
    let error = testing::try_eval("no && missing").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::VariableNotFound { .. })
    ));

    let error = testing::try_eval("yes || missing").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::VariableNotFound { .. })
    ));

    let code = indoc! {"
      var calls = 0

      fun bump() {
        calls = calls + 1
        yes
      }

      no && bump()
      calls
    "};

    assert_eq!(testing::eval(code), Value::Numeric(1.0));
  }

  #[test]
  fn test_division_by_zero() {
    let error = testing::try_eval("1 / 0").unwrap_err();

    assert!(matches!(
      error,
      LangError::Interpreter(InterpreterError::DivisionByZero)
    ));
  }

  #[test]
  fn test_break_outside_loop_propagates_silently() {
    assert_eq!(testing::eval("break"), Value::Break);
  }

  #[test]
  fn test_return_at_top_level_propagates_as_sentinel() {
    assert_eq!(
      testing::eval("return 1"),
      Value::Return(Box::new(Value::Numeric(1.0)))
    );
  }

  #[test]
  fn test_assignment_evaluates_to_the_value() {
    assert_eq!(testing::eval("var x = 1\nx = 5"), Value::Numeric(5.0));
  }

  #[test]
  fn test_chained_method_calls() {
    let code = indoc! {"
      var a = [1, 2, 3]
      a.push(4).reverse()
      a[1]
    "};

    assert_eq!(testing::eval(code), Value::Numeric(4.0));
  }
}
