use crate::errors::InterpreterError;
use super::Value;

/// Applies a binary operator to two evaluated operands. Logical operators
/// are combined by the evaluator and never reach this function.
pub fn binary(operator: &str, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
  if is_comparison(operator) {
    return compare(operator, left, right);
  }

  // String repetition: "ab" * 3. Counts truncate; negatives repeat zero
  // times.
  if let (Value::String(text), "*", Value::Numeric(count)) = (left, operator, right) {
    let count = (*count as i64).max(0) as usize;
    return Ok(Value::String(text.repeat(count)));
  }

  // With a string on either side, `+` concatenates using the display form
  // of the other operand; no other operator is defined.
  if matches!(left, Value::String(..)) || matches!(right, Value::String(..)) {
    if operator == "+" {
      return Ok(Value::String(format!("{left}{right}")));
    }

    return Err(invalid_operands(operator, left, right));
  }

  match (left, right) {
    | (Value::Numeric(left), Value::Numeric(right)) => arithmetic(operator, *left, *right),
    | _ => Err(invalid_operands(operator, left, right)),
  }
}

fn arithmetic(operator: &str, left: f64, right: f64) -> Result<Value, InterpreterError> {
  match operator {
    | "+" => Ok(Value::Numeric(left + right)),
    | "-" => Ok(Value::Numeric(left - right)),
    | "*" => Ok(Value::Numeric(left * right)),
    | "/" => {
      if right == 0.0 {
        Err(InterpreterError::DivisionByZero)
      } else {
        Ok(Value::Numeric(left / right))
      }
    },
    // Both sides truncate toward zero before taking the remainder.
    | "%" => {
      let divisor = right as i64;

      if divisor == 0 {
        Err(InterpreterError::DivisionByZero)
      } else {
        Ok(Value::Numeric(((left as i64) % divisor) as f64))
      }
    },
    | _ => {
      Err(InterpreterError::UnknownOperator {
        operator: operator.to_string(),
      })
    },
  }
}

fn is_comparison(operator: &str) -> bool {
  matches!(operator, "==" | "!=" | ">" | ">=" | "<" | "<=")
}

/// Comparison is defined for same-type primitive pairs. Any other pairing
/// is `false` under `==`, `true` under `!=`, and an error otherwise.
fn compare(operator: &str, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
  let result = match (left, right) {
    | (Value::Numeric(left), Value::Numeric(right)) => {
      match operator {
        | "==" => left == right,
        | "!=" => left != right,
        | ">" => left > right,
        | ">=" => left >= right,
        | "<" => left < right,
        | "<=" => left <= right,
        | _ => return Err(unknown_operator(operator)),
      }
    },
    | (Value::String(left), Value::String(right)) => {
      match operator {
        | "==" => left == right,
        | "!=" => left != right,
        | ">" => left > right,
        | ">=" => left >= right,
        | "<" => left < right,
        | "<=" => left <= right,
        | _ => return Err(unknown_operator(operator)),
      }
    },
    // Boolean ordering treats true as greater than false.
    | (Value::Boolean(left), Value::Boolean(right)) => {
      match operator {
        | "==" => left == right,
        | "!=" => left != right,
        | ">" => *left && !*right,
        | ">=" => *left || !*right,
        | "<" => !*left && *right,
        | "<=" => !*left || *right,
        | _ => return Err(unknown_operator(operator)),
      }
    },
    | (Value::Null, Value::Null) => {
      match operator {
        | "==" => true,
        | "!=" => false,
        | _ => return Err(invalid_operands(operator, left, right)),
      }
    },
    | _ => {
      match operator {
        | "==" => false,
        | "!=" => true,
        | _ => return Err(invalid_operands(operator, left, right)),
      }
    },
  };

  Ok(Value::Boolean(result))
}

fn invalid_operands(operator: &str, left: &Value, right: &Value) -> InterpreterError {
  InterpreterError::InvalidOperands {
    operator: operator.to_string(),
    left: left.type_name(),
    right: right.type_name(),
  }
}

fn unknown_operator(operator: &str) -> InterpreterError {
  InterpreterError::UnknownOperator {
    operator: operator.to_string(),
  }
}
