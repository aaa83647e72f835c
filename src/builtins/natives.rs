use std::io;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::errors::{InterpreterError, LangError, Wrappable};
use crate::runtime::{format_numeric, NativeFunction, Scope, Value};

type Native = fn(&[Value], &Rc<Scope>) -> Result<Value, LangError>;

pub(super) fn install(scope: &Rc<Scope>) {
  // I/O.
  declare(scope, "print", print);
  declare(scope, "println", println);
  declare(scope, "input", input);

  // Conversions and introspection.
  declare(scope, "len", len);
  declare(scope, "number", number);
  declare(scope, "string", string);
  declare(scope, "bool", bool_from);
  declare(scope, "type", type_of);

  // Math.
  declare(scope, "abs", abs);
  declare(scope, "round", round);
  declare(scope, "max", max);
  declare(scope, "min", min);
  declare(scope, "random", random);
  declare(scope, "randInt", rand_int);

  // System.
  declare(scope, "sleep", sleep);
  declare(scope, "clear", clear);
}

fn declare(scope: &Rc<Scope>, name: &'static str, function: Native) {
  scope.install_constant(name, Value::NativeFunction(NativeFunction::new(name, function)));
}

fn argument_error(name: &'static str, message: impl Into<String>) -> LangError {
  InterpreterError::Builtin {
    name,
    message: message.into(),
  }
  .wrap()
}

fn join_arguments(arguments: &[Value]) -> String {
  arguments
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" ")
}

/// Prints the space-separated arguments without a trailing newline.
fn print(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  print!("{}", join_arguments(arguments));
  io::stdout().flush().ok();

  Ok(Value::Null)
}

/// Prints the space-separated arguments followed by a newline.
fn println(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  println!("{}", join_arguments(arguments));

  Ok(Value::Null)
}

/// Reads one line from stdin, trimming trailing whitespace. An optional
/// argument is printed first as the prompt.
fn input(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  if let Some(prompt) = arguments.first() {
    print!("{prompt}");
    io::stdout().flush().ok();
  }

  let mut line = String::new();

  io::stdin()
    .read_line(&mut line)
    .map_err(|error| argument_error("input", error.to_string()))?;

  Ok(Value::String(line.trim_end().to_string()))
}

fn len(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::String(text)] => Ok(Value::Numeric(text.len() as f64)),
    | [Value::Array(elements)] => Ok(Value::Numeric(elements.borrow().len() as f64)),
    | [value] => Err(argument_error(
      "len",
      format!("expected a string or array, got {}", value.type_name()),
    )),
    | _ => Err(argument_error(
      "len",
      format!("expected 1 argument, got {}", arguments.len()),
    )),
  }
}

fn number(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::String(text)] => {
      text
        .parse::<f64>()
        .map(Value::Numeric)
        .map_err(|_| argument_error("number", format!("cannot parse '{text}' as a number")))
    },
    | _ => Err(argument_error("number", "expected a string argument")),
  }
}

fn string(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(value)] => Ok(Value::String(format_numeric(*value))),
    | _ => Err(argument_error("string", "expected a numeric argument")),
  }
}

/// Boolean conversion compares the source string against "true".
fn bool_from(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::String(text)] => Ok(Value::Boolean(text == "true")),
    | _ => Err(argument_error("bool", "expected a string argument")),
  }
}

fn type_of(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [value] => Ok(Value::String(value.type_name().to_string())),
    | _ => Err(argument_error(
      "type",
      format!("expected 1 argument, got {}", arguments.len()),
    )),
  }
}

fn abs(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(value)] => Ok(Value::Numeric(value.abs())),
    | _ => Err(argument_error("abs", "expected a numeric argument")),
  }
}

fn round(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(value)] => Ok(Value::Numeric(value.round())),
    | _ => Err(argument_error("round", "expected a numeric argument")),
  }
}

fn max(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(left), Value::Numeric(right)] => Ok(Value::Numeric(left.max(*right))),
    | _ => Err(argument_error("max", "expected two numeric arguments")),
  }
}

fn min(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(left), Value::Numeric(right)] => Ok(Value::Numeric(left.min(*right))),
    | _ => Err(argument_error("min", "expected two numeric arguments")),
  }
}

/// Uniform float in `[0, 1)`.
fn random(_: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  Ok(Value::Numeric(rand::thread_rng().gen::<f64>()))
}

/// Uniform integer in `[low, high]`, defaulting to `[0, 100]` when called
/// without arguments.
fn rand_int(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  let (low, high) = match arguments {
    | [] => (0, 100),
    | [Value::Numeric(low), Value::Numeric(high)] => (*low as i64, *high as i64),
    | _ => return Err(argument_error("randInt", "expected two numeric bounds")),
  };

  if high < low {
    return Err(argument_error(
      "randInt",
      format!("empty range: {low} to {high}"),
    ));
  }

  Ok(Value::Numeric(rand::thread_rng().gen_range(low..=high) as f64))
}

fn sleep(arguments: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  match arguments {
    | [Value::Numeric(seconds)] if seconds.is_finite() => {
      thread::sleep(Duration::from_secs_f64(seconds.max(0.0)));
      Ok(Value::Null)
    },
    | _ => Err(argument_error("sleep", "expected a numeric duration in seconds")),
  }
}

/// Emits the ANSI clear-screen sequence.
fn clear(_: &[Value], _: &Rc<Scope>) -> Result<Value, LangError> {
  print!("\x1b[2J");
  io::stdout().flush().ok();

  Ok(Value::Null)
}

#[cfg(test)]
mod tests {
  use crate::runtime::testing;
  use crate::runtime::Value;

  #[test]
  fn test_len() {
    assert_eq!(testing::eval("len('hello')"), Value::Numeric(5.0));
    assert_eq!(testing::eval("len([1, 2, 3])"), Value::Numeric(3.0));
    assert_eq!(testing::eval("len('')"), Value::Numeric(0.0));
    assert!(testing::try_eval("len(1)").is_err());
  }

  #[test]
  fn test_number() {
    assert_eq!(testing::eval("number('42')"), Value::Numeric(42.0));
    assert_eq!(testing::eval("number('3.14')"), Value::Numeric(3.14));
    assert!(testing::try_eval("number('nope')").is_err());
  }

  #[test]
  fn test_string() {
    assert_eq!(testing::eval("string(42)"), Value::String("42".to_string()));
    assert_eq!(testing::eval("string(3.14)"), Value::String("3.14".to_string()));
  }

  #[test]
  fn test_bool() {
    assert_eq!(testing::eval("bool('true')"), Value::Boolean(true));
    assert_eq!(testing::eval("bool('false')"), Value::Boolean(false));
    assert_eq!(testing::eval("bool('yes')"), Value::Boolean(false));
  }

  #[test]
  fn test_type() {
    assert_eq!(testing::eval("type(1)"), Value::String("numeric".to_string()));
    assert_eq!(testing::eval("type('x')"), Value::String("string".to_string()));
    assert_eq!(testing::eval("type(yes)"), Value::String("boolean".to_string()));
    assert_eq!(testing::eval("type(null)"), Value::String("null".to_string()));
    assert_eq!(testing::eval("type([])"), Value::String("array".to_string()));
    assert_eq!(testing::eval("type({})"), Value::String("object".to_string()));
    assert_eq!(
      testing::eval("fun f() { }\ntype(f)"),
      Value::String("function".to_string())
    );
    assert_eq!(
      testing::eval("type(print)"),
      Value::String("native_function".to_string())
    );
  }

  #[test]
  fn test_math() {
    assert_eq!(testing::eval("abs(-3)"), Value::Numeric(3.0));
    assert_eq!(testing::eval("round(2.5)"), Value::Numeric(3.0));
    assert_eq!(testing::eval("max(1, 2)"), Value::Numeric(2.0));
    assert_eq!(testing::eval("min(1, 2)"), Value::Numeric(1.0));
  }

  #[test]
  fn test_random_range() {
    for _ in 0..16 {
      let value = testing::eval("random()");

      match value {
        | Value::Numeric(sample) => assert!((0.0..1.0).contains(&sample)),
        | value => panic!("unexpected value: {value:?}"),
      }
    }
  }

  #[test]
  fn test_rand_int_is_inclusive() {
    for _ in 0..16 {
      let value = testing::eval("randInt(1, 2)");

      match value {
        | Value::Numeric(sample) => assert!(sample == 1.0 || sample == 2.0),
        | value => panic!("unexpected value: {value:?}"),
      }
    }
  }

  #[test]
  fn test_print_returns_null() {
    assert_eq!(testing::eval("println('covered elsewhere')"), Value::Null);
  }
}
