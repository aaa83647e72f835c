use crate::errors::{InterpreterError, LangError, Wrappable};
use crate::runtime::{NativeFunction, Value};

/// Looks up a string method by name, producing a native callable bound to
/// a copy of the receiver. Strings are immutable: every method returns a
/// fresh value.
pub fn method(text: &str, name: &str) -> Option<NativeFunction> {
  match name {
    | "len" => Some(len(text)),
    | "upper" => Some(upper(text)),
    | "lower" => Some(lower(text)),
    | "trim" => Some(trim(text)),
    | "contains" => Some(contains(text)),
    | "split" => Some(split(text)),
    | "replace" => Some(replace(text)),
    | "indexOf" => Some(index_of(text)),
    | _ => None,
  }
}

fn argument_error(name: &'static str, message: impl Into<String>) -> LangError {
  InterpreterError::Builtin {
    name,
    message: message.into(),
  }
  .wrap()
}

/// Byte length, like indexing.
fn len(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("len", move |_, _| Ok(Value::Numeric(text.len() as f64)))
}

fn upper(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("upper", move |_, _| {
    Ok(Value::String(text.to_uppercase()))
  })
}

fn lower(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("lower", move |_, _| {
    Ok(Value::String(text.to_lowercase()))
  })
}

fn trim(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("trim", move |_, _| {
    Ok(Value::String(text.trim().to_string()))
  })
}

fn contains(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("contains", move |arguments, _| {
    let [Value::String(needle)] = arguments else {
      return Err(argument_error("contains", "expected a string argument"));
    };

    Ok(Value::Boolean(text.contains(needle.as_str())))
  })
}

/// Splits on a separator into an array of strings. An empty separator
/// splits into single bytes.
fn split(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("split", move |arguments, _| {
    let [Value::String(separator)] = arguments else {
      return Err(argument_error("split", "expected a string separator"));
    };

    let parts = if separator.is_empty() {
      text
        .as_bytes()
        .iter()
        .map(|byte| Value::String(String::from_utf8_lossy(&[*byte]).to_string()))
        .collect::<Vec<_>>()
    } else {
      text
        .split(separator.as_str())
        .map(|part| Value::String(part.to_string()))
        .collect::<Vec<_>>()
    };

    Ok(Value::array(parts))
  })
}

/// Replaces all occurrences of a substring.
fn replace(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("replace", move |arguments, _| {
    let [Value::String(old), Value::String(new)] = arguments else {
      return Err(argument_error("replace", "expected two string arguments"));
    };

    Ok(Value::String(text.replace(old.as_str(), new)))
  })
}

/// 1-based byte position of the first occurrence, or 0 when absent.
fn index_of(text: &str) -> NativeFunction {
  let text = text.to_string();

  NativeFunction::new("indexOf", move |arguments, _| {
    let [Value::String(needle)] = arguments else {
      return Err(argument_error("indexOf", "expected a string argument"));
    };

    Ok(Value::Numeric(match text.find(needle.as_str()) {
      | Some(position) => (position + 1) as f64,
      | None => 0.0,
    }))
  })
}
