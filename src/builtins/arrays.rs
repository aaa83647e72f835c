use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::{InterpreterError, LangError, Wrappable};
use crate::runtime::{NativeFunction, Value};

type Elements = Rc<RefCell<Vec<Value>>>;

/// Looks up an array method by name, producing a native callable bound to
/// the array's shared storage; invoking it mutates the original array.
pub fn method(array: &Elements, name: &str) -> Option<NativeFunction> {
  match name {
    | "push" => Some(push(array)),
    | "pop" => Some(pop(array)),
    | "len" => Some(len(array)),
    | "remove" => Some(remove(array)),
    | "insert" => Some(insert(array)),
    | "indexOf" => Some(index_of(array)),
    | "contains" => Some(contains(array)),
    | "join" => Some(join(array)),
    | "reverse" => Some(reverse(array)),
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

/// Appends an element and returns the array for chaining.
fn push(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("push", move |arguments, _| {
    let [value] = arguments else {
      return Err(argument_error(
        "push",
        format!("expected 1 argument, got {}", arguments.len()),
      ));
    };

    array.borrow_mut().push(value.clone());

    Ok(Value::Array(Rc::clone(&array)))
  })
}

/// Removes and returns the last element.
fn pop(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("pop", move |_, _| {
    match array.borrow_mut().pop() {
      | Some(value) => Ok(value),
      | None => Err(argument_error("pop", "cannot pop from an empty array")),
    }
  })
}

fn len(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("len", move |_, _| {
    Ok(Value::Numeric(array.borrow().len() as f64))
  })
}

/// Removes the element at a 1-based index and returns the array.
fn remove(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("remove", move |arguments, _| {
    let [Value::Numeric(index)] = arguments else {
      return Err(argument_error("remove", "expected a numeric index"));
    };

    let index = *index as i64;
    let length = array.borrow().len();

    if index < 1 || index as usize > length {
      return Err(InterpreterError::ArrayIndexOutOfBounds { index, length }.wrap());
    }

    array.borrow_mut().remove(index as usize - 1);

    Ok(Value::Array(Rc::clone(&array)))
  })
}

/// Inserts a value at a 1-based index (up to one past the end) and
/// returns the array.
fn insert(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("insert", move |arguments, _| {
    let [Value::Numeric(index), value] = arguments else {
      return Err(argument_error("insert", "expected a numeric index and a value"));
    };

    let index = *index as i64;
    let length = array.borrow().len();

    if index < 1 || index as usize > length + 1 {
      return Err(InterpreterError::ArrayIndexOutOfBounds { index, length }.wrap());
    }

    array.borrow_mut().insert(index as usize - 1, value.clone());

    Ok(Value::Array(Rc::clone(&array)))
  })
}

/// 1-based index of the first equal element, or 0 when absent.
fn index_of(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("indexOf", move |arguments, _| {
    let [needle] = arguments else {
      return Err(argument_error(
        "indexOf",
        format!("expected 1 argument, got {}", arguments.len()),
      ));
    };

    let position = array
      .borrow()
      .iter()
      .position(|element| element.same_as(needle));

    Ok(Value::Numeric(match position {
      | Some(index) => (index + 1) as f64,
      | None => 0.0,
    }))
  })
}

fn contains(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("contains", move |arguments, _| {
    let [needle] = arguments else {
      return Err(argument_error(
        "contains",
        format!("expected 1 argument, got {}", arguments.len()),
      ));
    };

    let found = array.borrow().iter().any(|element| element.same_as(needle));

    Ok(Value::Boolean(found))
  })
}

/// Joins the display forms of the elements with a string separator.
fn join(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("join", move |arguments, _| {
    let [Value::String(separator)] = arguments else {
      return Err(argument_error("join", "expected a string separator"));
    };

    let joined = array
      .borrow()
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(separator);

    Ok(Value::String(joined))
  })
}

/// Reverses in place and returns the array.
fn reverse(array: &Elements) -> NativeFunction {
  let array = Rc::clone(array);

  NativeFunction::new("reverse", move |_, _| {
    array.borrow_mut().reverse();

    Ok(Value::Array(Rc::clone(&array)))
  })
}
