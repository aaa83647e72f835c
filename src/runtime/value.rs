use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::Statement;
use crate::errors::LangError;
use super::Scope;

/// Signature shared by every native callable, including methods bound to
/// an array or string receiver.
pub type NativeFn = Rc<dyn Fn(&[Value], &Rc<Scope>) -> Result<Value, LangError>>;

/// The runtime value domain. Arrays and objects alias by reference;
/// everything else copies. `Break` and `Return` exist only transiently
/// while control flow unwinds and are never observable by user code.
#[derive(Clone)]
pub enum Value {
  Numeric(f64),
  Boolean(bool),
  String(String),
  Null,
  Array(Rc<RefCell<Vec<Value>>>),
  Object(Rc<RefCell<Properties>>),
  Function(Rc<FunctionValue>),
  NativeFunction(NativeFunction),
  Break,
  Return(Box<Value>),
}

/// A user function: its body is shared with the AST and the captured
/// scope is the one active when the declaration was evaluated.
pub struct FunctionValue {
  pub name: String,
  pub parameters: Vec<String>,
  pub body: Rc<Vec<Statement>>,
  pub scope: Rc<Scope>,
}

impl fmt::Debug for FunctionValue {
  fn fmt(&self, writer: &mut fmt::Formatter) -> fmt::Result {
    write!(writer, "FunctionValue({})", self.name)
  }
}

#[derive(Clone)]
pub struct NativeFunction {
  pub name: &'static str,
  pub function: NativeFn,
}

impl NativeFunction {
  pub fn new<F>(name: &'static str, function: F) -> Self
  where
    F: Fn(&[Value], &Rc<Scope>) -> Result<Value, LangError> + 'static,
  {
    NativeFunction {
      name,
      function: Rc::new(function),
    }
  }
}

/// Insertion-order-preserving string-to-value map backing object values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
  entries: Vec<(String, Value)>,
}

impl Properties {
  pub fn new() -> Self {
    Properties { entries: vec![] }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self
      .entries
      .iter()
      .find(|(name, _)| name == key)
      .map(|(_, value)| value)
  }

  /// Replaces an existing entry in place or appends a new one, keeping
  /// first-insertion order.
  pub fn insert(&mut self, key: String, value: Value) {
    match self.entries.iter_mut().find(|(name, _)| *name == key) {
      | Some(entry) => entry.1 = value,
      | None => self.entries.push((key, value)),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Value {
  pub fn array(elements: Vec<Value>) -> Value {
    Value::Array(Rc::new(RefCell::new(elements)))
  }

  pub fn object(properties: Properties) -> Value {
    Value::Object(Rc::new(RefCell::new(properties)))
  }

  /// Lowercased tag reported by the `type` built-in.
  pub fn type_name(&self) -> &'static str {
    match self {
      | Value::Numeric(..) => "numeric",
      | Value::Boolean(..) => "boolean",
      | Value::String(..) => "string",
      | Value::Null => "null",
      | Value::Array(..) => "array",
      | Value::Object(..) => "object",
      | Value::Function(..) => "function",
      | Value::NativeFunction(..) => "native_function",
      | Value::Break => "break",
      | Value::Return(..) => "return",
    }
  }

  /// Boolean coercion applied by conditions and logical operators.
  pub fn truthy(&self) -> bool {
    match self {
      | Value::Null => false,
      | Value::Boolean(value) => *value,
      | Value::Numeric(value) => *value != 0.0,
      | Value::String(value) => !value.is_empty(),
      | _ => true,
    }
  }

  /// Structural equality for primitives, identity for containers and
  /// functions. Backs `indexOf` and `contains`.
  pub fn same_as(&self, other: &Value) -> bool {
    match (self, other) {
      | (Value::Numeric(left), Value::Numeric(right)) => left == right,
      | (Value::Boolean(left), Value::Boolean(right)) => left == right,
      | (Value::String(left), Value::String(right)) => left == right,
      | (Value::Null, Value::Null) => true,
      | (Value::Array(left), Value::Array(right)) => Rc::ptr_eq(left, right),
      | (Value::Object(left), Value::Object(right)) => Rc::ptr_eq(left, right),
      | (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
      | (Value::NativeFunction(left), Value::NativeFunction(right)) => {
        Rc::ptr_eq(&left.function, &right.function)
      },
      | (Value::Break, Value::Break) => true,
      | (Value::Return(left), Value::Return(right)) => left.same_as(right),
      | _ => false,
    }
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    self.same_as(other)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, writer: &mut fmt::Formatter) -> fmt::Result {
    match self {
      | Value::Numeric(value) => write!(writer, "Numeric({value})"),
      | Value::Boolean(value) => write!(writer, "Boolean({value})"),
      | Value::String(value) => write!(writer, "String({value:?})"),
      | Value::Null => write!(writer, "Null"),
      | Value::Array(elements) => writer.debug_tuple("Array").field(&elements.borrow()).finish(),
      | Value::Object(properties) => {
        writer
          .debug_tuple("Object")
          .field(&properties.borrow())
          .finish()
      },
      | Value::Function(function) => write!(writer, "Function({})", function.name),
      | Value::NativeFunction(function) => write!(writer, "NativeFunction({})", function.name),
      | Value::Break => write!(writer, "Break"),
      | Value::Return(value) => write!(writer, "Return({value:?})"),
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, writer: &mut fmt::Formatter) -> fmt::Result {
    match self {
      | Value::Numeric(value) => write!(writer, "{}", format_numeric(*value)),
      | Value::Boolean(value) => write!(writer, "{value}"),
      | Value::String(value) => write!(writer, "{value}"),
      | Value::Null => write!(writer, "null"),
      | Value::Array(elements) => {
        let parts = elements
          .borrow()
          .iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>();

        write!(writer, "[{}]", parts.join(", "))
      },
      | Value::Object(properties) => write_object(writer, &properties.borrow(), 0),
      | Value::Function(function) => write!(writer, "<function {}>", function.name),
      | Value::NativeFunction(function) => write!(writer, "<native function {}>", function.name),
      | Value::Break => write!(writer, "break"),
      | Value::Return(value) => write!(writer, "{value}"),
    }
  }
}

/// Objects print one property per line with nested indentation; strings
/// inside them are quoted. Printing is depth-bounded only by recursion.
fn write_object(writer: &mut fmt::Formatter, properties: &Properties, depth: usize) -> fmt::Result {
  if properties.is_empty() {
    return write!(writer, "{{}}");
  }

  let indent = "    ".repeat(depth);

  writeln!(writer, "{{")?;

  let mut first = true;

  for (key, value) in properties.iter() {
    if !first {
      writeln!(writer, ",")?;
    }

    write!(writer, "{indent}    {key}: ")?;

    match value {
      | Value::Object(inner) => write_object(writer, &inner.borrow(), depth + 1)?,
      | Value::String(text) => write!(writer, "\"{text}\"")?,
      | value => write!(writer, "{value}")?,
    }

    first = false;
  }

  write!(writer, "\n{indent}}}")
}

/// Integral values print without a decimal point, everything else in the
/// shortest float form.
pub fn format_numeric(value: f64) -> String {
  if value == value.trunc() && value.is_finite() && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}
