use crate::errors::LangError;
use super::{Runtime, Value};

/// Evaluates a source snippet through the full pipeline and returns the
/// value of its last statement, panicking on any error.
pub fn eval(source: &str) -> Value {
  match try_eval(source) {
    | Ok(value) => value,
    | Err(error) => panic!("failed to evaluate {source:?}: {error:?}"),
  }
}

pub fn try_eval(source: &str) -> Result<Value, LangError> {
  Runtime::new().eval_source(source, "test")
}
