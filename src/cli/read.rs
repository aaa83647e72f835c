use crate::errors::LangError;
use crate::runtime::Runtime;

/// Runs a source file against a fresh runtime. The final value of the
/// program is discarded; only side effects and errors matter here.
pub fn read(path: &str) -> Result<(), LangError> {
  let mut runtime = Runtime::new();

  runtime.eval_file(path)?;

  Ok(())
}
