pub mod arrays;
pub mod strings;

mod constants;
mod natives;

use std::rc::Rc;

use crate::runtime::Scope;

/// Installs the built-in constants and native functions into a scope,
/// typically a fresh global one.
pub fn install(scope: &Rc<Scope>) {
  constants::install(scope);
  natives::install(scope);
}
