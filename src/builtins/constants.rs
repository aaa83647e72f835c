use std::rc::Rc;

use crate::runtime::{Scope, Value};

pub(super) fn install(scope: &Rc<Scope>) {
  scope.install_constant("null", Value::Null);
  scope.install_constant("pi", Value::Numeric(std::f64::consts::PI));
}
