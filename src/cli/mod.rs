pub use read::*;
pub use repl::*;

mod read;
mod repl;
