use std::io::{self, BufRead, Write};

use crate::runtime::{Runtime, Value};

/// Line-oriented REPL against a persistent global scope. A trailing `\`
/// continues the current input on the next line.
pub fn repl() {
  let mut runtime = Runtime::new();

  loop {
    // Read
    let line = match read_terminal_line() {
      | Ok(line) => line,
      | Err(()) => break,
    };

    if line.trim().is_empty() {
      continue;
    }

    // Eval
    let result = runtime.eval_source(&line, "repl");

    // Print
    match result {
      | Ok(value) => {
        if !matches!(value, Value::Null | Value::Break | Value::Return(..)) {
          println!("{value}");
        }
      },
      | Err(error) => eprintln!("{error}"),
    }
  }
}

fn read_terminal_line() -> Result<String, ()> {
  let stdin = io::stdin();
  let mut line = String::new();

  print!("> ");

  io::stdout().flush().ok();

  loop {
    let read = stdin.lock().read_line(&mut line).map_err(|_| ())?;

    // EOF.
    if read == 0 {
      return Err(());
    }

    let content = line.trim_end();

    if !content.ends_with('\\') {
      break;
    }

    line.truncate(content.len() - 1);
    line.push('\n');

    print!("| ");

    io::stdout().flush().ok();
  }

  Ok(line)
}
