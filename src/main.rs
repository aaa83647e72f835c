use clap::Parser;

use gloob::cli;

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Cli {
  /// File to run.
  #[clap(name = "file")]
  file: Option<String>,
}

fn main() {
  let options = Cli::parse();

  if let Some(file) = options.file {
    if let Err(error) = cli::read(file.as_str()) {
      eprintln!("{error}");
      std::process::exit(1);
    }
  } else {
    cli::repl();
  }
}
