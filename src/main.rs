use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jackc::compile::compile_all;

#[derive(Debug, Parser)]
#[clap(name = "jackc", version)]
struct App {
  /// Jack source files, or directories containing `.jack` files.
  #[arg(required = true)]
  paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
  let app = App::parse();

  let results = match compile_all(&app.paths) {
    Ok(results) => results,
    Err(e) => {
      eprintln!("{e}");
      return ExitCode::FAILURE;
    }
  };

  let mut failed = false;
  for result in &results {
    match &result.outcome {
      Ok(out) => println!("{} -> {}", result.path.display(), out.display()),
      Err(report) => {
        eprintln!("{report}");
        failed = true;
      }
    }
  }

  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
