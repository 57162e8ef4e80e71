//! Compilation driver: expands CLI path arguments into `.jack` files and
//! compiles each one independently, writing a sibling `.vm` file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A path that resolved to at least one `.jack` source file, or the
/// rendered diagnostic for a file that failed to compile.
pub struct FileResult {
  pub path: PathBuf,
  pub outcome: Result<PathBuf, String>,
}

/// Compiles every `.jack` file reachable from `inputs`, in order. A bare
/// directory is expanded to its immediate `*.jack` entries (non-recursive);
/// a single file is compiled as-is regardless of extension.
///
/// Compilation is fail-fast: the first file whose compile errors stops the
/// run, and its diagnostic is the last element of the returned vector.
pub fn compile_all(inputs: &[PathBuf]) -> Result<Vec<FileResult>> {
  let mut results = Vec::new();
  for input in inputs {
    for file in expand(input)? {
      let outcome = compile_file(&file);
      let failed = outcome.is_err();
      results.push(FileResult {
        path: file,
        outcome,
      });
      if failed {
        return Ok(results);
      }
    }
  }
  Ok(results)
}

fn expand(path: &Path) -> Result<Vec<PathBuf>> {
  if path.is_dir() {
    let mut files: Vec<PathBuf> = fs::read_dir(path)
      .map_err(|e| Error::io(path, e))?
      .filter_map(|entry| entry.ok())
      .map(|entry| entry.path())
      .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jack"))
      .collect();
    files.sort();
    Ok(files)
  } else {
    Ok(vec![path.to_path_buf()])
  }
}

fn compile_file(path: &Path) -> Result<PathBuf, String> {
  let src = fs::read_to_string(path).map_err(|e| Error::io(path, e).report("", &path.display().to_string()))?;
  let vm = crate::parser::compile(&src).map_err(|e| e.report(&src, &path.display().to_string()))?;
  let out_path = path.with_extension("vm");
  fs::write(&out_path, vm)
    .map_err(|e| Error::io(&out_path, e).report(&src, &path.display().to_string()))?;
  Ok(out_path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_temp(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("jackc_test_{name}_{}.jack", std::process::id()));
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
  }

  #[test]
  fn compiles_a_single_file_to_a_sibling_vm_file() {
    let src = "class Main {\n  function void main() {\n    return;\n  }\n}\n";
    let path = write_temp("single", src);
    let results = compile_all(std::slice::from_ref(&path)).unwrap();
    assert_eq!(results.len(), 1);
    let out = results[0].outcome.as_ref().unwrap();
    assert_eq!(fs::read_to_string(out).unwrap(), "function Main.main 0\npush constant 0\nreturn\n");
    fs::remove_file(&path).unwrap();
    fs::remove_file(out).unwrap();
  }

  #[test]
  fn stops_at_the_first_compile_error() {
    let src = "class Main {\n  function void main() {\n    let missing = 1;\n  }\n}\n";
    let path = write_temp("error", src);
    let results = compile_all(std::slice::from_ref(&path)).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].outcome.is_err());
    fs::remove_file(&path).unwrap();
  }
}
