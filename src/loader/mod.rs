use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::{Program, Statement};
use crate::errors::{LangError, LoaderError, Wrappable};
use crate::parser;
use crate::utils;

/// Preferred source file extension.
pub const EXTENSION: &str = "gloob";

/// Alternative short extension.
pub const EXTENSION_SHORT: &str = "gb";

/// Splices imported files into the statement stream of the root program,
/// recursively and in place, so the evaluator only ever sees one flat
/// statement list.
///
/// Visited canonical paths are tracked for the whole resolution pass and
/// never cleared, so reaching a file twice, from any branch of the import
/// graph, is reported as a circular import.
pub struct ImportResolver {
  visited: HashSet<PathBuf>,
}

impl ImportResolver {
  pub fn new() -> Self {
    ImportResolver {
      visited: HashSet::new(),
    }
  }

  /// Expands every top-level import of `program`, resolving relative
  /// paths against the directory of `base_path`. Imports nested inside
  /// function bodies are left alone.
  pub fn resolve(&mut self, program: Program, base_path: &Path) -> Result<Program, LangError> {
    let base_dir = match base_path.parent() {
      | Some(parent) => parent,
      | None => Path::new("."),
    };

    let statements = self.expand(program.statements, base_dir)?;

    Ok(Program { statements })
  }

  fn expand(
    &mut self,
    statements: Vec<Statement>,
    base_dir: &Path,
  ) -> Result<Vec<Statement>, LangError> {
    let mut result = vec![];

    for statement in statements {
      match statement {
        | Statement::Import { path, token } => {
          let file_path = utils::path::resolve_import(&path, base_dir);

          let canonical = fs::canonicalize(&file_path).map_err(|error| {
            LoaderError::Read {
              path: file_path.display().to_string(),
              message: error.to_string(),
            }
            .wrap()
          })?;

          if !self.visited.insert(canonical) {
            return Err(
              LoaderError::CircularImport {
                path,
                token: Some(token),
              }
              .wrap(),
            );
          }

          result.extend(self.load(&file_path)?);
        },
        | statement => result.push(statement),
      }
    }

    Ok(result)
  }

  fn load(&mut self, path: &Path) -> Result<Vec<Statement>, LangError> {
    let source = fs::read_to_string(path).map_err(|error| {
      LoaderError::Read {
        path: path.display().to_string(),
        message: error.to_string(),
      }
      .wrap()
    })?;

    let program = parser::parse(&source, &path.display().to_string())?;

    let base_dir = match path.parent() {
      | Some(parent) => parent,
      | None => Path::new("."),
    };

    self.expand(program.statements, base_dir)
  }
}

impl Default for ImportResolver {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::PathBuf;

  use super::*;
  use crate::errors::LangError;

  /// Temporary directory that cleans up after itself.
  struct Fixture {
    root: PathBuf,
  }

  impl Fixture {
    fn new(name: &str) -> Self {
      let root = std::env::temp_dir().join(format!("gloob-loader-{name}-{}", std::process::id()));
      fs::create_dir_all(&root).unwrap();

      Fixture { root }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
      let path = self.root.join(name);

      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
      }

      fs::write(&path, contents).unwrap();
      path
    }

    fn resolve(&self, root_file: &str) -> Result<Program, LangError> {
      let path = self.root.join(root_file);
      let source = fs::read_to_string(&path).unwrap();
      let program = parser::parse(&source, &path.display().to_string()).unwrap();

      ImportResolver::new().resolve(program, &path)
    }
  }

  impl Drop for Fixture {
    fn drop(&mut self) {
      fs::remove_dir_all(&self.root).ok();
    }
  }

  #[test]
  fn test_import_splices_statements_in_place() {
    let fixture = Fixture::new("splice");

    fixture.write("helpers.gloob", "var helper = 1\n");
    fixture.write("main.gloob", "var before = 0\nimport \"helpers\"\nvar after = 2\n");

    let program = fixture.resolve("main.gloob").unwrap();
    let names = program
      .statements
      .iter()
      .map(|statement| {
        match statement {
          | Statement::VariableDeclaration { name, .. } => name.clone(),
          | statement => panic!("unexpected statement: {statement:?}"),
        }
      })
      .collect::<Vec<_>>();

    assert_eq!(names, vec!["before", "helper", "after"]);
  }

  #[test]
  fn test_nested_imports_resolve_against_their_own_file() {
    let fixture = Fixture::new("nested");

    fixture.write("lib/inner.gloob", "var inner = 1\n");
    fixture.write("lib/outer.gloob", "import \"inner\"\nvar outer = 2\n");
    fixture.write("main.gloob", "import \"lib/outer\"\n");

    let program = fixture.resolve("main.gloob").unwrap();
    assert_eq!(program.statements.len(), 2);
  }

  #[test]
  fn test_short_extension() {
    let fixture = Fixture::new("short");

    fixture.write("helpers.gb", "var helper = 1\n");
    fixture.write("main.gloob", "import \"helpers.gb\"\n");

    let program = fixture.resolve("main.gloob").unwrap();
    assert_eq!(program.statements.len(), 1);
  }

  #[test]
  fn test_circular_import() {
    let fixture = Fixture::new("cycle");

    fixture.write("a.gloob", "import \"b\"\n");
    fixture.write("b.gloob", "import \"a\"\n");

    let error = fixture.resolve("a.gloob").unwrap_err();

    match error {
      | LangError::Loader(LoaderError::CircularImport { .. }) => {},
      | error => panic!("expected a circular import error, got {error:?}"),
    }
  }

  #[test]
  fn test_diamond_import_is_reported_as_circular() {
    // Importing the same file from two disjoint branches trips the same
    // guard as a true cycle.
    let fixture = Fixture::new("diamond");

    fixture.write("shared.gloob", "var shared = 1\n");
    fixture.write("left.gloob", "import \"shared\"\n");
    fixture.write("right.gloob", "import \"shared\"\n");
    fixture.write("main.gloob", "import \"left\"\nimport \"right\"\n");

    let error = fixture.resolve("main.gloob").unwrap_err();

    match error {
      | LangError::Loader(LoaderError::CircularImport { path, .. }) => assert_eq!(path, "shared"),
      | error => panic!("expected a circular import error, got {error:?}"),
    }
  }

  #[test]
  fn test_missing_file() {
    let fixture = Fixture::new("missing");

    fixture.write("main.gloob", "import \"nowhere\"\n");

    let error = fixture.resolve("main.gloob").unwrap_err();

    match error {
      | LangError::Loader(LoaderError::Read { path, .. }) => {
        assert!(path.ends_with("nowhere.gloob"));
      },
      | error => panic!("expected a read error, got {error:?}"),
    }
  }

  #[test]
  fn test_imports_inside_functions_are_not_expanded() {
    let fixture = Fixture::new("inner-import");

    fixture.write("main.gloob", "fun load() { import \"nowhere\" }\n");

    let program = fixture.resolve("main.gloob").unwrap();
    assert_eq!(program.statements.len(), 1);
  }
}
