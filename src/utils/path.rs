use std::path::{Path, PathBuf};

use crate::loader::{EXTENSION, EXTENSION_SHORT};

/// Turns an import path into a file path: appends the default `.gloob`
/// extension when the path carries neither known extension, then resolves
/// relative paths against `base_dir`. Absolute paths are used as-is.
pub fn resolve_import(path: &str, base_dir: &Path) -> PathBuf {
  let has_extension =
    path.ends_with(&format!(".{EXTENSION}")) || path.ends_with(&format!(".{EXTENSION_SHORT}"));

  let file_path = if has_extension {
    PathBuf::from(path)
  } else {
    PathBuf::from(format!("{path}.{EXTENSION}"))
  };

  if file_path.is_absolute() {
    file_path
  } else {
    base_dir.join(file_path)
  }
}
