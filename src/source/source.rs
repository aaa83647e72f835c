use std::sync::Arc;

/// Span element `(start, end)` in byte offsets.
pub type Span = (u32, u32);

/// Source code container to avoid large files duplication: tokens, the
/// parser and error reports all share the same allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceCode(Arc<SourceContainer>);

/// Internal source code container, used for ergonomics.
#[derive(Clone, Debug, PartialEq)]
struct SourceContainer {
  /// File path or 'inline'.
  name: String,
  /// Source code.
  code: String,
}

impl SourceCode {
  /// Creates a [SourceCode] instance wrapping a string.
  pub fn from_string(code: String, name: &str) -> Self {
    SourceCode(Arc::new(SourceContainer {
      name: name.to_string(),
      code,
    }))
  }

  /// Creates a [SourceCode] instance *cloning* a string slice.
  #[allow(clippy::should_implement_trait)]
  pub fn from_str(code: &str) -> Self {
    Self::from_string(code.to_string(), "inline")
  }

  /// Returns the file path this source was read from, or 'inline'.
  pub fn file_name(&self) -> &str {
    &self.0.name
  }

  pub fn len(&self) -> usize {
    self.0.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.code.is_empty()
  }

  pub fn as_bytes(&self) -> &[u8] {
    self.0.code.as_bytes()
  }

  pub fn as_str(&self) -> &str {
    self.0.code.as_str()
  }
}
