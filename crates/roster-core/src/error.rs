//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("field `{field}` must not be blank")]
  BlankField { field: &'static str },

  #[error("field `{field}` is too long ({len} > {max} characters)")]
  FieldTooLong {
    field: &'static str,
    len:   usize,
    max:   usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Upper bound applied to short free-text columns (names, identifiers).
pub const MAX_SHORT_TEXT: usize = 255;

/// Reject empty or whitespace-only values and values longer than
/// [`MAX_SHORT_TEXT`].
pub fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::BlankField { field });
  }
  let len = value.chars().count();
  if len > MAX_SHORT_TEXT {
    return Err(Error::FieldTooLong { field, len, max: MAX_SHORT_TEXT });
  }
  Ok(())
}
