use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XWordError {
  /// The template is malformed: ragged rows, unknown characters, or no cells.
  Template(String),
  /// The word list could not be used.
  Dictionary(String),
  /// A broken invariant in slot construction or candidate filtering. Never
  /// caused by user input.
  Internal(String),
}

impl XWordError {
  pub fn is_template(&self) -> bool {
    matches!(self, XWordError::Template(_))
  }

  pub fn is_internal(&self) -> bool {
    matches!(self, XWordError::Internal(_))
  }
}

impl Display for XWordError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      XWordError::Template(msg) => write!(f, "Template error: {msg}"),
      XWordError::Dictionary(msg) => write!(f, "Dictionary error: {msg}"),
      XWordError::Internal(msg) => write!(f, "Internal error: {msg}"),
    }
  }
}

impl Error for XWordError {}

pub type XWordResult<T = ()> = Result<T, Box<dyn Error>>;

/// Returns the `XWordError` carried by `err`, if it is one.
pub fn as_xword_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a XWordError> {
  err.downcast_ref::<XWordError>()
}
