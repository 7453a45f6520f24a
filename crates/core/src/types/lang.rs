//! Language code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`LangCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LangCodeError {
    /// The input string is empty.
    #[error("language code cannot be empty")]
    Empty,
    /// The input is not a two-letter lowercase code.
    #[error("language code must be two lowercase ASCII letters, got {0:?}")]
    Invalid(String),
}

/// A two-letter ISO 639-1 language code (e.g. `en`, `de`).
///
/// Store descriptions are stored per language; resolution only considers the
/// rows for the request's active language.
///
/// ## Examples
///
/// ```
/// use storepoint_core::LangCode;
///
/// assert!(LangCode::parse("en").is_ok());
/// assert!(LangCode::parse("EN").is_err()); // uppercase
/// assert!(LangCode::parse("eng").is_err()); // too long
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LangCode(String);

impl LangCode {
    /// Parse a `LangCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly two lowercase
    /// ASCII letters.
    pub fn parse(s: &str) -> Result<Self, LangCodeError> {
        if s.is_empty() {
            return Err(LangCodeError::Empty);
        }

        if s.len() != 2 || !s.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(LangCodeError::Invalid(s.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the language code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
