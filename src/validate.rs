//! Input guard run before a request is issued
//!
//! This is a UX check, not a security boundary: the only rule is a minimum
//! trimmed length. There is no ceiling and no content filtering.

use crate::error::ValidationError;
use tracing::debug;

/// Minimum number of characters (after trimming) the backend will accept.
pub const MIN_INPUT_CHARS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    min_chars: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self { min_chars: MIN_INPUT_CHARS }
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Returns the trimmed text, or the reason it was rejected.
    ///
    /// Length is counted in Unicode scalar values so "café" is four
    /// characters, not five bytes.
    pub fn validate<'a>(&self, raw: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual < self.min_chars {
            debug!(actual, min = self.min_chars, "input rejected");
            return Err(ValidationError::TooShort {
                min: self.min_chars,
                actual,
            });
        }
        Ok(trimmed)
    }
}
