//! Resource limits applied while parsing and matching untrusted input.
//!
//! Rule and query bytes may be attacker-supplied, so every recursive walk is
//! bounded by [`ParseLimits::max_depth`] and every buffer by
//! [`ParseLimits::max_input_length`].

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Default maximum nesting depth of lists and star forms
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard ceiling for any configured depth
pub const MAX_NESTING_DEPTH: usize = 256;

/// Default maximum input length in bytes (1 MiB)
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1024 * 1024;

/// Default maximum single atom payload in bytes (64 KiB)
pub const DEFAULT_MAX_ATOM_LENGTH: usize = 64 * 1024;

/// Limits for a parse or match call
///
/// All fields default, so a partial TOML table such as
/// `max_depth = 16` is a complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseLimits {
    /// Maximum bracket nesting depth
    pub max_depth: usize,
    /// Maximum total input length in bytes
    pub max_input_length: usize,
    /// Maximum length of a single atom payload
    pub max_atom_length: usize,
    /// Accept `0:` atoms (rejected by default)
    pub allow_empty_atoms: bool,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            max_atom_length: DEFAULT_MAX_ATOM_LENGTH,
            allow_empty_atoms: false,
        }
    }
}

impl ParseLimits {
    /// Limits with a custom nesting depth
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Limits with a custom input length
    #[must_use]
    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    /// Limits that accept zero-length atoms
    #[must_use]
    pub fn allowing_empty_atoms(mut self) -> Self {
        self.allow_empty_atoms = true;
        self
    }

    /// Check that the limits themselves are usable
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidLimits` when `max_depth` is zero or above
    /// [`MAX_NESTING_DEPTH`].
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.max_depth == 0 {
            return Err(ParseError::InvalidLimits("max_depth must be positive"));
        }
        if self.max_depth > MAX_NESTING_DEPTH {
            return Err(ParseError::InvalidLimits(
                "max_depth exceeds the nesting ceiling",
            ));
        }
        Ok(())
    }
}
