//! Error types for core-sexp
//!
//! Parsing and matching fail with separate enums. A parse error means the
//! input bytes are not a well-formed canonical expression; a match error
//! means either a negative authorization outcome (see
//! [`MatchError::is_denial`]) or malformed policy data.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for operations that may fail while parsing or matching
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while reading canonical S-expression bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input buffer is empty
    #[error("Empty input")]
    EmptyInput,

    /// Atom length prefix is missing, zero, overflowing, or not followed by ':'
    #[error("Malformed atom length at offset {offset}: {reason}")]
    MalformedLength {
        /// Byte offset of the length prefix
        offset: usize,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Atom declares more bytes than the buffer holds
    #[error("Truncated atom at offset {offset}: needs {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Byte offset of the payload
        offset: usize,
        /// Declared payload length
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Primitive read past the end of the buffer
    #[error("Read out of bounds at offset {offset}")]
    OutOfBounds {
        /// Offset that could not be read
        offset: usize,
    },

    /// Buffer ended before a list was closed
    #[error("Unbalanced brackets: list opened at offset {offset} is never closed")]
    UnbalancedBrackets {
        /// Offset of the unclosed '('
        offset: usize,
    },

    /// Star-form keyword is not one of set, range, prefix, suffix
    #[error("Unknown star form: {0}")]
    UnknownStarForm(String),

    /// Range kind is not one of numeric, alpha, date, time, ipv4, ipv6
    #[error("Unknown range kind: {0}")]
    UnknownRangeKind(String),

    /// Range comparator is not one of le, lt, ge, gt
    #[error("Invalid comparator: {0}")]
    InvalidComparator(String),

    /// Range bound literal does not parse as the declared kind
    #[error("Value {value:?} is not a valid {kind} literal")]
    TypeMismatch {
        /// Declared range kind
        kind: &'static str,
        /// Offending literal (lossy UTF-8)
        value: String,
    },

    /// Literal is an IP address of the other family
    #[error("Value {value:?} is an IP address but not {expected}")]
    WrongIpVersion {
        /// Declared family
        expected: &'static str,
        /// Offending literal
        value: String,
    },

    /// Two list members of a set share a tag
    #[error("Duplicate tag in set: {0}")]
    DuplicateTag(String),

    /// Two atom members of a set are identical
    #[error("Duplicate atom in set: {0}")]
    DuplicateAtom(String),

    /// Star form has more elements than its grammar allows
    #[error("Expected ')' at offset {offset}")]
    ExpectedListEnd {
        /// Offset where ')' was expected
        offset: usize,
    },

    /// Range built with no bound or more than two
    #[error("Range needs one or two bounds, got {0}")]
    BoundCount(usize),

    /// Bytes remain after the top-level expression
    #[error("Trailing bytes after expression at offset {offset}")]
    TrailingBytes {
        /// Offset of the first unconsumed byte
        offset: usize,
    },

    /// Nesting is deeper than the configured maximum (stack overflow prevention)
    #[error("Expression exceeds maximum nesting depth of {max}")]
    DepthExceeded {
        /// Maximum allowed depth
        max: usize,
    },

    /// Configured limits are unusable
    #[error("Invalid parse limits: {0}")]
    InvalidLimits(&'static str),

    /// Input is longer than the configured maximum (DoS prevention)
    #[error("Input exceeds maximum {max} bytes (length: {length})")]
    InputTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        length: usize,
    },

    /// Single atom payload is longer than the configured maximum (DoS prevention)
    #[error("Atom exceeds maximum {max} bytes (length: {length})")]
    AtomTooLong {
        /// Maximum allowed length
        max: usize,
        /// Declared length
        length: usize,
    },
}

/// Errors raised while comparing a query against a rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Rule demands structure the query lacks
    #[error("Rule more specific than query")]
    RuleMoreSpecific,

    /// Query value matches nothing in the rule set
    #[error("Item didn't match any in a set")]
    ItemNotInSet,

    /// Type pair has no comparison defined
    #[error("Unsupported comparison: rule {rule} against query {query}")]
    UnsupportedComparison {
        /// Rule node variant
        rule: &'static str,
        /// Query node variant
        query: &'static str,
    },

    /// Query list is shorter than the rule list
    #[error("Query list shorter than rule")]
    ShortQuerySequence,

    /// Query atom does not parse as the rule range's kind
    #[error("Query value {value:?} is not a valid {kind} value")]
    InvalidQueryValue {
        /// Rule range kind
        kind: &'static str,
        /// Offending query literal
        value: String,
    },

    /// Trees are nested deeper than the configured maximum
    #[error("Comparison exceeds maximum nesting depth of {max}")]
    DepthExceeded {
        /// Maximum allowed depth
        max: usize,
    },
}

impl MatchError {
    /// Whether this error is a negative authorization outcome rather than
    /// malformed input.
    ///
    /// Denials mean "the query is not authorized by the rule". The remaining
    /// variants mean the rule/query pair could not be compared at all.
    #[must_use]
    pub const fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::RuleMoreSpecific
                | Self::ItemNotInSet
                | Self::ShortQuerySequence
                | Self::InvalidQueryValue { .. }
        )
    }
}

/// Any failure from parsing or matching
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Parse failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Match failure
    #[error(transparent)]
    Match(#[from] MatchError),
}
