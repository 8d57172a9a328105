// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-sexp
//!
//! Canonical S-expression reader and SPKI-style authorization matcher with
//! no dependencies on I/O, crypto, or network layers.
//!
//! This crate provides:
//! - Length-prefixed atom and list parsing with byte offsets in every error
//! - Star forms: `set`, `range` (numeric, alpha, date, time, ipv4, ipv6),
//!   `prefix`, `suffix`, and the `(1:*)` wildcard
//! - A rule/query matcher where the query must be at least as specific as the rule
//! - Canonical re-encoding, a pretty printer, and fluent builders
//!
//! ```
//! use core_sexp::{authorize, parse, Decision};
//!
//! let rule = parse(b"(11:certificate(6:issuer3:bob)(5:level(1:*5:range7:numeric2:ge3:100)))").unwrap();
//! let query = parse(b"(11:certificate(6:issuer3:bob)(5:level3:101))").unwrap();
//! assert_eq!(authorize(&query, &rule).unwrap(), Decision::Allow);
//! ```
//!
//! ## Security
//!
//! - Parser and matcher recursion bounded by [`ParseLimits::max_depth`]
//!   (default [`DEFAULT_MAX_DEPTH`], ceiling [`MAX_NESTING_DEPTH`])
//! - Input and atom sizes bounded by [`ParseLimits`]
//! - No `unsafe`; malformed input returns an error and never panics

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod atom;
pub mod authorizer;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod expr;
pub mod limits;
pub mod matcher;
pub mod parser;
pub mod print;
pub mod range;
pub mod starform;

pub use authorizer::{Authorizer, RuleAuthorizer};
pub use builder::{ListBuilder, RangeBuilder, SetBuilder};
pub use cursor::Cursor;
/// Re-export commonly used types
pub use error::{Error, MatchError, ParseError, Result};
pub use expr::{Expression, Set};
pub use limits::{
    ParseLimits, DEFAULT_MAX_ATOM_LENGTH, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LENGTH,
    MAX_NESTING_DEPTH,
};
pub use matcher::{
    authorize, authorize_bytes, authorize_bytes_with, matches, matches_with, Decision, Matcher,
};
pub use parser::{parse, parse_with, Parser};
pub use range::{Bound, Comparator, Range, RangeKind, Value};
pub use starform::{PREFIX, RANGE, SET, STAR_MARKER, SUFFIX};
