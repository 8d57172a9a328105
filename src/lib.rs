// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # sexp-authz
//!
//! Canonical S-expression parsing and SPKI-style authorization matching.
//!
//! This crate provides a unified API over the workspace:
//!
//! - **Expressions**: length-prefixed atoms, tagged lists, and star forms
//! - **Matching**: non-symmetric rule/query comparison with typed ranges
//! - **Utilities**: TOML settings and YAML match suites
//!
//! ## Quick Start
//!
//! ```rust
//! use sexp_authz::sexp::{authorize, parse, Decision};
//!
//! let rule = parse(b"(5:fruit(1:*3:set5:apple6:orange5:lemon))").unwrap();
//! let query = parse(b"(5:fruit5:apple)").unwrap();
//! assert_eq!(authorize(&query, &rule).unwrap(), Decision::Allow);
//! ```
//!
//! ## Architecture
//!
//! This facade crate re-exports the following modules:
//!
//! - [`sexp`] - Parser, matcher, builders and printer (from `core-sexp`)
//! - [`utils`] - Settings and match suites (from `app-utils`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Expression parsing and matching module.
///
/// Re-exports `core_sexp`.
pub mod sexp {
    pub use core_sexp::*;
}

/// Configuration and suite module.
///
/// Re-exports `app_utils`.
pub mod utils {
    pub use app_utils::*;
}

pub use core_sexp::{authorize, matches, parse, Decision, Expression, MatchError, ParseError};
