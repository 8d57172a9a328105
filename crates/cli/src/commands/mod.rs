pub mod authorize;
pub mod encode;
pub mod parse;
pub mod suite;

use anyhow::Context;
use core_sexp::{parse_with, Expression, ParseLimits};

/// Parse a command-line argument as canonical bytes
pub fn parse_arg(label: &str, text: &str, limits: &ParseLimits) -> anyhow::Result<Expression> {
    parse_with(text.as_bytes(), limits).with_context(|| format!("Invalid {}: {:?}", label, text))
}
