//! Fuzz target for the canonical S-expression parser
//!
//! Parsing, re-encoding and printing must never panic.

#![no_main]

use core_sexp::{parse_with, ParseLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = ParseLimits::default().allowing_empty_atoms();

    if let Ok(expr) = parse_with(data, &limits) {
        let encoded = expr.to_canonical();
        let _ = parse_with(&encoded, &limits);

        let _ = core_sexp::print::pretty(&expr);
    }
});
