//! Fuzz target for the matcher
//!
//! Arbitrary rule/query pairs must never panic, and any tree that parses
//! must be satisfied by itself.

#![no_main]

use arbitrary::Arbitrary;
use core_sexp::{matches, parse};
use libfuzzer_sys::fuzz_target;

/// Structured input for matching
#[derive(Arbitrary, Debug)]
struct MatchInput {
    rule: Vec<u8>,
    query: Vec<u8>,
}

fuzz_target!(|input: MatchInput| {
    let (Ok(rule), Ok(query)) = (parse(&input.rule), parse(&input.query)) else {
        return;
    };

    let _ = matches(&query, &rule);
    assert_eq!(matches(&rule, &rule), Ok(true));
});
