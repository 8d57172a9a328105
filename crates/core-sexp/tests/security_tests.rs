//! Security tests for the parser and matcher (anti stack overflow, anti DoS)
//!
//! These tests run on any platform without libfuzzer. They cover the same
//! attack vectors as the fuzz targets:
//! - Deep nesting of lists and star forms
//! - Oversized inputs and declared lengths
//! - Unbalanced brackets at every position

use core_sexp::{
    matches_with, parse, parse_with, Expression, MatchError, ParseError, ParseLimits,
    DEFAULT_MAX_DEPTH, MAX_NESTING_DEPTH,
};

fn nested_lists(depth: usize) -> Vec<u8> {
    let mut input = "(1:a".repeat(depth);
    input.push_str(&")".repeat(depth));
    input.into_bytes()
}

fn nested_sets(depth: usize) -> Vec<u8> {
    let mut input = "(1:*3:set".repeat(depth);
    input.push_str(&")".repeat(depth));
    input.into_bytes()
}

#[test]
fn test_deep_nesting_no_crash() {
    for depth in [1, 10, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DEPTH + 1, 10_000] {
        let result = parse(&nested_lists(depth));
        if depth <= DEFAULT_MAX_DEPTH {
            assert!(result.is_ok(), "depth {} should parse", depth);
        } else {
            assert_eq!(
                result,
                Err(ParseError::DepthExceeded {
                    max: DEFAULT_MAX_DEPTH
                })
            );
        }
    }
}

#[test]
fn test_deep_star_forms_bounded() {
    assert!(parse(&nested_sets(DEFAULT_MAX_DEPTH)).is_ok());
    assert_eq!(
        parse(&nested_sets(100_000)),
        Err(ParseError::DepthExceeded {
            max: DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_configured_depth_ceiling() {
    let limits = ParseLimits::default().with_max_depth(MAX_NESTING_DEPTH);
    assert!(parse_with(&nested_lists(MAX_NESTING_DEPTH), &limits).is_ok());

    let too_deep = ParseLimits::default().with_max_depth(MAX_NESTING_DEPTH + 1);
    assert!(matches!(
        parse_with(b"1:a", &too_deep),
        Err(ParseError::InvalidLimits(_))
    ));
}

#[test]
fn test_matcher_depth_bounded_for_built_trees() {
    // builders bypass the parser, so the matcher must bound itself
    let mut tree = Expression::atom("leaf");
    for _ in 0..1_000 {
        tree = Expression::list("a", vec![tree]);
    }
    assert_eq!(
        matches_with(&tree, &tree, DEFAULT_MAX_DEPTH),
        Err(MatchError::DepthExceeded {
            max: DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_oversized_input_rejected_before_parsing() {
    let limits = ParseLimits::default().with_max_input_length(1024);
    let input = vec![b'('; 2048];
    assert_eq!(
        parse_with(&input, &limits),
        Err(ParseError::InputTooLong {
            max: 1024,
            length: 2048
        })
    );
}

#[test]
fn test_declared_length_larger_than_buffer() {
    for input in [&b"4294967295:x"[..], b"(1:a65536:x)", b"(1:a18446744073709551615:)"] {
        assert!(parse(input).is_err(), "{:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn test_every_truncation_is_an_error() {
    let input = b"(11:certificate(6:issuer3:bob)(5:level(1:*5:range7:numeric2:ge3:100)))";
    for end in 0..input.len() {
        assert!(parse(&input[..end]).is_err(), "prefix of length {}", end);
    }
    assert!(parse(input).is_ok());
}

#[test]
fn test_stray_closing_bracket() {
    assert!(matches!(
        parse(b")"),
        Err(ParseError::MalformedLength { .. })
    ));
    assert_eq!(
        parse(b"(1:a))"),
        Err(ParseError::TrailingBytes { offset: 5 })
    );
}
