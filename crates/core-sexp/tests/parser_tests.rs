//! Integration tests for the canonical S-expression parser

use core_sexp::{
    parse, parse_with, Cursor, Expression, ParseError, ParseLimits, Parser, RangeKind,
};

// =============================================================================
// WELL-FORMED INPUT
// =============================================================================

#[test]
fn test_certificate_shape() {
    let expr = parse(b"(11:certificate(6:issuer3:bob)(7:subject5:alice))").unwrap();

    assert_eq!(expr.tag(), Some(&b"certificate"[..]));
    let parts = expr.parts().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].tag(), Some(&b"issuer"[..]));
    assert_eq!(parts[0].parts().unwrap()[0].as_atom(), Some(&b"bob"[..]));
    assert_eq!(parts[1].tag(), Some(&b"subject"[..]));
}

#[test]
fn test_atoms_are_opaque_bytes() {
    let expr = parse(b"(4:blob4:(1:))").unwrap();
    assert_eq!(
        expr,
        Expression::list("blob", vec![Expression::atom(&b"(1:)"[..])])
    );

    let binary = parse(b"3:\x00\xff)").unwrap();
    assert_eq!(binary.as_atom(), Some(&b"\x00\xff)"[..]));
}

#[test]
fn test_all_range_kinds_parse() {
    let cases: [(&[u8], RangeKind); 6] = [
        (b"(1:*5:range7:numeric2:ge1:0)", RangeKind::Numeric),
        (b"(1:*5:range5:alpha2:lt3:zzz)", RangeKind::Alpha),
        (b"(1:*5:range4:date2:le20:2030-01-01T00:00:00Z)", RangeKind::Date),
        (b"(1:*5:range4:time2:gt8:23:59:59)", RangeKind::Time),
        (b"(1:*5:range4:ipv42:ge7:0.0.0.0)", RangeKind::Ipv4),
        (b"(1:*5:range4:ipv62:ge2:::)", RangeKind::Ipv6),
    ];
    for (input, kind) in cases {
        let Expression::Range(range) = parse(input).unwrap() else {
            panic!("expected range for {:?}", kind);
        };
        assert_eq!(range.kind(), kind);
    }
}

#[test]
fn test_canonical_reencoding_is_byte_exact() {
    let inputs: [&[u8]; 5] = [
        b"(11:certificate(6:issuer3:bob)(7:subject5:alice))",
        b"(5:fruit(1:*3:set5:apple6:orange5:lemon))",
        b"(5:level(1:*5:range7:numeric2:ge3:1002:le4:1000))",
        b"(4:path(1:*6:prefix6:/home/)(1:*6:suffix4:.txt))",
        b"(3:any(1:*))",
    ];
    for input in inputs {
        assert_eq!(parse(input).unwrap().to_canonical(), input);
    }
}

#[test]
fn test_list_body_entry_point() {
    let limits = ParseLimits::default();
    let mut cursor = Cursor::at(&b"(6:issuer3:bob)"[..], 1).unwrap();
    let mut parser = Parser::new(&limits);

    let expr = parser.parse_list_body(&mut cursor).unwrap();
    assert_eq!(expr, Expression::list("issuer", vec![Expression::atom("bob")]));
    assert_eq!(parser.depth(), 0);
}

// =============================================================================
// MALFORMED INPUT
// =============================================================================

#[test]
fn test_truncated_atom() {
    assert_eq!(
        parse(b"(6:issuer3:bo"),
        Err(ParseError::Truncated {
            offset: 11,
            needed: 3,
            remaining: 2
        })
    );
}

#[test]
fn test_missing_length() {
    assert!(matches!(
        parse(b"(:abc)"),
        Err(ParseError::MalformedLength { offset: 1, .. })
    ));
    assert!(matches!(
        parse(b"abc"),
        Err(ParseError::MalformedLength { offset: 0, .. })
    ));
}

#[test]
fn test_zero_length_atom_policy() {
    assert!(matches!(
        parse(b"(1:a0:)"),
        Err(ParseError::MalformedLength { .. })
    ));
    let limits = ParseLimits::default().allowing_empty_atoms();
    assert_eq!(
        parse_with(b"(1:a0:)", &limits).unwrap(),
        Expression::list("a", vec![Expression::atom("")])
    );
}

#[test]
fn test_atom_length_limit() {
    let limits = ParseLimits {
        max_atom_length: 4,
        ..ParseLimits::default()
    };
    assert_eq!(
        parse_with(b"5:hello", &limits),
        Err(ParseError::AtomTooLong { max: 4, length: 5 })
    );
    assert!(parse_with(b"4:hell", &limits).is_ok());
}

#[test]
fn test_oversized_declared_length_is_truncation() {
    assert_eq!(
        parse(b"(1:a70000:x)"),
        Err(ParseError::Truncated {
            offset: 10,
            needed: 70000,
            remaining: 2
        })
    );
}

#[test]
fn test_huge_declared_length_does_not_allocate() {
    assert!(matches!(
        parse(b"99999999999999999999:x"),
        Err(ParseError::MalformedLength { .. }) | Err(ParseError::Truncated { .. })
    ));
}

#[test]
fn test_star_form_errors() {
    assert_eq!(
        parse(b"(1:*4:glob1:x)"),
        Err(ParseError::UnknownStarForm("glob".into()))
    );
    assert_eq!(
        parse(b"(1:*5:range5:color2:ge3:red)"),
        Err(ParseError::UnknownRangeKind("color".into()))
    );
    assert_eq!(
        parse(b"(1:*5:range7:numeric2:ne1:1)"),
        Err(ParseError::InvalidComparator("ne".into()))
    );
    assert!(matches!(
        parse(b"(1:*5:range4:ipv42:ge3:::1)"),
        Err(ParseError::WrongIpVersion { expected: "ipv4", .. })
    ));
    assert!(matches!(
        parse(b"(1:*5:range4:time2:ge5:noon!)"),
        Err(ParseError::TypeMismatch { kind: "time", .. })
    ));
}

#[test]
fn test_error_messages_carry_offsets() {
    let err = parse(b"(1:a(1:b").unwrap_err();
    assert!(err.to_string().contains('4'), "{}", err);
}
