//! # Canonical S-expression parser
//!
//! Recursive-descent reader over a [`Cursor`]:
//!
//! ```text
//! expr       ::= atom | list | star-form
//! atom       ::= digits ":" <digits-many raw bytes>
//! list       ::= "(" atom (star-form | list | atom)* ")"
//! star-form  ::= "(" "1:*" [keyword star-body] ")"
//! ```
//!
//! ## Security
//!
//! - Nesting depth is bounded by [`ParseLimits::max_depth`] (stack overflow prevention)
//! - Input length is bounded by [`ParseLimits::max_input_length`] (DoS prevention)
//! - Every read is bounds-checked; malformed input returns an error, never panics

use alloc::vec::Vec;

use crate::atom::read_atom;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::expr::Expression;
use crate::limits::ParseLimits;
use crate::starform::STAR_MARKER;

pub(crate) const LEFT_BRACKET: u8 = b'(';
pub(crate) const RIGHT_BRACKET: u8 = b')';

/// Parse a complete expression with default limits
///
/// # Example
///
/// ```
/// use core_sexp::{parse, Expression};
///
/// let expr = parse(b"(6:issuer3:bob)").unwrap();
/// assert_eq!(expr, Expression::list("issuer", vec![Expression::atom("bob")]));
/// ```
///
/// # Errors
///
/// Any [`ParseError`]; the first error aborts the parse.
pub fn parse(input: &[u8]) -> Result<Expression, ParseError> {
    parse_with(input, &ParseLimits::default())
}

/// Parse a complete expression with explicit limits
///
/// The whole buffer must be consumed.
///
/// # Errors
///
/// * `ParseError::EmptyInput` - no bytes
/// * `ParseError::InputTooLong` - longer than `limits.max_input_length`
/// * `ParseError::TrailingBytes` - bytes remain after the expression
/// * any error from the list, atom, or star-form readers
pub fn parse_with(input: &[u8], limits: &ParseLimits) -> Result<Expression, ParseError> {
    limits.validate()?;
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if input.len() > limits.max_input_length {
        return Err(ParseError::InputTooLong {
            max: limits.max_input_length,
            length: input.len(),
        });
    }

    let mut cursor = Cursor::new(input);
    let mut parser = Parser::new(limits);
    let expr = parser.parse_expression(&mut cursor)?;

    if !cursor.is_at_end() {
        return Err(ParseError::TrailingBytes {
            offset: cursor.position(),
        });
    }
    Ok(expr)
}

impl Expression {
    /// Parse canonical bytes with default limits
    ///
    /// # Errors
    ///
    /// Same as [`parse`].
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self, ParseError> {
        parse(input.as_ref())
    }
}

/// Depth-tracking reader shared by the list and star-form parsers
#[derive(Debug)]
pub struct Parser<'a> {
    pub(crate) limits: &'a ParseLimits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser at depth 0
    #[must_use]
    pub const fn new(limits: &'a ParseLimits) -> Self {
        Self { limits, depth: 0 }
    }

    /// Current nesting depth
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Read one expression: an atom, a list, or a star form
    ///
    /// # Errors
    ///
    /// Any [`ParseError`].
    pub fn parse_expression(&mut self, cursor: &mut Cursor) -> Result<Expression, ParseError> {
        if cursor.peek()? != LEFT_BRACKET {
            return Ok(Expression::Atom(read_atom(cursor, self.limits)?));
        }

        cursor.advance(1)?;
        if cursor.take_prefix(STAR_MARKER.len()) == Ok(STAR_MARKER) {
            cursor.advance(STAR_MARKER.len())?;
            self.parse_star_form(cursor)
        } else {
            self.parse_list_body(cursor)
        }
    }

    /// Read a list whose opening `(` has already been consumed
    ///
    /// Reads the tag atom, then parts until `)`, and consumes the `)`.
    ///
    /// # Errors
    ///
    /// * `ParseError::UnbalancedBrackets` - buffer ends before `)`
    /// * `ParseError::DepthExceeded` - nesting above `max_depth`
    /// * any child error, unchanged
    pub fn parse_list_body(&mut self, cursor: &mut Cursor) -> Result<Expression, ParseError> {
        let open = cursor.position().saturating_sub(1);
        self.nested(|parser| {
            let tag = parser.read_required_atom(cursor, open)?;
            let parts = parser.parse_elements(cursor, open)?;
            Ok(Expression::List { tag, parts })
        })
    }

    /// Read elements until `)` and consume it
    pub(crate) fn parse_elements(
        &mut self,
        cursor: &mut Cursor,
        open: usize,
    ) -> Result<Vec<Expression>, ParseError> {
        let mut elements = Vec::new();
        loop {
            match cursor.peek() {
                Err(_) => return Err(ParseError::UnbalancedBrackets { offset: open }),
                Ok(RIGHT_BRACKET) => {
                    cursor.advance(1)?;
                    return Ok(elements);
                }
                Ok(_) => elements.push(self.parse_expression(cursor)?),
            }
        }
    }

    /// Read an atom that the grammar requires at this point
    pub(crate) fn read_required_atom(
        &self,
        cursor: &mut Cursor,
        open: usize,
    ) -> Result<Vec<u8>, ParseError> {
        if cursor.is_at_end() {
            return Err(ParseError::UnbalancedBrackets { offset: open });
        }
        read_atom(cursor, self.limits)
    }

    /// Consume the `)` closing a fixed-arity form
    pub(crate) fn expect_close(&self, cursor: &mut Cursor, open: usize) -> Result<(), ParseError> {
        match cursor.peek() {
            Err(_) => Err(ParseError::UnbalancedBrackets { offset: open }),
            Ok(RIGHT_BRACKET) => cursor.advance(1),
            Ok(_) => Err(ParseError::ExpectedListEnd {
                offset: cursor.position(),
            }),
        }
    }

    /// Run `read` one level deeper; the depth is restored on every exit
    pub(crate) fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.limits.max_depth {
            return Err(ParseError::DepthExceeded {
                max: self.limits.max_depth,
            });
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn nested(depth: usize) -> Vec<u8> {
        let mut input = String::new();
        for _ in 0..depth {
            input.push_str("(1:a");
        }
        for _ in 0..depth {
            input.push(')');
        }
        input.into_bytes()
    }

    #[test]
    fn test_parse_certificate() {
        let expr = parse(b"(11:certificate(6:issuer3:bob)(7:subject5:alice))").unwrap();
        assert_eq!(
            expr,
            Expression::list(
                "certificate",
                vec![
                    Expression::list("issuer", vec![Expression::atom("bob")]),
                    Expression::list("subject", vec![Expression::atom("alice")]),
                ]
            )
        );
    }

    #[test]
    fn test_parse_bare_atom() {
        assert_eq!(parse(b"3:bob").unwrap(), Expression::atom("bob"));
    }

    #[test]
    fn test_list_body_after_consumed_bracket() {
        let mut cursor = Cursor::at(&b"(7:subject)"[..], 1).unwrap();
        let limits = ParseLimits::default();
        let expr = Parser::new(&limits).parse_list_body(&mut cursor).unwrap();
        assert_eq!(expr, Expression::list("subject", vec![]));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            parse(b"(11:certificate(6:issuer3:bob)"),
            Err(ParseError::UnbalancedBrackets { offset: 0 })
        );
        assert_eq!(
            parse(b"(1:a(1:b"),
            Err(ParseError::UnbalancedBrackets { offset: 4 })
        );
        assert_eq!(parse(b"("), Err(ParseError::UnbalancedBrackets { offset: 0 }));
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(
            parse(b"(1:a)(1:b)"),
            Err(ParseError::TrailingBytes { offset: 5 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(b""), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_list_without_tag() {
        assert!(matches!(
            parse(b"()"),
            Err(ParseError::MalformedLength { .. })
        ));
    }

    #[test]
    fn test_child_errors_propagate() {
        assert!(matches!(
            parse(b"(1:a(1:b9:short))"),
            Err(ParseError::Truncated { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let limits = ParseLimits::default().with_max_depth(8);
        assert!(parse_with(&nested(8), &limits).is_ok());
        assert_eq!(
            parse_with(&nested(9), &limits),
            Err(ParseError::DepthExceeded { max: 8 })
        );
    }

    #[test]
    fn test_input_length_limit() {
        let limits = ParseLimits::default().with_max_input_length(4);
        assert_eq!(
            parse_with(b"(1:a)", &limits),
            Err(ParseError::InputTooLong { max: 4, length: 5 })
        );
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let limits = ParseLimits::default().with_max_depth(0);
        assert!(matches!(
            parse_with(b"1:a", &limits),
            Err(ParseError::InvalidLimits(_))
        ));
    }

    #[test]
    fn test_parser_reusable_after_error() {
        let limits = ParseLimits::default().with_max_depth(2);
        let mut parser = Parser::new(&limits);

        let mut truncated = Cursor::new(&b"(1:a(1:b9:x))"[..]);
        assert!(matches!(
            parser.parse_expression(&mut truncated),
            Err(ParseError::Truncated { .. })
        ));
        assert_eq!(parser.depth(), 0);

        let mut too_deep = Cursor::new(&b"(1:a(1:b(1:c)))"[..]);
        assert_eq!(
            parser.parse_expression(&mut too_deep),
            Err(ParseError::DepthExceeded { max: 2 })
        );
        assert_eq!(parser.depth(), 0);

        let mut valid = Cursor::new(&b"(1:a(1:b))"[..]);
        assert_eq!(
            parser.parse_expression(&mut valid).unwrap(),
            Expression::list("a", vec![Expression::list("b", vec![])])
        );
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let limits = ParseLimits::default().with_max_depth(2);
        assert!(parse_with(b"(1:a(1:b)(1:c)(1:d))", &limits).is_ok());
    }
}
