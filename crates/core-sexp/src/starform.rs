//! Star-form readers: `set`, `range`, `prefix`, `suffix`, and the bare
//! wildcard `(1:*)`.
//!
//! Each reader is entered with the cursor just past the `1:*` marker and
//! consumes the rest of its enclosing list, including the closing `)`.

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::expr::{lossy, Expression, Set};
use crate::parser::{Parser, RIGHT_BRACKET};
use crate::range::{Bound, Comparator, Range, RangeKind};
use alloc::vec::Vec;

/// Reserved first atom of every star form (`1:*`)
pub const STAR_MARKER: &[u8] = b"1:*";

/// `set` keyword
pub const SET: &[u8] = b"set";
/// `range` keyword
pub const RANGE: &[u8] = b"range";
/// `prefix` keyword
pub const PREFIX: &[u8] = b"prefix";
/// `suffix` keyword
pub const SUFFIX: &[u8] = b"suffix";

impl Parser<'_> {
    /// Read a star form whose `(1:*` has already been consumed
    ///
    /// # Errors
    ///
    /// * `ParseError::UnknownStarForm` - keyword is not set, range, prefix, or suffix
    /// * any error from the body reader
    pub fn parse_star_form(&mut self, cursor: &mut Cursor) -> Result<Expression, ParseError> {
        let open = cursor.position().saturating_sub(STAR_MARKER.len() + 1);
        self.nested(|parser| {
            if cursor.peek().ok() == Some(RIGHT_BRACKET) {
                cursor.advance(1)?;
                return Ok(Expression::Wildcard);
            }

            let keyword = parser.read_required_atom(cursor, open)?;
            tracing::trace!(keyword = %lossy(&keyword), offset = open, "star form");

            match keyword.as_slice() {
                SET => Ok(Expression::Set(parser.parse_set(cursor, open)?)),
                RANGE => Ok(Expression::Range(parser.parse_range(cursor, open)?)),
                PREFIX => Ok(Expression::Prefix(parser.parse_pattern(cursor, open)?)),
                SUFFIX => Ok(Expression::Suffix(parser.parse_pattern(cursor, open)?)),
                other => Err(ParseError::UnknownStarForm(lossy(other))),
            }
        })
    }

    fn parse_set(&mut self, cursor: &mut Cursor, open: usize) -> Result<Set, ParseError> {
        let members = self.parse_elements(cursor, open)?;
        Set::new(members)
    }

    fn parse_range(&mut self, cursor: &mut Cursor, open: usize) -> Result<Range, ParseError> {
        let kind_atom = self.read_required_atom(cursor, open)?;
        let kind = RangeKind::from_keyword(&kind_atom)
            .ok_or_else(|| ParseError::UnknownRangeKind(lossy(&kind_atom)))?;

        let first = self.parse_bound(cursor, kind, open)?;
        let second = match cursor.peek() {
            Ok(RIGHT_BRACKET) => None,
            Err(_) => return Err(ParseError::UnbalancedBrackets { offset: open }),
            Ok(_) => Some(self.parse_bound(cursor, kind, open)?),
        };
        self.expect_close(cursor, open)?;

        Range::new(kind, first, second)
    }

    fn parse_bound(
        &self,
        cursor: &mut Cursor,
        kind: RangeKind,
        open: usize,
    ) -> Result<Bound, ParseError> {
        let comparator_atom = self.read_required_atom(cursor, open)?;
        let comparator = Comparator::from_keyword(&comparator_atom)
            .ok_or_else(|| ParseError::InvalidComparator(lossy(&comparator_atom)))?;
        let literal = self.read_required_atom(cursor, open)?;
        tracing::trace!(%kind, %comparator, literal = %lossy(&literal), "range bound");
        Bound::parse(kind, comparator, literal)
    }

    fn parse_pattern(&self, cursor: &mut Cursor, open: usize) -> Result<Vec<u8>, ParseError> {
        let pattern = self.read_required_atom(cursor, open)?;
        self.expect_close(cursor, open)?;
        Ok(pattern)
    }
}
