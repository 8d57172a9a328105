//! Builder pattern for constructing rule and query trees in code

use crate::error::ParseError;
use crate::expr::{Expression, Set};
use crate::range::{Bound, Comparator, Range, RangeKind};
use alloc::vec::Vec;

/// Builder for tagged lists
///
/// # Examples
///
/// ```
/// use core_sexp::builder::{ListBuilder, RangeBuilder};
/// use core_sexp::{Comparator, RangeKind};
///
/// let rule = ListBuilder::new("certificate")
///     .with_list("issuer", |issuer| issuer.atom("bob"))
///     .with_list("level", |level| {
///         level.part(
///             RangeBuilder::new(RangeKind::Numeric)
///                 .bound(Comparator::Ge, "100")
///                 .build()
///                 .unwrap(),
///         )
///     })
///     .build();
///
/// assert_eq!(
///     rule.to_canonical(),
///     b"(11:certificate(6:issuer3:bob)(5:level(1:*5:range7:numeric2:ge3:100)))"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ListBuilder {
    tag: Vec<u8>,
    parts: Vec<Expression>,
}

impl ListBuilder {
    /// Start a list with the given tag
    #[must_use]
    pub fn new(tag: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            parts: Vec::new(),
        }
    }

    /// Append an atom part
    #[must_use]
    pub fn atom(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.part(Expression::atom(bytes))
    }

    /// Append any expression
    #[must_use]
    pub fn part(mut self, part: Expression) -> Self {
        self.parts.push(part);
        self
    }

    /// Append a nested list built by `f`
    #[must_use]
    pub fn with_list<F>(self, tag: impl Into<Vec<u8>>, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        let nested = f(ListBuilder::new(tag)).build();
        self.part(nested)
    }

    /// Append `(1:*)`
    #[must_use]
    pub fn wildcard(self) -> Self {
        self.part(Expression::Wildcard)
    }

    /// Finish the list
    #[must_use]
    pub fn build(self) -> Expression {
        Expression::List {
            tag: self.tag,
            parts: self.parts,
        }
    }
}

/// Builder for `range` star forms
///
/// Bounds are given as wire literals and parsed against the range kind on
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct RangeBuilder {
    kind: RangeKind,
    bounds: Vec<(Comparator, Vec<u8>)>,
}

impl RangeBuilder {
    /// Start a range of the given kind
    #[must_use]
    pub const fn new(kind: RangeKind) -> Self {
        Self {
            kind,
            bounds: Vec::new(),
        }
    }

    /// Add a bound
    #[must_use]
    pub fn bound(mut self, comparator: Comparator, literal: impl Into<Vec<u8>>) -> Self {
        self.bounds.push((comparator, literal.into()));
        self
    }

    /// Build the range expression
    ///
    /// # Errors
    ///
    /// * `ParseError::TypeMismatch` / `ParseError::WrongIpVersion` - a literal is not a value of the kind
    /// * `ParseError::BoundCount` - no bound, or more than two
    pub fn build(self) -> Result<Expression, ParseError> {
        let count = self.bounds.len();
        if !(1..=2).contains(&count) {
            return Err(ParseError::BoundCount(count));
        }
        let mut bounds = self.bounds.into_iter();
        let Some((comparator, literal)) = bounds.next() else {
            return Err(ParseError::BoundCount(0));
        };
        let first = Bound::parse(self.kind, comparator, literal)?;
        let second = bounds
            .next()
            .map(|(comparator, literal)| Bound::parse(self.kind, comparator, literal))
            .transpose()?;
        Ok(Expression::Range(Range::new(self.kind, first, second)?))
    }
}

/// Builder for `set` star forms
#[derive(Debug, Clone, Default)]
pub struct SetBuilder {
    members: Vec<Expression>,
}

impl SetBuilder {
    /// Start an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom member
    #[must_use]
    pub fn atom(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.member(Expression::atom(bytes))
    }

    /// Add any member
    #[must_use]
    pub fn member(mut self, member: Expression) -> Self {
        self.members.push(member);
        self
    }

    /// Build the set expression
    ///
    /// # Errors
    ///
    /// * `ParseError::DuplicateTag` - two list members share a tag
    /// * `ParseError::DuplicateAtom` - two atom members are equal
    pub fn build(self) -> Result<Expression, ParseError> {
        Ok(Expression::Set(Set::new(self.members)?))
    }
}

// Convenience constructors for pattern forms
impl Expression {
    /// `(1:*6:prefix ...)` pattern
    #[must_use]
    pub fn prefix(pattern: impl Into<Vec<u8>>) -> Self {
        Self::Prefix(pattern.into())
    }

    /// `(1:*6:suffix ...)` pattern
    #[must_use]
    pub fn suffix(pattern: impl Into<Vec<u8>>) -> Self {
        Self::Suffix(pattern.into())
    }
}
