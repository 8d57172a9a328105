//! # Rule/query matcher
//!
//! Walks a rule tree and a query tree in lock-step and decides whether the
//! rule is satisfied by the query. The relation is not symmetric: a query may
//! carry more detail than its rule (extra trailing list parts, a narrower
//! range, a longer prefix) but never less.
//!
//! | rule      | query           | satisfied when                                 |
//! |-----------|-----------------|------------------------------------------------|
//! | wildcard  | anything        | always                                         |
//! | atom      | atom            | bytes are equal                                |
//! | list      | list            | tags equal and every rule part is satisfied    |
//! | set       | set             | every query member matches some rule member    |
//! | set       | atom, list      | the query matches some rule member             |
//! | range     | atom            | the atom parses as the kind and is in range    |
//! | range     | range           | the rule range includes the query range        |
//! | prefix    | prefix, atom    | query bytes start with the rule pattern        |
//! | suffix    | suffix, atom    | query bytes end with the rule pattern          |
//!
//! Any other pair is `MatchError::UnsupportedComparison`.

use core::fmt;

use crate::error::{MatchError, Result};
use crate::expr::{lossy, Expression, Set};
use crate::limits::{ParseLimits, DEFAULT_MAX_DEPTH};
use crate::parser::parse_with;

/// Check whether `rule` is satisfied by `query` with the default depth limit
///
/// # Example
///
/// ```
/// use core_sexp::{matches, parse};
///
/// let rule = parse(b"(11:certificate(6:issuer3:bob)(7:subject))").unwrap();
/// let query = parse(b"(11:certificate(6:issuer3:bob)(7:subject5:alice))").unwrap();
/// assert!(matches(&query, &rule).unwrap());
/// ```
///
/// # Errors
///
/// See [`Matcher::matches`].
pub fn matches(query: &Expression, rule: &Expression) -> core::result::Result<bool, MatchError> {
    Matcher::default().matches(query, rule)
}

/// [`matches`] with an explicit recursion limit
///
/// # Errors
///
/// See [`Matcher::matches`].
pub fn matches_with(
    query: &Expression,
    rule: &Expression,
    max_depth: usize,
) -> core::result::Result<bool, MatchError> {
    Matcher::new(max_depth).matches(query, rule)
}

/// [`Matcher::authorize`] with the default depth limit
///
/// # Errors
///
/// See [`Matcher::authorize`].
pub fn authorize(
    query: &Expression,
    rule: &Expression,
) -> core::result::Result<Decision, MatchError> {
    Matcher::default().authorize(query, rule)
}

/// Authorization outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The query satisfies the rule
    Allow,
    /// The query does not satisfy the rule, with the denial error if one was raised
    Deny(Option<MatchError>),
}

impl Decision {
    /// Whether access is granted
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny(None) => write!(f, "deny"),
            Self::Deny(Some(reason)) => write!(f, "deny: {}", reason),
        }
    }
}

/// Depth-bounded comparison engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    max_depth: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Matcher {
    /// Create a matcher that rejects trees nested deeper than `max_depth`
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create a matcher using the depth limit of `limits`
    #[must_use]
    pub const fn from_limits(limits: &ParseLimits) -> Self {
        Self::new(limits.max_depth)
    }

    /// Check whether `rule` is satisfied by `query`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the query is authorized
    /// * `Ok(false)` - a tag, atom, range, or pattern did not match
    ///
    /// # Errors
    ///
    /// * `MatchError::RuleMoreSpecific` - rule list has parts, query list has none
    /// * `MatchError::ShortQuerySequence` - query list has fewer parts than the rule
    /// * `MatchError::ItemNotInSet` - a query value matches no rule set member
    /// * `MatchError::InvalidQueryValue` - query atom is not a value of the range kind
    /// * `MatchError::UnsupportedComparison` - no comparison for this type pair
    /// * `MatchError::DepthExceeded` - trees nested deeper than the limit
    pub fn matches(
        &self,
        query: &Expression,
        rule: &Expression,
    ) -> core::result::Result<bool, MatchError> {
        self.compare(query, rule, 0)
    }

    /// Decide access, folding denial errors into [`Decision::Deny`]
    ///
    /// Only errors that mean the pair could not be compared
    /// (`UnsupportedComparison`, `DepthExceeded`) are returned as `Err`.
    ///
    /// # Errors
    ///
    /// Non-denial [`MatchError`]s.
    pub fn authorize(
        &self,
        query: &Expression,
        rule: &Expression,
    ) -> core::result::Result<Decision, MatchError> {
        let decision = match self.matches(query, rule) {
            Ok(true) => Decision::Allow,
            Ok(false) => Decision::Deny(None),
            Err(err) if err.is_denial() => Decision::Deny(Some(err)),
            Err(err) => {
                tracing::debug!(error = %err, "comparison failed");
                return Err(err);
            }
        };
        tracing::debug!(%decision, rule = rule.variant_name(), "authorization decided");
        Ok(decision)
    }

    fn compare(
        &self,
        query: &Expression,
        rule: &Expression,
        depth: usize,
    ) -> core::result::Result<bool, MatchError> {
        if depth > self.max_depth {
            return Err(MatchError::DepthExceeded {
                max: self.max_depth,
            });
        }

        match (rule, query) {
            (Expression::Wildcard, _) => Ok(true),
            (Expression::Atom(rule), Expression::Atom(query)) => Ok(rule == query),
            (
                Expression::List {
                    tag: rule_tag,
                    parts: rule_parts,
                },
                Expression::List {
                    tag: query_tag,
                    parts: query_parts,
                },
            ) => {
                if rule_tag != query_tag {
                    return Ok(false);
                }
                self.compare_sequence(query_parts, rule_parts, depth + 1)
            }
            (Expression::Set(rule_set), Expression::Set(query_set)) => {
                for member in query_set.members() {
                    if !self.in_set(member, rule_set, depth + 1)? {
                        return Err(MatchError::ItemNotInSet);
                    }
                }
                Ok(true)
            }
            (Expression::Set(rule_set), Expression::Atom(_) | Expression::List { .. }) => {
                if self.in_set(query, rule_set, depth + 1)? {
                    Ok(true)
                } else {
                    Err(MatchError::ItemNotInSet)
                }
            }
            (Expression::Range(range), Expression::Atom(value)) => {
                let admitted = range.contains_literal(value).map_err(|_| {
                    MatchError::InvalidQueryValue {
                        kind: range.kind().keyword(),
                        value: lossy(value),
                    }
                })?;
                tracing::trace!(kind = %range.kind(), admitted, "range check");
                Ok(admitted)
            }
            (Expression::Range(rule_range), Expression::Range(query_range)) => rule_range
                .includes(query_range)
                .ok_or_else(|| unsupported(rule, query)),
            (Expression::Prefix(pattern), Expression::Prefix(value) | Expression::Atom(value)) => {
                Ok(value.starts_with(pattern))
            }
            (Expression::Suffix(pattern), Expression::Suffix(value) | Expression::Atom(value)) => {
                Ok(value.ends_with(pattern))
            }
            _ => Err(unsupported(rule, query)),
        }
    }

    /// Positional comparison of list parts
    ///
    /// Every rule part must be satisfied by the query part at the same
    /// position. Query parts past the end of the rule are not inspected.
    fn compare_sequence(
        &self,
        query: &[Expression],
        rule: &[Expression],
        depth: usize,
    ) -> core::result::Result<bool, MatchError> {
        if rule.is_empty() {
            return Ok(true);
        }
        if query.is_empty() {
            return Err(MatchError::RuleMoreSpecific);
        }

        for (index, rule_part) in rule.iter().enumerate() {
            let Some(query_part) = query.get(index) else {
                return Err(MatchError::ShortQuerySequence);
            };
            if !self.compare(query_part, rule_part, depth)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether `query` matches at least one member of `rule_set`
    ///
    /// A member that cannot be compared or that denies counts as no match;
    /// only the depth limit aborts the search.
    fn in_set(
        &self,
        query: &Expression,
        rule_set: &Set,
        depth: usize,
    ) -> core::result::Result<bool, MatchError> {
        for member in rule_set.members() {
            match self.compare(query, member, depth) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err @ MatchError::DepthExceeded { .. }) => return Err(err),
                Err(err) => {
                    tracing::trace!(error = %err, member = member.variant_name(), "set member skipped");
                }
            }
        }
        Ok(false)
    }
}

fn unsupported(rule: &Expression, query: &Expression) -> MatchError {
    MatchError::UnsupportedComparison {
        rule: rule.variant_name(),
        query: query.variant_name(),
    }
}

/// Parse both inputs and decide access in one call
///
/// # Errors
///
/// * `Error::Parse` - either input is malformed
/// * `Error::Match` - the pair could not be compared
pub fn authorize_bytes(query: &[u8], rule: &[u8]) -> Result<Decision> {
    authorize_bytes_with(query, rule, &ParseLimits::default())
}

/// [`authorize_bytes`] with explicit limits
///
/// # Errors
///
/// Same as [`authorize_bytes`].
pub fn authorize_bytes_with(query: &[u8], rule: &[u8], limits: &ParseLimits) -> Result<Decision> {
    let rule = parse_with(rule, limits)?;
    let query = parse_with(query, limits)?;
    Ok(Matcher::from_limits(limits).authorize(&query, &rule)?)
}
