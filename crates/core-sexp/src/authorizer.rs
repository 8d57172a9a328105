//! Authorization over a collection of rules
//!
//! A query is allowed when at least one rule is satisfied by it. Rules that
//! cannot be compared with the query, or that deny it, are skipped.
//!
//! ## Example
//!
//! ```
//! use core_sexp::{parse, RuleAuthorizer};
//!
//! let rules = vec![
//!     parse(b"(11:certificate(6:issuer3:bob)(7:subject))").unwrap(),
//!     parse(b"(11:certificate(6:issuer5:carol))").unwrap(),
//! ];
//!
//! let authorizer = RuleAuthorizer::new(&rules);
//! let query = parse(b"(11:certificate(6:issuer5:carol)(7:subject3:dan))").unwrap();
//! assert!(authorizer.is_allowed(&query));
//! assert_eq!(authorizer.matching_rules(&query).count(), 1);
//! ```

use crate::expr::Expression;
use crate::matcher::{Decision, Matcher};

/// Evaluates a query against a borrowed slice of rules
#[derive(Debug, Clone, Copy)]
pub struct RuleAuthorizer<'a> {
    rules: &'a [Expression],
    matcher: Matcher,
}

impl<'a> RuleAuthorizer<'a> {
    /// Create an authorizer with the default depth limit
    #[must_use]
    pub fn new(rules: &'a [Expression]) -> Self {
        Self {
            rules,
            matcher: Matcher::default(),
        }
    }

    /// Use `matcher` instead of the default one
    #[must_use]
    pub const fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// `true` if at least one rule is satisfied by `query`
    #[must_use]
    pub fn is_allowed(&self, query: &Expression) -> bool {
        self.rules.iter().any(|rule| self.satisfied(query, rule))
    }

    /// All rules satisfied by `query`, in order
    ///
    /// Useful for auditing which grant let a request through.
    pub fn matching_rules<'q>(
        &'q self,
        query: &'q Expression,
    ) -> impl Iterator<Item = &'a Expression> + 'q {
        let rules: &'a [Expression] = self.rules;
        rules
            .iter()
            .filter(move |rule| self.satisfied(query, rule))
    }

    /// Number of rules being evaluated
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn satisfied(&self, query: &Expression, rule: &Expression) -> bool {
        match self.matcher.authorize(query, rule) {
            Ok(decision) => decision == Decision::Allow,
            Err(err) => {
                tracing::trace!(error = %err, "rule skipped");
                false
            }
        }
    }
}

/// Anything that can answer an access question for a query tree
pub trait Authorizer {
    /// Check if access is allowed
    fn is_allowed(&self, query: &Expression) -> bool;
}

impl Authorizer for RuleAuthorizer<'_> {
    fn is_allowed(&self, query: &Expression) -> bool {
        RuleAuthorizer::is_allowed(self, query)
    }
}

impl Authorizer for Expression {
    fn is_allowed(&self, query: &Expression) -> bool {
        Matcher::default()
            .authorize(query, self)
            .is_ok_and(|decision| decision.is_allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use alloc::vec;

    #[test]
    fn test_no_rules_denies() {
        let authorizer = RuleAuthorizer::new(&[]);
        assert!(!authorizer.is_allowed(&Expression::atom("x")));
        assert_eq!(authorizer.rule_count(), 0);
    }

    #[test]
    fn test_unsupported_rules_are_skipped() {
        let rules = vec![Expression::list("x", vec![]), Expression::atom("x")];
        let authorizer = RuleAuthorizer::new(&rules);
        assert!(authorizer.is_allowed(&Expression::atom("x")));
        assert_eq!(
            authorizer
                .matching_rules(&Expression::atom("x"))
                .collect::<alloc::vec::Vec<_>>(),
            vec![&Expression::atom("x")]
        );
    }

    #[test]
    fn test_trait_object() {
        let rule = parse(b"(1:*6:prefix6:/home/)").unwrap();
        let checkers: [&dyn Authorizer; 1] = [&rule];
        assert!(checkers[0].is_allowed(&Expression::atom("/home/alice")));
        assert!(!checkers[0].is_allowed(&Expression::atom("/etc/passwd")));
    }

    #[test]
    fn test_custom_matcher_depth() {
        let rules = vec![parse(b"(1:a(1:b(1:c1:d)))").unwrap()];
        let shallow = RuleAuthorizer::new(&rules).with_matcher(Matcher::new(1));
        assert!(!shallow.is_allowed(&rules[0]));
        assert!(RuleAuthorizer::new(&rules).is_allowed(&rules[0]));
    }
}
