//! Expression tree produced by the parser and consumed by the matcher.
//!
//! Trees are built once, bottom-up, and never mutated. Each list or set owns
//! its children exclusively; a rule tree and a query tree never share nodes.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::atom::write_atom;
use crate::error::ParseError;
use crate::range::Range;
use crate::starform::{PREFIX, RANGE, SET, STAR_MARKER, SUFFIX};

/// Parsed canonical S-expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Opaque byte string
    Atom(Vec<u8>),
    /// Tagged list `(tag part*)`
    List {
        /// First atom of the list
        tag: Vec<u8>,
        /// Remaining elements, compared positionally
        parts: Vec<Expression>,
    },
    /// `(1:*3:set ...)` alternatives
    Set(Set),
    /// `(1:*5:range ...)` typed bounds
    Range(Range),
    /// `(1:*6:prefix ...)` pattern
    Prefix(Vec<u8>),
    /// `(1:*6:suffix ...)` pattern
    Suffix(Vec<u8>),
    /// `(1:*)`, matches anything
    Wildcard,
}

impl Expression {
    /// Atom from bytes
    #[must_use]
    pub fn atom(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Atom(bytes.into())
    }

    /// List from a tag and parts
    #[must_use]
    pub fn list(tag: impl Into<Vec<u8>>, parts: Vec<Expression>) -> Self {
        Self::List {
            tag: tag.into(),
            parts,
        }
    }

    /// Short name of the active variant, used in diagnostics
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Atom(_) => "atom",
            Self::List { .. } => "list",
            Self::Set(_) => "set",
            Self::Range(_) => "range",
            Self::Prefix(_) => "prefix",
            Self::Suffix(_) => "suffix",
            Self::Wildcard => "wildcard",
        }
    }

    /// Bytes of an atom
    #[must_use]
    pub fn as_atom(&self) -> Option<&[u8]> {
        match self {
            Self::Atom(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Tag of a list
    #[must_use]
    pub fn tag(&self) -> Option<&[u8]> {
        match self {
            Self::List { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Parts of a list
    #[must_use]
    pub fn parts(&self) -> Option<&[Expression]> {
        match self {
            Self::List { parts, .. } => Some(parts),
            _ => None,
        }
    }

    /// Bracket nesting depth (atoms are 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Atom(_) => 0,
            Self::List { parts, .. } => 1 + parts.iter().map(Self::depth).max().unwrap_or(0),
            Self::Set(set) => 1 + set.members().iter().map(Self::depth).max().unwrap_or(0),
            Self::Range(_) | Self::Prefix(_) | Self::Suffix(_) | Self::Wildcard => 1,
        }
    }

    /// Canonical encoding of this tree
    ///
    /// Parsing the result yields an equal tree, unless a list is tagged with
    /// the single byte `*`; that encoding reads back as a star form.
    #[must_use]
    pub fn to_canonical(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// Append the canonical encoding of this tree to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Atom(bytes) => write_atom(out, bytes),
            Self::List { tag, parts } => {
                out.push(b'(');
                write_atom(out, tag);
                for part in parts {
                    part.encode_into(out);
                }
                out.push(b')');
            }
            Self::Set(set) => {
                open_star_form(out, SET);
                for member in set.members() {
                    member.encode_into(out);
                }
                out.push(b')');
            }
            Self::Range(range) => {
                open_star_form(out, RANGE);
                write_atom(out, range.kind().keyword().as_bytes());
                for bound in range.bounds() {
                    write_atom(out, bound.comparator().keyword().as_bytes());
                    write_atom(out, bound.literal());
                }
                out.push(b')');
            }
            Self::Prefix(pattern) => {
                open_star_form(out, PREFIX);
                write_atom(out, pattern);
                out.push(b')');
            }
            Self::Suffix(pattern) => {
                open_star_form(out, SUFFIX);
                write_atom(out, pattern);
                out.push(b')');
            }
            Self::Wildcard => {
                out.push(b'(');
                out.extend_from_slice(STAR_MARKER);
                out.push(b')');
            }
        }
    }
}

fn open_star_form(out: &mut Vec<u8>, keyword: &[u8]) {
    out.push(b'(');
    out.extend_from_slice(STAR_MARKER);
    write_atom(out, keyword);
}

/// Members of a `set` star form
///
/// No two list members share a tag and no two atom members are equal. The
/// check covers immediate members only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Set {
    members: Vec<Expression>,
}

impl Set {
    /// Create a set, rejecting duplicates
    ///
    /// # Errors
    ///
    /// * `ParseError::DuplicateTag` - two list members share a tag
    /// * `ParseError::DuplicateAtom` - two atom members are byte-identical
    pub fn new(members: Vec<Expression>) -> Result<Self, ParseError> {
        let mut tags: BTreeSet<&[u8]> = BTreeSet::new();
        let mut atoms: BTreeSet<&[u8]> = BTreeSet::new();

        for member in &members {
            match member {
                Expression::List { tag, .. } if !tags.insert(tag) => {
                    tracing::debug!(tag = %lossy(tag), "rejecting set with duplicate tag");
                    return Err(ParseError::DuplicateTag(lossy(tag)));
                }
                Expression::Atom(bytes) if !atoms.insert(bytes) => {
                    tracing::debug!(atom = %lossy(bytes), "rejecting set with duplicate atom");
                    return Err(ParseError::DuplicateAtom(lossy(bytes)));
                }
                _ => {}
            }
        }

        Ok(Self { members })
    }

    /// Members in wire order
    #[must_use]
    pub fn members(&self) -> &[Expression] {
        &self.members
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
