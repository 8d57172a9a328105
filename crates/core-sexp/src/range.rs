//! # Typed range constraints
//!
//! A `range` star form declares a value kind and one or two bounds:
//!
//! ```text
//! (1:*5:range7:numeric2:ge3:100)
//! (1:*5:range4:ipv42:ge11:130.239.1.12:lt13:130.239.1.127)
//! ```
//!
//! Each bound literal is parsed once, at parse time, into a typed [`Value`].
//! Two bounds are a logical AND.
//!
//! ## Ordering per kind
//!
//! - `numeric`: signed 64-bit integers
//! - `alpha`: byte-lexicographic
//! - `date`: RFC 3339 timestamps, compared as Unix-epoch seconds
//! - `time`: `HH:MM:SS` time of day, no date component
//! - `ipv4` / `ipv6`: address order

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, FixedOffset, NaiveTime};

use crate::error::ParseError;

/// Format accepted for `time` literals
pub const TIME_FORMAT: &str = "%H:%M:%S";

const NUMERIC: &[u8] = b"numeric";
const ALPHA: &[u8] = b"alpha";
const DATE: &[u8] = b"date";
const TIME: &[u8] = b"time";
const IPV4: &[u8] = b"ipv4";
const IPV6: &[u8] = b"ipv6";

const LE: &[u8] = b"le";
const LT: &[u8] = b"lt";
const GE: &[u8] = b"ge";
const GT: &[u8] = b"gt";

/// Value kind declared by a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    /// Signed integer
    Numeric,
    /// Arbitrary bytes, lexicographic order
    Alpha,
    /// RFC 3339 timestamp
    Date,
    /// `HH:MM:SS` time of day
    Time,
    /// Dotted-quad IPv4 address
    Ipv4,
    /// IPv6 address
    Ipv6,
}

impl RangeKind {
    /// Look up a kind by its wire keyword
    #[must_use]
    pub fn from_keyword(keyword: &[u8]) -> Option<Self> {
        match keyword {
            NUMERIC => Some(Self::Numeric),
            ALPHA => Some(Self::Alpha),
            DATE => Some(Self::Date),
            TIME => Some(Self::Time),
            IPV4 => Some(Self::Ipv4),
            IPV6 => Some(Self::Ipv6),
            _ => None,
        }
    }

    /// Wire keyword
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alpha => "alpha",
            Self::Date => "date",
            Self::Time => "time",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        }
    }

    /// Parse a literal as a value of this kind
    ///
    /// # Errors
    ///
    /// * `ParseError::TypeMismatch` - literal is not valid for this kind
    /// * `ParseError::WrongIpVersion` - literal is an address of the other family
    pub fn parse_value(&self, literal: &[u8]) -> Result<Value, ParseError> {
        if let Self::Alpha = self {
            return Ok(Value::Alpha(literal.to_vec()));
        }

        let text = core::str::from_utf8(literal).map_err(|_| self.mismatch(literal))?;
        match self {
            Self::Numeric => text
                .parse::<i64>()
                .map(Value::Numeric)
                .map_err(|_| self.mismatch(literal)),
            Self::Date => DateTime::parse_from_rfc3339(text)
                .map(Value::Date)
                .map_err(|_| self.mismatch(literal)),
            Self::Time => NaiveTime::parse_from_str(text, TIME_FORMAT)
                .map(Value::Time)
                .map_err(|_| self.mismatch(literal)),
            Self::Ipv4 => match text.parse::<IpAddr>() {
                Ok(IpAddr::V4(addr)) => Ok(Value::Ipv4(addr)),
                Ok(IpAddr::V6(_)) => Err(ParseError::WrongIpVersion {
                    expected: "ipv4",
                    value: text.into(),
                }),
                Err(_) => Err(self.mismatch(literal)),
            },
            Self::Ipv6 => match text.parse::<IpAddr>() {
                Ok(IpAddr::V6(addr)) => Ok(Value::Ipv6(addr)),
                Ok(IpAddr::V4(_)) => Err(ParseError::WrongIpVersion {
                    expected: "ipv6",
                    value: text.into(),
                }),
                Err(_) => Err(self.mismatch(literal)),
            },
            Self::Alpha => Ok(Value::Alpha(literal.to_vec())),
        }
    }

    fn mismatch(&self, literal: &[u8]) -> ParseError {
        ParseError::TypeMismatch {
            kind: self.keyword(),
            value: String::from_utf8_lossy(literal).into_owned(),
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Typed bound value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed integer
    Numeric(i64),
    /// Raw bytes
    Alpha(Vec<u8>),
    /// Timestamp with its original offset
    Date(DateTime<FixedOffset>),
    /// Time of day
    Time(NaiveTime),
    /// IPv4 address
    Ipv4(Ipv4Addr),
    /// IPv6 address
    Ipv6(Ipv6Addr),
}

impl Value {
    /// Kind of this value
    #[must_use]
    pub const fn kind(&self) -> RangeKind {
        match self {
            Self::Numeric(_) => RangeKind::Numeric,
            Self::Alpha(_) => RangeKind::Alpha,
            Self::Date(_) => RangeKind::Date,
            Self::Time(_) => RangeKind::Time,
            Self::Ipv4(_) => RangeKind::Ipv4,
            Self::Ipv6(_) => RangeKind::Ipv6,
        }
    }

    /// Order two values of the same kind; `None` across kinds
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => Some(a.cmp(b)),
            (Self::Alpha(a), Self::Alpha(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.timestamp().cmp(&b.timestamp())),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            (Self::Ipv4(a), Self::Ipv4(b)) => Some(a.cmp(b)),
            (Self::Ipv6(a), Self::Ipv6(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Bound comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Less than or equal (`le`)
    Le,
    /// Less than (`lt`)
    Lt,
    /// Greater than or equal (`ge`)
    Ge,
    /// Greater than (`gt`)
    Gt,
}

impl Comparator {
    /// Look up a comparator by its wire keyword
    #[must_use]
    pub fn from_keyword(keyword: &[u8]) -> Option<Self> {
        match keyword {
            LE => Some(Self::Le),
            LT => Some(Self::Lt),
            GE => Some(Self::Ge),
            GT => Some(Self::Gt),
            _ => None,
        }
    }

    /// Wire keyword
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Le => "le",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Gt => "gt",
        }
    }

    /// Whether this comparator bounds values from below
    #[must_use]
    pub const fn is_lower(&self) -> bool {
        matches!(self, Self::Ge | Self::Gt)
    }

    /// Whether equality with the limit is excluded
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Lt | Self::Gt)
    }

    /// Whether `value.cmp(limit) == ordering` satisfies this comparator
    #[must_use]
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Le => ordering != Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
            Self::Ge => ordering != Ordering::Less,
            Self::Gt => ordering == Ordering::Greater,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `comparator value` clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    comparator: Comparator,
    literal: Vec<u8>,
    limit: Value,
}

impl Bound {
    /// Parse a bound literal against a kind
    ///
    /// # Errors
    ///
    /// Same as [`RangeKind::parse_value`].
    pub fn parse(
        kind: RangeKind,
        comparator: Comparator,
        literal: impl Into<Vec<u8>>,
    ) -> Result<Self, ParseError> {
        let literal = literal.into();
        let limit = kind.parse_value(&literal)?;
        Ok(Self {
            comparator,
            literal,
            limit,
        })
    }

    /// Comparator of this bound
    #[must_use]
    pub const fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Literal as written on the wire
    #[must_use]
    pub fn literal(&self) -> &[u8] {
        &self.literal
    }

    /// Parsed limit
    #[must_use]
    pub const fn limit(&self) -> &Value {
        &self.limit
    }

    /// Whether `value` satisfies this bound; `None` if kinds differ
    #[must_use]
    pub fn admits(&self, value: &Value) -> Option<bool> {
        value
            .compare(&self.limit)
            .map(|ordering| self.comparator.holds(ordering))
    }

    /// Whether every value admitted by `self` is admitted by `rule`
    ///
    /// Only bounds on the same side can imply each other. Discrete gaps are
    /// not exploited: `gt 99` does not imply `ge 100`.
    #[must_use]
    pub fn implies(&self, rule: &Self) -> bool {
        if self.comparator.is_lower() != rule.comparator.is_lower() {
            return false;
        }
        let Some(ordering) = self.limit.compare(&rule.limit) else {
            return false;
        };
        let tighter_needed = rule.comparator.is_strict() && !self.comparator.is_strict();
        match (rule.comparator.is_lower(), tighter_needed) {
            (true, true) => ordering == Ordering::Greater,
            (true, false) => ordering != Ordering::Less,
            (false, true) => ordering == Ordering::Less,
            (false, false) => ordering != Ordering::Greater,
        }
    }
}

/// Range constraint: a kind plus one or two bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    kind: RangeKind,
    first: Bound,
    second: Option<Bound>,
}

impl Range {
    /// Create a range
    ///
    /// # Errors
    ///
    /// `ParseError::TypeMismatch` if a bound's value is not of `kind`.
    pub fn new(kind: RangeKind, first: Bound, second: Option<Bound>) -> Result<Self, ParseError> {
        for bound in core::iter::once(&first).chain(second.as_ref()) {
            if bound.limit.kind() != kind {
                return Err(ParseError::TypeMismatch {
                    kind: kind.keyword(),
                    value: String::from_utf8_lossy(&bound.literal).into_owned(),
                });
            }
        }
        Ok(Self {
            kind,
            first,
            second,
        })
    }

    /// Declared kind
    #[must_use]
    pub const fn kind(&self) -> RangeKind {
        self.kind
    }

    /// Bounds in wire order (one or two)
    pub fn bounds(&self) -> impl Iterator<Item = &Bound> {
        core::iter::once(&self.first).chain(self.second.as_ref())
    }

    /// Whether `value` satisfies every bound
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.bounds().all(|bound| bound.admits(value) == Some(true))
    }

    /// Parse `literal` as this range's kind and test containment
    ///
    /// # Errors
    ///
    /// Same as [`RangeKind::parse_value`].
    pub fn contains_literal(&self, literal: &[u8]) -> Result<bool, ParseError> {
        let value = self.kind.parse_value(literal)?;
        Ok(self.contains(&value))
    }

    /// Whether this range includes every value of `other`
    ///
    /// Returns `None` when the kinds differ.
    #[must_use]
    pub fn includes(&self, other: &Self) -> Option<bool> {
        if self.kind != other.kind {
            return None;
        }
        Some(
            self.bounds()
                .all(|rule| other.bounds().any(|query| query.implies(rule))),
        )
    }
}
