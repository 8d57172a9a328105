//! Human-readable rendering of expression trees
//!
//! Lists whose parts are all atoms stay on one line; any other list breaks
//! one part per line, indented two spaces per level. Star forms are shown
//! with a leading `*`. Atoms that are not plain printable ASCII are shown
//! as `#hex#`.
//!
//! ```
//! use core_sexp::{parse, print::pretty};
//!
//! let expr = parse(b"(11:certificate(6:issuer3:bob)(5:fruit(1:*3:set5:apple4:pear)))").unwrap();
//! assert_eq!(
//!     pretty(&expr),
//!     "(certificate\n  (issuer bob)\n  (fruit\n    (* set apple pear)))"
//! );
//! ```

use core::fmt;

use alloc::string::{String, ToString};

use crate::expr::Expression;

const INDENT: &str = "  ";

/// Render `expr` as indented text
#[must_use]
pub fn pretty(expr: &Expression) -> String {
    Pretty(expr).to_string()
}

/// [`fmt::Display`] adapter producing the same text as [`pretty`]
#[derive(Debug, Clone, Copy)]
pub struct Pretty<'a>(pub &'a Expression);

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.0, 0)
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expression, level: usize) -> fmt::Result {
    match expr {
        Expression::Atom(bytes) => write_text(f, bytes),
        Expression::List { tag, parts } => {
            f.write_str("(")?;
            write_text(f, tag)?;
            write_children(f, parts, level)?;
            f.write_str(")")
        }
        Expression::Set(set) => {
            f.write_str("(* set")?;
            write_children(f, set.members(), level)?;
            f.write_str(")")
        }
        Expression::Range(range) => {
            write!(f, "(* range {}", range.kind())?;
            for bound in range.bounds() {
                write!(f, " {} ", bound.comparator())?;
                write_text(f, bound.literal())?;
            }
            f.write_str(")")
        }
        Expression::Prefix(pattern) => {
            f.write_str("(* prefix ")?;
            write_text(f, pattern)?;
            f.write_str(")")
        }
        Expression::Suffix(pattern) => {
            f.write_str("(* suffix ")?;
            write_text(f, pattern)?;
            f.write_str(")")
        }
        Expression::Wildcard => f.write_str("(*)"),
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Expression], level: usize) -> fmt::Result {
    if children.iter().all(|child| child.as_atom().is_some()) {
        for child in children {
            f.write_str(" ")?;
            write_expr(f, child, level + 1)?;
        }
        return Ok(());
    }

    for child in children {
        f.write_str("\n")?;
        for _ in 0..=level {
            f.write_str(INDENT)?;
        }
        write_expr(f, child, level + 1)?;
    }
    Ok(())
}

fn write_text(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    let plain = !bytes.is_empty()
        && bytes
            .iter()
            .all(|b| b.is_ascii_graphic() && !matches!(b, b'(' | b')' | b'#'));
    if plain {
        // graphic ASCII is valid UTF-8
        return f.write_str(core::str::from_utf8(bytes).map_err(|_| fmt::Error)?);
    }

    f.write_str("#")?;
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    f.write_str("#")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn render(input: &[u8]) -> String {
        pretty(&parse(input).unwrap())
    }

    #[test]
    fn test_flat_list() {
        assert_eq!(render(b"(6:issuer3:bob)"), "(issuer bob)");
        assert_eq!(render(b"(7:subject)"), "(subject)");
    }

    #[test]
    fn test_nested_list_breaks_lines() {
        assert_eq!(
            render(b"(1:a(1:b(1:c1:d)))"),
            "(a\n  (b\n    (c d)))"
        );
    }

    #[test]
    fn test_star_forms() {
        assert_eq!(
            render(b"(1:*5:range4:ipv42:ge8:10.0.0.02:lt8:10.0.1.0)"),
            "(* range ipv4 ge 10.0.0.0 lt 10.0.1.0)"
        );
        assert_eq!(render(b"(1:*6:prefix6:/home/)"), "(* prefix /home/)");
        assert_eq!(render(b"(1:*6:suffix4:.txt)"), "(* suffix .txt)");
        assert_eq!(render(b"(1:*)"), "(*)");
    }

    #[test]
    fn test_binary_and_spaced_atoms_are_hex() {
        assert_eq!(render(b"2:\x00\xff"), "#00ff#");
        assert_eq!(render(b"3:a b"), "#612062#");
    }

    #[test]
    fn test_display_adapter_matches() {
        let expr = parse(b"(3:tag(1:*3:set1:x(1:y)))").unwrap();
        assert_eq!(alloc::format!("{}", Pretty(&expr)), pretty(&expr));
        assert_eq!(pretty(&expr), "(tag\n  (* set\n    x\n    (y)))");
    }
}
