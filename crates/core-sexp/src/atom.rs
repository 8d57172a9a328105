//! Length-prefixed atom reader and writer: `<digits>:<payload>`.

use alloc::format;
use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::limits::ParseLimits;

/// Separator between the length prefix and the payload
pub const LENGTH_SEPARATOR: u8 = b':';

/// Read one atom, advancing the cursor past its payload
///
/// The payload is taken verbatim; there is no escaping in canonical form.
///
/// # Errors
///
/// * `ParseError::MalformedLength` - no digits, no ':' after the digits,
///   a length that overflows, or a zero length when empty atoms are not allowed
/// * `ParseError::Truncated` - fewer than `length` bytes remain
/// * `ParseError::AtomTooLong` - payload longer than `limits.max_atom_length`
pub fn read_atom(cursor: &mut Cursor, limits: &ParseLimits) -> Result<Vec<u8>, ParseError> {
    let start = cursor.position();
    let length = read_length(cursor)?;

    if length == 0 && !limits.allow_empty_atoms {
        return Err(ParseError::MalformedLength {
            offset: start,
            reason: "zero-length atom",
        });
    }
    if length > cursor.remaining() {
        return Err(ParseError::Truncated {
            offset: cursor.position(),
            needed: length,
            remaining: cursor.remaining(),
        });
    }
    if length > limits.max_atom_length {
        return Err(ParseError::AtomTooLong {
            max: limits.max_atom_length,
            length,
        });
    }

    let payload = cursor.take_prefix(length)?.to_vec();
    cursor.advance(length)?;
    Ok(payload)
}

/// Read the decimal length prefix and its ':' separator
fn read_length(cursor: &mut Cursor) -> Result<usize, ParseError> {
    let start = cursor.position();
    let mut length: usize = 0;
    let mut digits = 0usize;

    while let Ok(byte) = cursor.peek() {
        if !byte.is_ascii_digit() {
            break;
        }
        length = length
            .checked_mul(10)
            .and_then(|n| n.checked_add(usize::from(byte - b'0')))
            .ok_or(ParseError::MalformedLength {
                offset: start,
                reason: "length overflows",
            })?;
        digits += 1;
        cursor.advance(1)?;
    }

    if digits == 0 {
        return Err(ParseError::MalformedLength {
            offset: start,
            reason: "no digit found",
        });
    }
    match cursor.peek() {
        Ok(LENGTH_SEPARATOR) => cursor.advance(1)?,
        _ => {
            return Err(ParseError::MalformedLength {
                offset: cursor.position(),
                reason: "expected ':' after length",
            })
        }
    }
    Ok(length)
}

/// Append the canonical encoding of `bytes` to `out`
pub fn write_atom(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(format!("{}:", bytes.len()).as_bytes());
    out.extend_from_slice(bytes);
}
