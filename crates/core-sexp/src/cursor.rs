//! Bounds-checked read position over an owned byte buffer.
//!
//! The cursor has no parsing logic. Reads never advance implicitly; callers
//! call [`Cursor::advance`] after a successful read.

use alloc::vec::Vec;

use crate::error::ParseError;

/// Owned byte buffer plus a read offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    buf: Vec<u8>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor at offset 0
    #[must_use]
    pub fn new(buf: impl Into<Vec<u8>>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Create a cursor at the given offset
    ///
    /// # Errors
    ///
    /// `ParseError::OutOfBounds` if `pos` is past the end of the buffer.
    pub fn at(buf: impl Into<Vec<u8>>, pos: usize) -> Result<Self, ParseError> {
        let buf = buf.into();
        if pos > buf.len() {
            return Err(ParseError::OutOfBounds { offset: pos });
        }
        Ok(Self { buf, pos })
    }

    /// Current read offset
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether every byte has been read
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Next byte without advancing
    ///
    /// # Errors
    ///
    /// `ParseError::OutOfBounds` if no bytes remain.
    pub fn peek(&self) -> Result<u8, ParseError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(ParseError::OutOfBounds { offset: self.pos })
    }

    /// Next `n` bytes without advancing (keyword look-ahead)
    ///
    /// # Errors
    ///
    /// `ParseError::OutOfBounds` if fewer than `n` bytes remain.
    pub fn take_prefix(&self, n: usize) -> Result<&[u8], ParseError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(ParseError::OutOfBounds { offset: self.pos })?;
        self.slice(self.pos, end)
    }

    /// Bytes in `begin..end`
    ///
    /// # Errors
    ///
    /// `ParseError::OutOfBounds` if the range is inverted or past the end.
    pub fn slice(&self, begin: usize, end: usize) -> Result<&[u8], ParseError> {
        if begin > end {
            return Err(ParseError::OutOfBounds { offset: begin });
        }
        self.buf
            .get(begin..end)
            .ok_or(ParseError::OutOfBounds { offset: end })
    }

    /// Move the offset forward by `n` bytes
    ///
    /// # Errors
    ///
    /// `ParseError::OutOfBounds` if that would pass the end of the buffer.
    pub fn advance(&mut self, n: usize) -> Result<(), ParseError> {
        if n > self.remaining() {
            return Err(ParseError::OutOfBounds {
                offset: self.buf.len(),
            });
        }
        self.pos += n;
        Ok(())
    }

    /// Whole underlying buffer
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
