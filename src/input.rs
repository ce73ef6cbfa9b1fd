//! Input byte FIFO capability
//!
//! The matching engine consumes pending input through this small capability
//! trait rather than owning a concrete buffer type. The engine's contract is
//! that it calls [`ByteSource::next`] exactly as many times as it reports
//! bytes matched, and never mutates the source any other way.

use crate::error::{LzIndexError, Result};
use std::collections::VecDeque;

/// A peekable, consumable FIFO of pending input bytes
pub trait ByteSource {
    /// Returns true if at least one byte is pending
    fn has_pending(&self) -> bool;

    /// Returns the front byte without consuming it
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::EmptyCollection` if the source is exhausted.
    fn peek(&self) -> Result<u8>;

    /// Consumes and returns the front byte
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::EmptyCollection` if the source is exhausted.
    fn next(&mut self) -> Result<u8>;
}

impl ByteSource for VecDeque<u8> {
    fn has_pending(&self) -> bool {
        !self.is_empty()
    }

    fn peek(&self) -> Result<u8> {
        self.front()
            .copied()
            .ok_or(LzIndexError::empty_collection("peek"))
    }

    fn next(&mut self) -> Result<u8> {
        self.pop_front()
            .ok_or(LzIndexError::empty_collection("next"))
    }
}

/// Zero-copy [`ByteSource`] over a borrowed byte slice
///
/// # Examples
///
/// ```rust
/// use lzindex::{ByteSource, SliceSource};
///
/// let mut src = SliceSource::new(b"ab");
/// assert_eq!(src.peek()?, b'a');
/// assert_eq!(src.next()?, b'a');
/// assert_eq!(src.remaining(), 1);
/// # Ok::<(), lzindex::LzIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source reading `data` front to back
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes not yet consumed
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Number of bytes consumed so far
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn has_pending(&self) -> bool {
        self.pos < self.data.len()
    }

    fn peek(&self) -> Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(LzIndexError::empty_collection("peek"))
    }

    fn next(&mut self) -> Result<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_consumes_in_order() {
        let mut src = SliceSource::new(b"abc");
        assert!(src.has_pending());
        assert_eq!(src.peek().unwrap(), b'a');
        assert_eq!(src.next().unwrap(), b'a');
        assert_eq!(src.next().unwrap(), b'b');
        assert_eq!(src.consumed(), 2);
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.next().unwrap(), b'c');
        assert!(!src.has_pending());
        assert!(matches!(
            src.next(),
            Err(LzIndexError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let src = SliceSource::new(b"z");
        assert_eq!(src.peek().unwrap(), b'z');
        assert_eq!(src.peek().unwrap(), b'z');
        assert_eq!(src.remaining(), 1);
    }

    #[test]
    fn test_vecdeque_source() {
        let mut src: VecDeque<u8> = VecDeque::from(vec![1, 2]);
        assert_eq!(ByteSource::peek(&src).unwrap(), 1);
        assert_eq!(ByteSource::next(&mut src).unwrap(), 1);
        assert_eq!(ByteSource::next(&mut src).unwrap(), 2);
        assert!(!src.has_pending());
        assert!(matches!(
            ByteSource::peek(&src),
            Err(LzIndexError::EmptyCollection { .. })
        ));
    }
}
