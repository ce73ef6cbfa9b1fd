//! Fixed-capacity circular FIFO buffer
//!
//! The backing slab is allocated once at construction and never resized;
//! all operations are O(1) with indices wrapping via modular arithmetic.
//! This is the primitive underneath both the sliding window and the
//! current-match accumulator of the suffix trie index.

use crate::error::{LzIndexError, Result};
use std::fmt;
use std::mem::MaybeUninit;

/// Fixed-capacity circular FIFO with random-offset peek and update
///
/// Unlike `VecDeque`, the capacity is fixed at construction: an append on a
/// full buffer is an error, never a reallocation. This makes the buffer
/// suitable for sliding-window bookkeeping where silent growth would corrupt
/// length accounting.
///
/// # Examples
///
/// ```rust
/// use lzindex::RingBuffer;
///
/// let mut buf: RingBuffer<u8> = RingBuffer::with_capacity(4)?;
/// buf.push_back(b'a')?;
/// buf.push_back(b'b')?;
///
/// assert_eq!(*buf.front()?, b'a');
/// assert_eq!(*buf.get(1)?, b'b');
/// assert_eq!(buf.pop_front()?, b'a');
/// assert_eq!(buf.len(), 1);
/// # Ok::<(), lzindex::LzIndexError>(())
/// ```
pub struct RingBuffer<T> {
    /// Ring slab; slots outside `[head, head + len)` (mod capacity) are uninit
    buffer: Box<[MaybeUninit<T>]>,
    /// Read position
    head: usize,
    /// Number of live elements
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with the given fixed capacity
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::Configuration` if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LzIndexError::configuration(
                "ring buffer capacity must be > 0",
            ));
        }

        let buffer = (0..capacity)
            .map(|_| MaybeUninit::uninit())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            buffer,
            head: 0,
            len: 0,
        })
    }

    /// Returns the fixed capacity of the buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the current number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the buffer is at capacity
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical slot index for a logical offset from the front
    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }

    /// Appends an element at the logical end
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::CapacityExceeded` if the buffer is full. The
    /// buffer is never grown or truncated on overflow.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(LzIndexError::capacity_exceeded(self.capacity()));
        }

        let tail = self.slot(self.len);
        self.buffer[tail].write(value);
        self.len += 1;
        Ok(())
    }

    /// Returns a reference to the front element
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::EmptyCollection` if the buffer is empty.
    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(LzIndexError::empty_collection("front"));
        }

        // SAFETY: head is a live slot when len > 0
        Ok(unsafe { self.buffer[self.head].assume_init_ref() })
    }

    /// Returns a reference to the element `offset` positions from the front
    ///
    /// Offset 0 is the front element.
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::OutOfBounds` if `offset >= len`.
    pub fn get(&self, offset: usize) -> Result<&T> {
        if offset >= self.len {
            return Err(LzIndexError::out_of_bounds(offset, self.len));
        }

        let idx = self.slot(offset);
        // SAFETY: offset < len, so the slot is live
        Ok(unsafe { self.buffer[idx].assume_init_ref() })
    }

    /// Removes and returns the front element
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::EmptyCollection` if the buffer is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(LzIndexError::empty_collection("pop_front"));
        }

        // SAFETY: head is a live slot when len > 0; the slot is marked dead
        // by advancing head before anything can observe it again
        let value = unsafe { self.buffer[self.head].assume_init_read() };
        self.head = self.slot(1);
        self.len -= 1;
        Ok(value)
    }

    /// Overwrites the element at `offset` from the front, keeping the length
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::OutOfBounds` if `offset >= len`.
    pub fn set(&mut self, offset: usize, value: T) -> Result<()> {
        if offset >= self.len {
            return Err(LzIndexError::out_of_bounds(offset, self.len));
        }

        let idx = self.slot(offset);
        // SAFETY: offset < len, so the slot holds a live value to replace
        unsafe { self.buffer[idx].assume_init_drop() };
        self.buffer[idx].write(value);
        Ok(())
    }

    /// Resets the buffer to empty, dropping all contents
    pub fn clear(&mut self) {
        for offset in 0..self.len {
            let idx = self.slot(offset);
            // SAFETY: every offset < len is a live slot
            unsafe { self.buffer[idx].assume_init_drop() };
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates the elements front-to-back without consuming them
    pub fn iter(&self) -> RingBufferIter<'_, T> {
        RingBufferIter {
            ring: self,
            offset: 0,
        }
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity())
            .expect("capacity of an existing buffer is nonzero");
        for item in self.iter() {
            copy.push_back(item.clone())
                .expect("clone target has identical capacity");
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`RingBuffer`]
pub struct RingBufferIter<'a, T> {
    ring: &'a RingBuffer<T>,
    offset: usize,
}

impl<'a, T> Iterator for RingBufferIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.offset >= self.ring.len {
            return None;
        }

        let idx = self.ring.slot(self.offset);
        self.offset += 1;
        // SAFETY: offset was < len, so the slot is live
        Some(unsafe { self.ring.buffer[idx].assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for RingBufferIter<'_, T> {}
