//! Error handling for the lzindex crate
//!
//! Every failure surfaced by this crate is a programmer-contract violation,
//! not a transient runtime fault: there is no retry policy, and callers are
//! expected to treat any error as fatal for the enclosing operation.

use thiserror::Error;

/// Main error type for the lzindex crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LzIndexError {
    /// Configuration or constructor parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Description of the invalid parameter
        message: String,
    },

    /// An append was attempted on a ring buffer already at capacity
    #[error("Capacity exceeded: buffer is full at {capacity} elements")]
    CapacityExceeded {
        /// The fixed capacity of the buffer
        capacity: usize,
    },

    /// A read or removal was attempted on an empty collection
    #[error("Empty collection: {operation} on an empty buffer")]
    EmptyCollection {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Trie arena errors (stale or foreign node handles)
    #[error("Trie error: {message}")]
    Trie {
        /// Description of the trie-level violation
        message: String,
    },
}

impl LzIndexError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a capacity exceeded error
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    /// Create an empty collection error
    pub fn empty_collection(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a trie error
    pub fn trie<S: Into<String>>(message: S) -> Self {
        Self::Trie {
            message: message.into(),
        }
    }
}

/// Result type alias for lzindex operations
pub type Result<T> = std::result::Result<T, LzIndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzIndexError::configuration("window_size must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: window_size must be > 0"
        );

        let err = LzIndexError::capacity_exceeded(8);
        assert_eq!(
            err.to_string(),
            "Capacity exceeded: buffer is full at 8 elements"
        );

        let err = LzIndexError::empty_collection("pop_front");
        assert_eq!(
            err.to_string(),
            "Empty collection: pop_front on an empty buffer"
        );

        let err = LzIndexError::out_of_bounds(5, 3);
        assert_eq!(err.to_string(), "Out of bounds: index 5, size 3");

        let err = LzIndexError::trie("stale node handle");
        assert_eq!(err.to_string(), "Trie error: stale node handle");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            LzIndexError::out_of_bounds(1, 0),
            LzIndexError::out_of_bounds(1, 0)
        );
        assert_ne!(
            LzIndexError::capacity_exceeded(4),
            LzIndexError::capacity_exceeded(8)
        );
    }
}
