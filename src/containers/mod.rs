//! Fixed-capacity container primitives
//!
//! The matching engine is built on top of a single container primitive: a
//! fixed-capacity circular FIFO with random-offset access.

pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingBufferIter};
