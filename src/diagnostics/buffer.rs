// SPDX-License-Identifier: MPL-2.0
//! Circular buffer implementation for diagnostic event storage.
//!
//! This module provides a memory-bounded ring buffer that automatically
//! evicts the oldest entries when capacity is reached.

use crate::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};
use std::collections::VecDeque;

/// Buffer capacity for diagnostic events, clamped to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        ))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

/// A generic circular buffer with fixed capacity.
///
/// When the buffer is full, pushing a new element evicts the oldest one.
/// Elements are stored in chronological order (oldest first).
///
/// # Example
///
/// ```
/// use iced_toasts::diagnostics::CircularBuffer;
///
/// let mut buffer: CircularBuffer<i32> = CircularBuffer::with_raw_capacity(2);
///
/// buffer.push(1);
/// buffer.push(2);
/// buffer.push(3);
///
/// let items: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(items, vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates a new circular buffer with the specified capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a new circular buffer with a raw capacity value.
    ///
    /// This is useful for testing with small capacities.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an element to the buffer, evicting the oldest if at capacity.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Returns an iterator over the elements in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_capacity_clamps_to_valid_range() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            BufferCapacity::new(1_000_000).value(),
            MAX_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn circular_buffer_overflow_evicts_oldest() {
        let mut buffer: CircularBuffer<i32> = CircularBuffer::with_raw_capacity(3);

        buffer.push(1);
        buffer.push(2);
        buffer.push(3);
        buffer.push(4); // Evicts 1
        buffer.push(5); // Evicts 2

        let items: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(items, vec![3, 4, 5]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn circular_buffer_clear_keeps_capacity() {
        let mut buffer: CircularBuffer<i32> = CircularBuffer::with_raw_capacity(5);
        buffer.push(1);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    fn zero_capacity_still_holds_one_item() {
        let mut buffer: CircularBuffer<&str> = CircularBuffer::with_raw_capacity(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }
}
