//! Fixed-Size Circular Buffer for Channel History
//!
//! ## Overview
//!
//! Each channel keeps its last `N` readings in a ring that overwrites the
//! oldest entry when full. Capacity is a const generic, so the storage lives
//! inline in the channel and nothing is allocated after boot.
//!
//! ## Why Not `heapless::HistoryBuf`?
//!
//! `HistoryBuf` is close, but the store needs two things it does not give:
//!
//! 1. **Eviction Reporting**: `push` hands back the reading it overwrote, so
//!    the channel can trace what left the health window.
//! 2. **Logical Indexing**: oldest-to-newest access without caring where the
//!    write cursor happens to sit.
//!
//! ## Memory Layout
//!
//! ```text
//! CircularBuffer<Reading, 5> after 7 pushes (r0..r6):
//! ┌────┬────┬────┬────┬────┐
//! │ r5 │ r6 │ r2 │ r3 │ r4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             write_pos = 2 (oldest, next to be overwritten)
//!
//! Logical view (iter): r2, r3, r4, r5, r6
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use precharge_core::buffer::CircularBuffer;
//!
//! let mut history: CircularBuffer<u32, 3> = CircularBuffer::new();
//! history.push(1);
//! history.push(2);
//! history.push(3);
//!
//! // Full: the oldest value is handed back
//! assert_eq!(history.push(4), Some(1));
//! assert_eq!(history.last(), Some(&4));
//! assert!(history.iter().copied().eq([2, 3, 4]));
//! ```

/// Fixed-size ring of `N` items, oldest overwritten first
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - slots `[0, len)` are `Some` until the buffer first wraps, after which all
///   `N` slots are `Some`
///
/// ## Thread Safety
///
/// Not synchronized. Share it between an interrupt and the main loop through
/// [`crate::shared::SharedSampleStore`].
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage; `None` marks a slot never written since the last clear
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Number of valid items
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "CircularBuffer capacity must be non-zero");

    /// Create an empty buffer. Usable in `static` initializers.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Append an item, returning the one it evicted when full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.data[self.write_pos]
        } else {
            None
        };

        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }

        evicted
    }

    /// Number of stored items
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next push will evict
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of items
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent item
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Oldest item
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Item at logical `index` (0 = oldest, `len - 1` = newest).
    ///
    /// Until the buffer wraps, logical and physical indices match. Once full,
    /// the oldest item sits at `write_pos`:
    ///
    /// ```text
    /// physical: [D, E, A, B, C]  write_pos = 2
    /// logical:  [A, B, C, D, E]  logical[i] = physical[(2 + i) % 5]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest-to-newest iterator over a [`CircularBuffer`]
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<'a, T: Copy, const N: usize> IntoIterator for &'a CircularBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = CircularBufferIter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<f32, 5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.last().is_none());
        assert!(buffer.first().is_none());
        assert_eq!(buffer.iter().count(), 0);
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = CircularBuffer::<f32, 5>::new();

        assert_eq!(buffer.push(25.0), None);
        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.last(), Some(&25.0));
        assert_eq!(buffer.first(), Some(&25.0));
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::<u32, 3>::new();

        let evicted: Vec<Option<u32>> = (0..5).map(|i| buffer.push(i)).collect();
        assert_eq!(evicted, vec![None, None, None, Some(0), Some(1)]);

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(buffer.first(), Some(&2));
        assert_eq!(buffer.last(), Some(&4));
    }

    #[test]
    fn iterator_reports_exact_size() {
        let mut buffer = CircularBuffer::<u8, 4>::new();
        for i in 0..6 {
            buffer.push(i);
        }

        let mut iter = buffer.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut buffer = CircularBuffer::<u8, 2>::new();
        buffer.push(1);
        buffer.push(2);
        buffer.push(3);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.last().is_none());

        // Refilling after a clear must not resurrect old slots
        assert_eq!(buffer.push(9), None);
        let values: Vec<u8> = buffer.iter().copied().collect();
        assert_eq!(values, vec![9]);
    }
}
