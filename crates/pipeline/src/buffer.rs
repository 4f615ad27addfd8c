//! Bounded record buffer
//!
//! A fixed-capacity FIFO ring between the reader loops (producers) and
//! the drain workers (consumers). Both operations are non-blocking by
//! contract: `try_push` rejects when full instead of overwriting or
//! waiting, and `try_pop` returns `None` when empty. All state lives
//! behind one mutex; operations are O(1).

use parking_lot::Mutex;

/// Bounded multi-producer multi-consumer FIFO
///
/// Indices satisfy `(write - read) mod capacity == count` while the
/// buffer is not full; `count == capacity` marks the full state.
pub struct RingBuffer<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    slots: Vec<Option<T>>,
    read: usize,
    write: usize,
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Create a buffer holding at most `capacity` items
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (configuration validates this long
    /// before a buffer is built).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be > 0");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            capacity,
            inner: Mutex::new(Inner {
                slots,
                read: 0,
                write: 0,
                count: 0,
            }),
        }
    }

    /// Append an item without blocking
    ///
    /// Returns the item back when the buffer is full; the buffer is left
    /// untouched and no slot is overwritten.
    pub fn try_push(&self, item: T) -> std::result::Result<(), T> {
        let mut inner = self.inner.lock();

        if inner.count == self.capacity {
            return Err(item);
        }

        let write = inner.write;
        inner.slots[write] = Some(item);
        inner.write = (write + 1) % self.capacity;
        inner.count += 1;
        Ok(())
    }

    /// Remove the oldest item without blocking
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();

        if inner.count == 0 {
            return None;
        }

        let read = inner.read;
        let item = inner.slots[read].take();
        inner.read = (read + 1) % self.capacity;
        inner.count -= 1;

        debug_assert!(item.is_some(), "counted slot was empty");
        item
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.inner.lock().count
    }

    /// Whether the buffer holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the next `try_push` would be rejected
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Maximum number of items
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> std::fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;
