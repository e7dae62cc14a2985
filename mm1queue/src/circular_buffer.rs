//! Fixed-capacity FIFO over an array of slots.
//!
//! `head` is the slot of the next item to dequeue, `tail` the next free slot
//! for enqueue. Both wrap around modulo the capacity. An empty queue and a
//! full queue both have `head == tail`; they are told apart by whether the
//! slot at `head` is occupied.

use std::fmt;

use tracing::debug;

use crate::error::{ConfigError, QueueError};

#[derive(Debug, Clone)]
pub struct BoundedCircularQueue<T> {
    slots: Vec<Option<T>>,
    capacity: usize,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> BoundedCircularQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(BoundedCircularQueue {
            slots: (0..capacity).map(|_| None).collect(),
            capacity,
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    /// Appends `item` at the tail.
    ///
    /// Returns `Overflow` when the slot following the new item is already
    /// occupied, i.e. the item was stored and the buffer is now full. A call
    /// on a buffer that is full on entry also returns `Overflow`; in that case
    /// the item is dropped and the stored items are left untouched.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.slots[self.tail].is_some() {
            return Err(QueueError::Overflow {
                capacity: self.capacity,
            });
        }
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.capacity;
        self.len += 1;

        // next slot must be empty, otherwise overflow
        if self.slots[self.tail].is_some() {
            Err(QueueError::Overflow {
                capacity: self.capacity,
            })
        } else {
            Ok(())
        }
    }

    /// Removes the oldest item. An empty queue yields `None` and is left as is.
    pub fn dequeue(&mut self) -> Option<T> {
        let item = self.slots[self.head].take()?;
        self.head = (self.head + 1) % self.capacity;
        self.len -= 1;
        Some(item)
    }

    /// Evicts items from the head (oldest first) until at most `limit`
    /// remain. Returns the number of evicted items.
    pub fn truncate_to(&mut self, limit: usize) -> usize {
        let mut evicted = 0;
        while self.len > limit && self.slots[self.head].is_some() {
            self.slots[self.head] = None;
            self.head = (self.head + 1) % self.capacity;
            self.len -= 1;
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, limit, "truncated queue");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Items from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(move |offset| {
            self.slots[(self.head + offset) % self.capacity].as_ref()
        })
    }

    /// Raw slot view in storage order, wraparound included.
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    /// One character per slot: `*` for occupied, a space for empty.
    pub fn occupancy(&self) -> String {
        self.slots
            .iter()
            .map(|slot| if slot.is_some() { '*' } else { ' ' })
            .collect()
    }
}

impl<T> fmt::Display for BoundedCircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {} {}", self.occupancy(), self.len)
    }
}
