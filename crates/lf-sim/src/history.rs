//! Fixed-capacity ring buffer for snapshot history.

/// Keeps the most recent `capacity` items; pushing onto a full buffer
/// overwrites the oldest slot in O(1).
#[derive(Clone, Debug)]
pub struct History<T> {
    slots: Vec<T>,
    /// Index of the oldest item once the buffer is full.
    head: usize,
    capacity: usize,
}

impl<T> History<T> {
    /// `capacity` of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(item);
        } else {
            self.slots[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }

    pub fn latest(&self) -> Option<&T> {
        if self.slots.is_empty() {
            return None;
        }
        let i = (self.head + self.slots.len() - 1) % self.slots.len();
        self.slots.get(i)
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }
}
