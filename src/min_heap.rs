use std::fmt;

use thiserror::Error;

/// Initial backing capacity of a queue created with [`MinPriorityQueue::new`].
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,
    #[error("build needs one priority per item: got {items} items and {priorities} priorities")]
    LengthMismatch { items: usize, priorities: usize },
}

#[derive(Debug, Clone)]
struct HeapEntry<T, P> {
    payload: T,
    priority: P,
}

/// Array-backed binary min-heap keyed by an explicit priority.
///
/// The smallest priority is extracted first. Order among equal priorities is unspecified.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<T, P = i64> {
    elements: Vec<HeapEntry<T, P>>,
}

impl<T, P> MinPriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinPriorityQueue {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    /// Iterates over `(item, priority)` in backing-array order, not priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> {
        self.elements.iter().map(|e| (&e.payload, &e.priority))
    }

    pub fn peek(&self) -> Result<&T, QueueError> {
        self.elements
            .first()
            .map(|e| &e.payload)
            .ok_or(QueueError::Empty)
    }
}

impl<T, P: Ord> MinPriorityQueue<T, P> {
    /// Replaces the contents with `items` and heapifies bottom-up in linear time.
    ///
    /// Fails without touching the queue when the two sequences differ in length.
    pub fn build(&mut self, items: Vec<T>, priorities: Vec<P>) -> Result<(), QueueError> {
        if items.len() != priorities.len() {
            return Err(QueueError::LengthMismatch {
                items: items.len(),
                priorities: priorities.len(),
            });
        }
        self.build_from_pairs(items.into_iter().zip(priorities));
        Ok(())
    }

    pub fn build_from_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (T, P)>,
    {
        self.elements.clear();
        self.elements.extend(
            pairs
                .into_iter()
                .map(|(payload, priority)| HeapEntry { payload, priority }),
        );
        let n = self.len();
        for i in (0..n / 2).rev() {
            self.min_heapify(i);
        }
    }

    pub fn is_valid_heap(&self) -> bool {
        (1..self.len()).all(|i| self.elements[Self::parent(i)].priority <= self.elements[i].priority)
    }

    fn min_heapify(&mut self, i: usize) {
        let l = Self::left(i);
        let r = Self::right(i);
        let mut smallest = i;

        if l < self.len() && self.elements[l].priority < self.elements[smallest].priority {
            smallest = l;
        }
        if r < self.len() && self.elements[r].priority < self.elements[smallest].priority {
            smallest = r;
        }

        if smallest != i {
            self.elements.swap(i, smallest);
            self.min_heapify(smallest);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p].priority <= self.elements[i].priority {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn insert(&mut self, item: T, priority: P) {
        if self.len() == self.capacity() {
            // double, starting from one slot
            let extra = self.capacity().max(1);
            self.elements.reserve_exact(extra);
        }
        self.elements.push(HeapEntry {
            payload: item,
            priority,
        });
        self.sift_up(self.len() - 1);
        debug_assert!(self.is_valid_heap());
    }

    pub fn extract_min(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let min = self.elements.swap_remove(0);
        if !self.is_empty() {
            self.min_heapify(0);
        }
        Ok(min.payload)
    }
}

impl<T: PartialEq, P: Ord> MinPriorityQueue<T, P> {
    /// Lowers the priority of the first entry equal to `item`.
    ///
    /// Returns `false` when the item is absent or `new_priority` is greater than its
    /// current priority; the queue is left untouched in both cases.
    pub fn decrease_key(&mut self, item: &T, new_priority: P) -> bool {
        let Some(i) = self.elements.iter().position(|e| e.payload == *item) else {
            return false;
        };
        if new_priority > self.elements[i].priority {
            return false;
        }
        self.elements[i].priority = new_priority;
        self.sift_up(i);
        true
    }
}

impl<T, P> Default for MinPriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display, P: fmt::Display> fmt::Display for MinPriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue (size {}):", self.len())?;
        for (item, priority) in self.iter() {
            write!(f, " [{item}:{priority}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T, P: Ord>(queue: &mut MinPriorityQueue<T, P>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(item) = queue.extract_min() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: MinPriorityQueue<i32> = MinPriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert_eq!(queue.extract_min(), Err(QueueError::Empty));
    }

    #[test]
    fn test_insert_extract_ordering() {
        let mut queue = MinPriorityQueue::new();
        for (item, priority) in [("e", 5), ("a", 1), ("d", 4), ("c", 3), ("b", 2)] {
            queue.insert(item, priority);
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.peek(), Ok(&"a"));
        assert_eq!(drain(&mut queue), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_capacity_doubles_when_full() {
        let mut queue: MinPriorityQueue<u8> = MinPriorityQueue::with_capacity(2);
        let mut next = 0u8;
        while queue.len() < queue.capacity() {
            queue.insert(next, i64::from(next));
            next += 1;
        }
        let before = queue.capacity();
        queue.insert(next, -1);
        assert!(queue.capacity() >= before * 2);
        assert!(queue.len() <= queue.capacity());
    }

    #[test]
    fn test_build_heapifies() {
        let mut queue = MinPriorityQueue::new();
        queue.insert(100, -5);
        queue
            .build(vec![10, 20, 30, 40, 50, 60], vec![9, 3, 7, 1, 8, 2])
            .unwrap();
        assert_eq!(queue.len(), 6);
        assert!(queue.is_valid_heap());
        assert_eq!(drain(&mut queue), vec![40, 60, 20, 30, 50, 10]);
    }

    #[test]
    fn test_build_length_mismatch_leaves_queue() {
        let mut queue = MinPriorityQueue::new();
        queue.insert('x', 1);
        let err = queue.build(vec!['a', 'b'], vec![1]).unwrap_err();
        assert_eq!(err, QueueError::LengthMismatch { items: 2, priorities: 1 });
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek(), Ok(&'x'));
    }

    #[test]
    fn test_decrease_key() {
        let mut queue = MinPriorityQueue::new();
        queue.build(vec![1, 2, 3], vec![10, 20, 30]).unwrap();

        assert!(queue.decrease_key(&3, 5));
        assert_eq!(queue.peek(), Ok(&3));

        // equal priority is accepted
        assert!(queue.decrease_key(&2, 20));
        assert!(!queue.decrease_key(&42, 0));
        assert_eq!(drain(&mut queue), vec![3, 1, 2]);
    }

    #[test]
    fn test_decrease_key_rejects_increase() {
        let mut queue = MinPriorityQueue::new();
        queue.build(vec!['a', 'b'], vec![1, 2]).unwrap();
        let before = queue.to_string();
        assert!(!queue.decrease_key(&'a', 7));
        assert_eq!(queue.to_string(), before);
    }

    #[test]
    fn test_decrease_key_hits_first_duplicate_only() {
        let mut queue = MinPriorityQueue::new();
        queue.build(vec![7, 7], vec![5, 5]).unwrap();
        assert!(queue.decrease_key(&7, 1));
        let priorities: Vec<i64> = queue.iter().map(|(_, p)| *p).collect();
        assert_eq!(priorities, vec![1, 5]);
    }

    #[test]
    fn test_display() {
        let mut queue = MinPriorityQueue::new();
        queue.insert(4, 2);
        queue.insert(9, 1);
        assert_eq!(queue.to_string(), "queue (size 2): [9:1] [4:2]");
    }
}
