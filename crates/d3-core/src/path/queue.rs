//! Indexed min-priority queue
//!
//! A binary heap plus a position map, so membership tests and priority
//! updates are cheap. Items with equal priority come out in insertion order,
//! and an item keeps its place in that order when its priority changes.

use core::cmp::Ordering;
use core::hash::Hash;

use hashbrown::HashMap;

#[derive(Debug, Clone, Copy)]
struct Slot<T> {
    item: T,
    priority: f64,
    seq: u64,
}

impl<T> Slot<T> {
    fn before(&self, other: &Self) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// Min-priority queue keyed by item
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T> {
    heap: Vec<Slot<T>>,
    /// item -> index in `heap`
    positions: HashMap<T, usize>,
    next_seq: u64,
}

impl<T: Copy + Eq + Hash> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> IndexedPriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Current priority of a queued item
    pub fn priority(&self, item: &T) -> Option<f64> {
        self.positions.get(item).map(|&i| self.heap[i].priority)
    }

    /// Add an item. If it is already queued, its priority is updated instead.
    pub fn enqueue(&mut self, item: T, priority: f64) {
        if self.update_priority(&item, priority) {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { item, priority, seq });
        let index = self.heap.len() - 1;
        self.positions.insert(item, index);
        self.sift_up(index);
    }

    /// Remove and return the item with the lowest priority
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        self.positions.remove(&slot.item);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(slot.item)
    }

    /// The item `dequeue` would return next
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|slot| &slot.item)
    }

    /// Change the priority of a queued item. Returns false if it is not queued.
    pub fn update_priority(&mut self, item: &T, priority: f64) -> bool {
        let Some(&index) = self.positions.get(item) else {
            return false;
        };
        let old = self.heap[index].priority;
        self.heap[index].priority = priority;
        if priority < old {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        true
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.next_seq = 0;
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].item, a);
        self.positions.insert(self.heap[b].item, b);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.heap[index].before(&self.heap[parent]) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.heap[left].before(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].before(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut IndexedPriorityQueue<u32>) -> Vec<u32> {
        core::iter::from_fn(|| queue.dequeue()).collect()
    }

    #[test]
    fn test_dequeues_in_priority_order() {
        let mut queue = IndexedPriorityQueue::new();
        for p in [5, 1, 3, 2, 4] {
            queue.enqueue(p, p as f64);
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(drain(&mut queue), vec![1, 2, 3, 4, 5]);
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_update_priority_takes_effect() {
        let mut queue = IndexedPriorityQueue::new();
        queue.enqueue(10, 5.0);
        queue.enqueue(20, 1.0);
        queue.enqueue(30, 3.0);
        assert!(queue.update_priority(&10, 0.5));
        assert_eq!(queue.priority(&10), Some(0.5));
        assert_eq!(queue.dequeue(), Some(10));
        assert!(queue.update_priority(&20, 9.0));
        assert_eq!(drain(&mut queue), vec![30, 20]);
        assert!(!queue.update_priority(&20, 1.0));
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut queue = IndexedPriorityQueue::new();
        for item in [7, 3, 9, 1, 5] {
            queue.enqueue(item, 2.0);
        }
        assert_eq!(drain(&mut queue), vec![7, 3, 9, 1, 5]);
    }

    #[test]
    fn test_update_keeps_insertion_rank() {
        let mut queue = IndexedPriorityQueue::new();
        queue.enqueue(1, 4.0);
        queue.enqueue(2, 2.0);
        queue.enqueue(3, 2.0);
        // 1 was queued first, so it wins the tie after moving to 2.0
        queue.update_priority(&1, 2.0);
        assert_eq!(drain(&mut queue), vec![1, 2, 3]);
    }

    #[test]
    fn test_contains_and_clear() {
        let mut queue = IndexedPriorityQueue::with_capacity(4);
        queue.enqueue(1, 1.0);
        queue.enqueue(2, 2.0);
        assert!(queue.contains(&1));
        assert_eq!(queue.peek(), Some(&1));
        queue.dequeue();
        assert!(!queue.contains(&1));
        queue.clear();
        assert!(!queue.contains(&2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_enqueue_existing_updates() {
        let mut queue = IndexedPriorityQueue::new();
        queue.enqueue(1, 3.0);
        queue.enqueue(2, 2.0);
        queue.enqueue(1, 1.0);
        assert_eq!(queue.len(), 2);
        assert_eq!(drain(&mut queue), vec![1, 2]);
    }

    #[test]
    fn test_many_items_sorted() {
        let mut queue = IndexedPriorityQueue::new();
        for i in 0..200u32 {
            queue.enqueue(i, ((i * 7919) % 211) as f64);
        }
        let mut last = f64::NEG_INFINITY;
        while let Some(item) = queue.dequeue() {
            let p = ((item * 7919) % 211) as f64;
            assert!(p >= last);
            last = p;
        }
    }
}
