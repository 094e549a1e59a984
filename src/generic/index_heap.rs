/*!
A max-heap over a subset of indices with fixed, revaluable, values.

In other words, a heap backed by a vector of values which stays put, with a companion
vector tracking where each index currently sits on the heap.
Indices may be moved on and off the heap while their values persist, which makes the
structure a useful store of atom activities: any atom without a value is *active* on
the heap, and the most active of these can be taken without a search.

Ties on value are broken towards the smaller index, so a sequence of pops with equal
values is in index order.

```rust
# use magpie_sat::generic::index_heap::ActivityHeap;
let mut heap = ActivityHeap::default();

heap.add(0);
heap.add(1);
heap.add(2);

heap.revalue(1, 10.0);

heap.activate(0);
heap.activate(1);
heap.activate(2);

assert_eq!(heap.pop_max(), Some(1));
assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(2));
assert_eq!(heap.pop_max(), None);
```
*/

use crate::config::Activity;

/// A max-heap of indices, ordered by activity and then by (reverse) index.
#[derive(Default)]
pub struct ActivityHeap {
    /// The value of each index, whether or not the index is on the heap.
    values: Vec<Activity>,

    /// The heap, as indices into `values`.
    heap: Vec<usize>,

    /// Where each index sits on the heap, if it does.
    positions: Vec<Option<usize>>,
}

impl ActivityHeap {
    /// Indexes a fresh value of zero, off the heap.
    ///
    /// The structure grows as required for `index` to be a (transparent) index.
    pub fn add(&mut self, index: usize) {
        while self.values.len() <= index {
            self.values.push(Activity::default());
            self.positions.push(None);
        }
    }

    /// The value at `index`.
    pub fn value_at(&self, index: usize) -> Activity {
        self.values[index]
    }

    /// Sets the value of `index` and restores heap order, if the index is active.
    pub fn revalue(&mut self, index: usize, value: Activity) {
        self.values[index] = value;
        if let Some(heap_index) = self.positions[index] {
            let heap_index = self.sift_up(heap_index);
            self.sift_down(heap_index);
        }
    }

    /// Multiplies every value by `factor` and restores heap order.
    ///
    /// Relative order is preserved for any positive factor, so a single pass suffices.
    pub fn scale_all(&mut self, factor: Activity) {
        for value in self.values.iter_mut() {
            *value *= factor;
        }
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if the index was placed, false otherwise.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.positions[index] {
            Some(_) => false,
            None => {
                let heap_index = self.heap.len();
                self.heap.push(index);
                self.positions[index] = Some(heap_index);
                self.sift_up(heap_index);
                true
            }
        }
    }

    /// Removes and returns the index with the maximum value, if the heap is non-empty.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max_index = *self.heap.first()?;
        self.positions[max_index] = None;

        let last = self.heap.pop().expect("a first element was read");
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.positions[last] = Some(0);
            self.sift_down(0);
        }

        Some(max_index)
    }

    /// True if the index at `a` takes priority over the index at `b`.
    fn precedes(&self, a: usize, b: usize) -> bool {
        let (value_a, value_b) = (self.values[a], self.values[b]);
        value_a > value_b || (value_a == value_b && a < b)
    }

    /// Swaps two heap slots, keeping positions in sync.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = Some(a);
        self.positions[self.heap[b]] = Some(b);
    }

    /// Moves the element at `heap_index` up until its parent takes priority.
    /// Returns the final heap position of the element.
    fn sift_up(&mut self, mut heap_index: usize) -> usize {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.precedes(self.heap[heap_index], self.heap[parent]) {
                self.swap_slots(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
        heap_index
    }

    /// Moves the element at `heap_index` down below any child which takes priority.
    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            if left >= self.heap.len() {
                break;
            }

            let mut candidate = left;
            let right = left + 1;
            if right < self.heap.len() && self.precedes(self.heap[right], self.heap[left]) {
                candidate = right;
            }

            if self.precedes(self.heap[candidate], self.heap[heap_index]) {
                self.swap_slots(heap_index, candidate);
                heap_index = candidate;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod heap_tests {
    use super::*;

    fn heap_of(values: &[Activity]) -> ActivityHeap {
        let mut heap = ActivityHeap::default();
        for (index, value) in values.iter().enumerate() {
            heap.add(index);
            heap.revalue(index, *value);
            heap.activate(index);
        }
        heap
    }

    #[test]
    fn pops_in_value_order() {
        let mut heap = heap_of(&[10.0, 60.0, 30.0, 70.0]);

        assert_eq!(heap.pop_max(), Some(3));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn ties_resolve_to_the_smaller_index() {
        let mut heap = heap_of(&[1.0, 1.0, 1.0]);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(2));
    }

    #[test]
    fn revalue_while_active() {
        let mut heap = heap_of(&[5.0, 1.0, 3.0]);

        heap.revalue(1, 9.0);
        assert_eq!(heap.pop_max(), Some(1));

        heap.revalue(0, 0.0);
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn reactivation_is_stable() {
        let mut heap = heap_of(&[2.0, 4.0]);

        assert_eq!(heap.pop_max(), Some(1));
        assert!(heap.activate(1));
        assert!(!heap.activate(0));

        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn scaling_preserves_order() {
        let mut heap = heap_of(&[2.0, 8.0, 4.0]);
        heap.scale_all(1e-3);

        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(0));
    }
}
