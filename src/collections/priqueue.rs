/*
 * Copyright (c) 2018-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Addressable priority queues.

use crate::num::traits::{FromPrimitive, ToPrimitive};

/// A priority queue of key-value pairs with updatable values.
pub trait ItemPriQueue<K, V> {
    /// Handle for an item in the queue.
    type Item;

    /// Return `true` iff the queue contains no element.
    fn is_empty(&self) -> bool;

    /// Remove all elements from the queue.
    fn clear(&mut self);

    /// Push the element with given `key` and `value` onto the queue.
    ///
    /// Return a handle referencing the element. That handle can be used in a
    /// subsequent call to `decrease_key`.
    fn push(&mut self, key: K, value: V) -> Self::Item;

    /// Decrease the value of some item in the queue.
    ///
    /// Returns `true` if the new value is smaller than the old one.
    fn decrease_key(&mut self, item: &mut Self::Item, value: V) -> bool;

    /// Remove and return the element with the smallest value from the queue or `None` if
    /// the queue is empty.
    fn pop_min(&mut self) -> Option<(K, V)>;

    /// Return the current value associated with some item in the queue.
    fn value(&self, item: &Self::Item) -> &V;
}

/// Heap item information.
struct BinHeapItem<K, V, ID> {
    /// The key associated with this item.
    key: K,
    /// The value (priority) of the item.
    value: V,
    /// Position of this element on the heap. If this element is *not*
    /// on the heap, its the index of the next element in the free
    /// list.
    pos: ID,
}

/// A binary heap with stable item handles.
///
/// Data slots of popped items are recycled through a free list, so a
/// handle stays valid until its item has been popped.
pub struct BinHeap<K, V, ID = u32> {
    /// The heap elements.
    heap: Vec<ID>,
    /// The key, value and heap-index for each element.
    data: Vec<BinHeapItem<K, V, ID>>,
    /// First free item.
    free: Option<ID>,
}

impl<K, V> BinHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<K, V, ID> Default for BinHeap<K, V, ID> {
    fn default() -> Self {
        BinHeap {
            heap: vec![],
            data: vec![],
            free: None,
        }
    }
}

impl<K, V, ID> ItemPriQueue<K, V> for BinHeap<K, V, ID>
where
    K: Clone,
    V: PartialOrd + Clone,
    ID: FromPrimitive + ToPrimitive + Copy + Eq,
{
    type Item = ID;

    fn clear(&mut self) {
        self.heap.clear();
        self.data.clear();
        self.free = None;
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn value(&self, item: &ID) -> &V {
        &self.data[item.to_usize().unwrap()].value
    }

    fn push(&mut self, key: K, value: V) -> ID {
        let pos = ID::from_usize(self.heap.len()).unwrap();
        let item = if let Some(item) = self.free {
            let idx = item.to_usize().unwrap();
            // unlink from the free list
            let next = self.data[idx].pos;
            self.free = if next == item { None } else { Some(next) };
            self.data[idx] = BinHeapItem { key, value, pos };
            item
        } else {
            let item = ID::from_usize(self.data.len()).unwrap();
            self.data.push(BinHeapItem { key, value, pos });
            item
        };
        self.heap.push(item);
        self.upheap(item);
        item
    }

    fn decrease_key(&mut self, item: &mut ID, value: V) -> bool {
        let idx = item.to_usize().unwrap();
        if self.data[idx].value > value {
            self.data[idx].value = value;
            self.upheap(*item);
            true
        } else {
            false
        }
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }

        // remove the smallest element from the heap
        let min_item = self.heap.swap_remove(0);
        let min_idx = min_item.to_usize().unwrap();
        // put its data slot on the free list
        self.data[min_idx].pos = self.free.unwrap_or(min_item);
        self.free = Some(min_item);

        if let Some(&item) = self.heap.first() {
            self.data[item.to_usize().unwrap()].pos = ID::from_usize(0).unwrap();
            self.downheap(item);
        }

        Some((self.data[min_idx].key.clone(), self.data[min_idx].value.clone()))
    }
}

impl<K, V, ID> BinHeap<K, V, ID>
where
    V: PartialOrd + Clone,
    ID: FromPrimitive + ToPrimitive + Copy + Eq,
{
    /// Move the element `item` up in the heap until its parent has a
    /// strictly smaller value or the root is reached.
    ///
    /// The item moves past parents with an equal value, so the newest
    /// of equal-valued items ends up on top.
    fn upheap(&mut self, item: ID) {
        let idx = item.to_usize().unwrap();
        let value = self.data[idx].value.clone();
        let mut cur_pos = self.data[idx].pos.to_usize().unwrap();
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent_idx = self.heap[parent_pos].to_usize().unwrap();
            if value > self.data[parent_idx].value {
                break;
            }
            self.heap[cur_pos] = self.heap[parent_pos];
            self.data[parent_idx].pos = ID::from_usize(cur_pos).unwrap();
            cur_pos = parent_pos;
        }
        self.data[idx].pos = ID::from_usize(cur_pos).unwrap();
        self.heap[cur_pos] = item;
    }

    /// Move the element `item` down in the heap until no child has a
    /// smaller value.
    fn downheap(&mut self, item: ID) {
        let n = self.heap.len();
        let idx = item.to_usize().unwrap();
        let value = self.data[idx].value.clone();
        let mut cur_pos = self.data[idx].pos.to_usize().unwrap();
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let (next_pos, next_idx) = if left_pos >= n {
                break;
            } else if right_pos >= n {
                (left_pos, self.heap[left_pos].to_usize().unwrap())
            } else {
                let left_idx = self.heap[left_pos].to_usize().unwrap();
                let right_idx = self.heap[right_pos].to_usize().unwrap();
                if self.data[left_idx].value < self.data[right_idx].value {
                    (left_pos, left_idx)
                } else {
                    (right_pos, right_idx)
                }
            };

            if value <= self.data[next_idx].value {
                break;
            }

            self.heap[cur_pos] = self.heap[next_pos];
            self.data[next_idx].pos = ID::from_usize(cur_pos).unwrap();
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = item;
        self.data[idx].pos = ID::from_usize(cur_pos).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::{BinHeap, ItemPriQueue};

    #[test]
    fn test_push_pop_sorted() {
        let mut heap = BinHeap::new();
        for &(k, v) in &[(0usize, 13i32), (1, 7), (2, 42), (3, 1), (4, 20)] {
            heap.push(k, v);
        }

        let mut popped = vec![];
        while let Some((k, v)) = heap.pop_min() {
            popped.push((k, v));
        }
        assert_eq!(popped, vec![(3, 1), (1, 7), (0, 13), (4, 20), (2, 42)]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = BinHeap::new();
        heap.push(0usize, 10i32);
        let mut item = heap.push(1, 20);
        heap.push(2, 30);

        assert_eq!(heap.value(&item), &20);
        assert!(heap.decrease_key(&mut item, 5));
        assert_eq!(heap.value(&item), &5);
        // not a decrease
        assert!(!heap.decrease_key(&mut item, 7));
        assert_eq!(heap.value(&item), &5);

        assert_eq!(heap.pop_min(), Some((1, 5)));
        assert_eq!(heap.pop_min(), Some((0, 10)));
        assert_eq!(heap.pop_min(), Some((2, 30)));
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn test_slot_reuse() {
        let mut heap = BinHeap::<usize, i32>::new();
        for i in 0..8 {
            heap.push(i, i as i32);
        }
        for i in 0..4 {
            assert_eq!(heap.pop_min(), Some((i, i as i32)));
        }
        // the freed slots must be recycled
        for i in 8..12 {
            heap.push(i, -(i as i32));
        }
        assert_eq!(heap.data.len(), 8);

        let mut popped = vec![];
        while let Some((k, _)) = heap.pop_min() {
            popped.push(k);
        }
        assert_eq!(popped, vec![11, 10, 9, 8, 4, 5, 6, 7]);
    }

    #[test]
    fn test_clear() {
        let mut heap = BinHeap::<usize, u64>::new();
        heap.push(1, 2);
        heap.push(2, 1);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.pop_min(), None);
        heap.push(7, 9);
        assert_eq!(heap.pop_min(), Some((7, 9)));
    }
}
