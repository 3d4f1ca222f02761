/*
 * Copyright (c) 2021-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Disjoint sets of indices (union-find).

/// A partition of the indices `0..n` into disjoint sets.
///
/// Each set is identified by a canonical representative element. The
/// structure is stored as a forest with one tree per set and the
/// representative at the root. `find` uses full path compression and
/// `link` union by rank, so any sequence of operations runs in
/// amortized almost constant time per operation.
///
/// The parent pointers can never form a cycle. This is a structural
/// invariant maintained by `link` requiring two *distinct*
/// representatives.
///
/// # Example
///
/// ```
/// use flownet::collections::DisjointSets;
///
/// let mut sets = DisjointSets::new(6);
/// assert_eq!(sets.num_sets(), 6);
///
/// sets.union(0, 1);
/// sets.union(4, 5);
/// assert!(sets.same_set(0, 1));
/// assert!(!sets.same_set(1, 5));
/// assert_eq!(sets.num_sets(), 4);
///
/// sets.union(1, 4);
/// assert!(sets.same_set(0, 5));
/// ```
pub struct DisjointSets {
    /// Parent of each element, the root of a tree is its own parent.
    parent: Vec<usize>,
    /// Upper bound on the height of the subtree below each element.
    ///
    /// Only the value at a root is meaningful.
    rank: Vec<u8>,
    /// Current number of sets.
    nsets: usize,
}

impl DisjointSets {
    /// Create a partition of `0..n` into `n` singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSets {
            parent: (0..n).collect(),
            rank: vec![0; n],
            nsets: n,
        }
    }

    /// Return the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Return `true` iff the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Return the current number of sets.
    pub fn num_sets(&self) -> usize {
        self.nsets
    }

    /// Return the representative of the set containing `x`.
    ///
    /// Applies full path compression: afterwards all elements on the
    /// search path point directly to the root.
    ///
    /// Panics if `x` is out of range.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut u = x;
        while self.parent[u] != root {
            let next = self.parent[u];
            self.parent[u] = root;
            u = next;
        }

        root
    }

    /// Merge the sets with representatives `x` and `y`.
    ///
    /// The smaller-rank root is attached below the larger-rank root,
    /// on equal ranks `x` survives with its rank increased. Returns
    /// the representative of the merged set.
    ///
    /// Panics if `x` or `y` is not a representative or if `x == y`.
    pub fn link(&mut self, x: usize, y: usize) -> usize {
        assert!(
            self.parent[x] == x && self.parent[y] == y,
            "link requires representatives"
        );
        assert!(x != y, "link requires two distinct sets");

        self.nsets -= 1;
        if self.rank[x] < self.rank[y] {
            self.parent[x] = y;
            y
        } else {
            if self.rank[x] == self.rank[y] {
                self.rank[x] += 1;
            }
            self.parent[y] = x;
            x
        }
    }

    /// Merge the sets containing the arbitrary elements `x` and `y`.
    ///
    /// Does nothing if both belong to the same set. Returns the
    /// representative of the resulting set.
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            rx
        } else {
            self.link(rx, ry)
        }
    }

    /// Return `true` iff `x` and `y` belong to the same set.
    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSets;

    #[test]
    fn test_singletons() {
        let mut sets = DisjointSets::new(10);
        assert_eq!(sets.len(), 10);
        assert_eq!(sets.num_sets(), 10);
        for x in 0..10 {
            assert_eq!(sets.find(x), x);
        }
        for x in 0..10 {
            for y in 0..10 {
                assert_eq!(sets.same_set(x, y), x == y);
            }
        }
    }

    #[test]
    fn test_find_idempotent() {
        let mut sets = DisjointSets::new(16);
        for x in 0..8 {
            sets.union(2 * x, 2 * x + 1);
        }
        sets.union(0, 2);
        sets.union(2, 5);
        for x in 0..16 {
            let r = sets.find(x);
            assert_eq!(sets.find(r), r);
            assert_eq!(sets.find(x), r);
        }
    }

    #[test]
    fn test_union_merges() {
        let mut sets = DisjointSets::new(8);
        let r = sets.union(1, 2);
        assert!(sets.same_set(1, 2));
        assert_eq!(sets.find(1), r);
        assert_eq!(sets.find(2), r);
        assert_eq!(sets.num_sets(), 7);

        // merging again changes nothing
        assert_eq!(sets.union(2, 1), r);
        assert_eq!(sets.num_sets(), 7);
    }

    #[test]
    fn test_union_transitive() {
        let mut sets = DisjointSets::new(9);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(1, 3);
        assert!(sets.same_set(0, 2));
        assert!(sets.same_set(0, 3));
        assert!(!sets.same_set(0, 4));
        assert_eq!(sets.num_sets(), 6);
    }

    #[test]
    fn test_link_returns_representative() {
        let mut sets = DisjointSets::new(4);
        let r = sets.link(0, 1);
        assert!(r == 0 || r == 1);
        assert_eq!(sets.find(0), r);
        assert_eq!(sets.find(1), r);
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_link_same_set_panics() {
        let mut sets = DisjointSets::new(4);
        sets.link(2, 2);
    }

    #[test]
    #[should_panic(expected = "representatives")]
    fn test_link_non_representative_panics() {
        let mut sets = DisjointSets::new(4);
        let r = sets.link(0, 1);
        let child = 1 - r;
        sets.link(child, 2);
    }

    #[test]
    fn test_rank_bounds_height() {
        // a worst-case merge pattern must still keep paths short
        let n = 1 << 10;
        let mut sets = DisjointSets::new(n);
        let mut width = 1;
        while width < n {
            for x in (0..n).step_by(2 * width) {
                sets.union(x, x + width);
            }
            width *= 2;
        }
        assert_eq!(sets.num_sets(), 1);
        let r = sets.find(0);
        for x in 0..n {
            assert_eq!(sets.find(x), r);
        }
    }

    #[test]
    fn test_against_naive_labels() {
        // model-based check against a naive labeling
        let n = 48;
        let mut sets = DisjointSets::new(n);
        let mut label: Vec<usize> = (0..n).collect();

        let mut state = 0x2545f4914f6cdd1du64;
        for _ in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let x = (state >> 33) as usize % n;
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let y = (state >> 33) as usize % n;

            sets.union(x, y);
            let (lx, ly) = (label[x], label[y]);
            if lx != ly {
                for l in label.iter_mut() {
                    if *l == ly {
                        *l = lx;
                    }
                }
            }

            for u in 0..n {
                for v in 0..n {
                    assert_eq!(sets.same_set(u, v), label[u] == label[v]);
                }
            }
        }
    }
}
