// src/merge_table.rs
use rayon::prelude::*;

use crate::transition::Transition;

/// Initial capacity and geometric growth factor for [`MergeTable`].
///
/// Exposed as a small config struct (rather than bare constants) so callers
/// who know roughly how large their transition monoid will get can
/// pre-size the table and skip a few reallocations; `Default` defaults to
/// min size 8, growth factor 2.
#[derive(Debug, Clone, Copy)]
pub struct GrowthConfig {
    pub min_size: usize,
    pub grow_factor: usize,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        GrowthConfig {
            min_size: 8,
            grow_factor: 2,
        }
    }
}

/// A growable, square, dense matrix of [`Transition`]s addressed by
/// `(first, second)`, storage offset `first + second * capacity`.
///
/// `capacity` (storage side) and `k` (logical side, the number of interned
/// parallel states so far) are tracked separately: growing logical `k`
/// without crossing a capacity boundary is a no-op reallocation-wise.
pub struct MergeTable {
    config: GrowthConfig,
    capacity: usize,
    k: usize,
    cells: Vec<Transition>,
}

impl MergeTable {
    pub fn new() -> Self {
        Self::with_config(GrowthConfig::default())
    }

    pub fn with_config(config: GrowthConfig) -> Self {
        MergeTable {
            config,
            capacity: 0,
            k: 0,
            cells: Vec::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grow (if needed) so the logical side is at least `new_k`, preserving
    /// every existing `(first, second)` cell across a capacity change.
    pub fn resize(&mut self, new_k: usize) {
        if new_k <= self.capacity {
            self.k = new_k;
            return;
        }

        let mut new_capacity = self.capacity.max(self.config.min_size);
        while new_capacity < new_k {
            new_capacity *= self.config.grow_factor;
        }

        let mut new_cells = vec![Transition::default(); new_capacity * new_capacity];
        for second in 0..self.k {
            for first in 0..self.k {
                new_cells[first + second * new_capacity] =
                    self.cells[first + second * self.capacity];
            }
        }

        self.cells = new_cells;
        self.capacity = new_capacity;
        self.k = new_k;
    }

    #[inline]
    fn offset(&self, first: usize, second: usize) -> usize {
        assert!(first < self.k && second < self.k, "merge table index out of bounds");
        first + second * self.capacity
    }

    pub fn get(&self, first: usize, second: usize) -> Transition {
        self.cells[self.offset(first, second)]
    }

    pub fn set(&mut self, first: usize, second: usize, value: Transition) {
        let off = self.offset(first, second);
        self.cells[off] = value;
    }

    /// Resize to `new_k` and fill every `(first, second)` cell with
    /// `f(first, second)`, computed in parallel across `second` (each
    /// storage row for a fixed `second` is contiguous and independent).
    pub fn par_fill<F>(&mut self, new_k: usize, f: F)
    where
        F: Fn(usize, usize) -> Transition + Sync,
    {
        self.resize(new_k);
        let capacity = self.capacity;
        let k = self.k;
        self.cells
            .par_chunks_mut(capacity)
            .enumerate()
            .for_each(|(second, row)| {
                if second >= k {
                    return;
                }
                for first in 0..k {
                    row[first] = f(first, second);
                }
            });
    }
}

impl Default for MergeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: u32) -> Transition {
        Transition { result_state: id, produces_lexeme: false }
    }

    #[test]
    fn resize_preserves_existing_cells_across_capacity_change() {
        let mut m = MergeTable::with_config(GrowthConfig { min_size: 2, grow_factor: 2 });
        m.resize(2);
        m.set(0, 0, t(10));
        m.set(1, 0, t(11));
        m.set(0, 1, t(12));
        m.set(1, 1, t(13));

        // Force a capacity bump well past the current size.
        m.resize(5);
        assert_eq!(m.get(0, 0), t(10));
        assert_eq!(m.get(1, 0), t(11));
        assert_eq!(m.get(0, 1), t(12));
        assert_eq!(m.get(1, 1), t(13));
        assert!(m.capacity() >= 5);
    }

    #[test]
    fn resize_within_capacity_does_not_reallocate() {
        let mut m = MergeTable::with_config(GrowthConfig { min_size: 8, grow_factor: 2 });
        m.resize(3);
        let cap_before = m.capacity();
        m.resize(5);
        assert_eq!(m.capacity(), cap_before);
    }

    #[test]
    fn par_fill_covers_every_cell() {
        let mut m = MergeTable::new();
        m.par_fill(4, |i, j| t((i * 10 + j) as u32));
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), t((i * 10 + j) as u32));
            }
        }
    }
}
