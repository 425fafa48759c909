//! Exhaustive candidate generation over the itemset lattice.
//!
//! Every itemset of size 2..=N is produced, size by size, each size in
//! lexicographic "choose k of N" order over the universe's first-seen order.
//! Singletons are never produced; their counts live in [`ItemUniverse`].
//!
//! [`ItemUniverse`]: crate::ItemUniverse

use crate::structs::{Item, Itemset};

#[derive(Debug, Clone, Copy)]
pub struct ItemsetEnumerator<'a> {
    items: &'a [Item],
}

impl<'a> ItemsetEnumerator<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self { items }
    }

    /// A fresh pass over all candidates. Calling it again restarts.
    pub fn iter(&self) -> impl Iterator<Item = Itemset> + 'a {
        let items = self.items;
        (2..=items.len()).flat_map(move |k| Combinations::new(items, k))
    }

    /// All `k`-item candidates.
    pub fn of_size(&self, k: usize) -> Combinations<'a> {
        Combinations::new(self.items, k)
    }

    /// `2^N - N - 1`, or `None` if it does not fit in a `u128`.
    pub fn candidate_count(&self) -> Option<u128> {
        let n = self.items.len() as u32;
        1u128
            .checked_shl(n)
            .map(|total| total - u128::from(n) - 1)
    }
}

/// Lexicographic `k`-combinations of a slice.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    items: &'a [Item],
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl<'a> Combinations<'a> {
    fn new(items: &'a [Item], k: usize) -> Self {
        Self {
            items,
            indices: (0..k).collect(),
            started: false,
            exhausted: k == 0 || k > items.len(),
        }
    }

    fn current(&self) -> Itemset {
        self.indices.iter().map(|&i| self.items[i]).collect()
    }

    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();
        // rightmost position that can still move right
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[pos] += 1;
        for i in pos + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = Itemset;

    fn next(&mut self) -> Option<Itemset> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.exhausted = true;
            return None;
        }
        Some(self.current())
    }
}
