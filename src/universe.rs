use crate::structs::Item;
use crate::transactions::TransactionStore;
use ahash::AHashMap;

/// Distinct items of a dataset with their raw occurrence counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUniverse {
    items: Vec<Item>,
    counts: AHashMap<Item, usize>,
}

impl ItemUniverse {
    /// Visits every item of every transaction once, in dataset order.
    pub fn build(store: &TransactionStore) -> Self {
        let mut items = Vec::new();
        let mut counts = AHashMap::new();
        for transaction in store.iter() {
            for item in transaction.iter() {
                let count = counts.entry(item).or_insert_with(|| {
                    items.push(item);
                    0
                });
                *count += 1;
            }
        }
        Self { items, counts }
    }

    /// Distinct items in first-seen order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of transactions containing `item`. This is a count, not a
    /// fraction of the dataset; zero for items outside the universe.
    pub fn raw_count(&self, item: Item) -> usize {
        self.counts.get(&item).copied().unwrap_or(0)
    }
}
