use crate::structs::Itemset;
use crate::transactions::TransactionStore;

/// Support of an itemset: the fraction of transactions that contain it.
///
/// One linear scan of the dataset per call, O(T·k).
#[derive(Debug, Clone, Copy)]
pub struct SupportCalculator<'a> {
    store: &'a TransactionStore,
}

impl<'a> SupportCalculator<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        Self { store }
    }

    pub fn count(&self, itemset: &Itemset) -> usize {
        self.store
            .iter()
            .filter(|transaction| TransactionStore::contains(transaction, itemset))
            .count()
    }

    pub fn support(&self, itemset: &Itemset) -> f64 {
        // the store is never empty
        self.count(itemset) as f64 / self.store.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::Item;
    use proptest::prelude::*;

    fn store() -> TransactionStore {
        TransactionStore::from_labels([vec!["a", "b"], vec!["a", "b"], vec!["a", "c"]]).unwrap()
    }

    #[test]
    fn test_support_values() {
        let store = store();
        let calc = SupportCalculator::new(&store);
        let a = Itemset::singleton(Item(0));
        let ab = Itemset::new([Item(0), Item(1)]);
        let bc = Itemset::new([Item(1), Item(2)]);

        assert_eq!(calc.support(&a), 1.0);
        assert!((calc.support(&ab) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(calc.support(&bc), 0.0);
    }

    #[test]
    fn test_single_transaction_full_support() {
        let store = TransactionStore::from_labels([vec!["a", "b"]]).unwrap();
        let calc = SupportCalculator::new(&store);
        assert_eq!(calc.support(&Itemset::new([Item(0), Item(1)])), 1.0);
    }

    proptest! {
        #[test]
        fn prop_anti_monotone(
            rows in prop::collection::vec(prop::collection::vec(0u32..6, 1..5), 1..20),
            a in prop::collection::vec(0u32..6, 1..3),
            extra in prop::collection::vec(0u32..6, 0..3),
        ) {
            let transactions = rows
                .into_iter()
                .map(|row| row.into_iter().map(Item).collect())
                .collect();
            let store = TransactionStore::new(transactions).unwrap();
            let calc = SupportCalculator::new(&store);
            let small: Itemset = a.iter().copied().map(Item).collect();
            let big: Itemset = a.into_iter().chain(extra).map(Item).collect();

            let small_support = calc.support(&small);
            let big_support = calc.support(&big);
            prop_assert!(big_support <= small_support);
            prop_assert!((0.0..=1.0).contains(&big_support));
        }
    }
}
