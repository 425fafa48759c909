//! Read-only view over the transactions of one dataset.

use crate::error::{InvalidInput, Result};
use crate::structs::{Item, Itemset, Transaction};
use crate::vocabulary::Vocabulary;

/// Ordered, non-empty sequence of transactions. A single transaction may
/// itself be empty and still counts toward the support denominator.
///
/// Construction fails on an empty dataset, so every support computed against
/// a store has a non-zero denominator.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    vocabulary: Option<Vocabulary>,
}

impl TransactionStore {
    /// Wraps already interned transactions.
    pub fn new(transactions: Vec<Transaction>) -> Result<Self> {
        if transactions.is_empty() {
            return Err(InvalidInput::EmptyDataset.into());
        }
        Ok(Self {
            transactions,
            vocabulary: None,
        })
    }

    /// Interns string labels row by row and builds the store.
    pub fn from_labels<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::new();
        let transactions: Vec<Transaction> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|label| vocabulary.intern(label.as_ref()))
                    .collect()
            })
            .collect();
        let mut store = Self::new(transactions)?;
        store.vocabulary = Some(vocabulary);
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// `itemset ⊆ transaction`
    #[inline]
    pub fn contains(transaction: &Transaction, itemset: &Itemset) -> bool {
        itemset.is_subset_of(transaction)
    }

    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    pub fn label(&self, item: Item) -> Option<&str> {
        self.vocabulary.as_ref().and_then(|vocab| vocab.label(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_rejected() {
        let err = TransactionStore::new(Vec::new()).unwrap_err();
        assert_eq!(err.invalid_input(), Some(&InvalidInput::EmptyDataset));

        let rows: Vec<Vec<&str>> = Vec::new();
        assert!(TransactionStore::from_labels(rows).is_err());
    }

    #[test]
    fn test_from_labels_collapses_duplicates() {
        let store = TransactionStore::from_labels([vec!["a", "b", "a"], vec!["c"]]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].len(), 2);
        assert_eq!(store.label(Item(2)), Some("c"));
    }

    #[test]
    fn test_contains() {
        let store = TransactionStore::from_labels([vec!["a", "b", "c"]]).unwrap();
        let transaction = &store.transactions()[0];
        let ab = Itemset::new([Item(0), Item(1)]);
        let ad = Itemset::new([Item(0), Item(3)]);
        assert!(TransactionStore::contains(transaction, &ab));
        assert!(!TransactionStore::contains(transaction, &ad));
    }
}
