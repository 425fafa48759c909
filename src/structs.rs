use crate::error::{InvalidInput, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interned item label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Item(pub u32);

impl Item {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of items, kept sorted and free of duplicates.
///
/// Mined itemsets always hold at least one item. The empty value only
/// appears as a [`Transaction`] read from a row with no labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Itemset(Vec<Item>);

impl Itemset {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<_> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn singleton(item: Item) -> Self {
        Self(vec![item])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// `self \ {item}`
    pub fn without(&self, item: Item) -> Self {
        Self(self.0.iter().copied().filter(|&i| i != item).collect())
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        self.0.iter().all(|&item| other.contains(item))
    }
}

impl FromIterator<Item> for Itemset {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One basket. Same representation as an itemset; never mutated after load.
/// May be empty.
pub type Transaction = Itemset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub support: f64,
}

/// `antecedent => consequent`, where the consequent is always a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support: f64,
    pub confidence: f64,
}

/// Thresholds of one mining run. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub min_support: f64,
    pub min_confidence: f64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.1,
            min_confidence: 0.5,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self> {
        let config = Self {
            min_support,
            min_confidence,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("min_support", self.min_support)?;
        check_unit_interval("min_confidence", self.min_confidence)?;
        Ok(())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<()> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InvalidInput::ThresholdOutOfRange { name, value }.into())
    }
}
