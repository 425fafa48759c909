//! Rule derivation from frequent itemsets.
//!
//! Each frequent itemset yields one candidate rule per member item: the item
//! becomes the consequent and the rest of the itemset the antecedent.

use crate::structs::{AssociationRule, FrequentItemset, Item, Itemset};
use crate::universe::ItemUniverse;
use log::debug;

/// How a rule's confidence is scored.
pub trait ConfidenceMeasure {
    fn confidence(&self, itemset_support: f64, consequent: Item, universe: &ItemUniverse) -> f64;
}

/// `support(itemset) / raw_count(consequent)`.
///
/// Divides a fraction by a transaction count, so values are not the textbook
/// `support(itemset) / support(antecedent)`. Baseline timings of the
/// benchmark suite are taken with this measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCountConfidence;

impl ConfidenceMeasure for RawCountConfidence {
    fn confidence(&self, itemset_support: f64, consequent: Item, universe: &ItemUniverse) -> f64 {
        raw_count_confidence(itemset_support, universe.raw_count(consequent))
    }
}

#[inline]
pub fn raw_count_confidence(itemset_support: f64, raw_count: usize) -> f64 {
    itemset_support / raw_count as f64
}

pub fn generate_rules<M: ConfidenceMeasure>(
    frequent_itemsets: &[FrequentItemset],
    universe: &ItemUniverse,
    min_confidence: f64,
    measure: &M,
) -> Vec<AssociationRule> {
    let mut rules = Vec::new();
    for FrequentItemset { itemset, support } in frequent_itemsets {
        for item in itemset.iter() {
            let confidence = measure.confidence(*support, item, universe);
            if confidence >= min_confidence {
                rules.push(AssociationRule {
                    antecedent: itemset.without(item),
                    consequent: Itemset::singleton(item),
                    support: *support,
                    confidence,
                });
            }
        }
    }
    debug!(
        "Derived {} rules from {} frequent itemsets at min_confidence={min_confidence}",
        rules.len(),
        frequent_itemsets.len()
    );
    rules
}
