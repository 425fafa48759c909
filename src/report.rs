use std::fmt;
use std::io::{self, Write};

use crate::miner::MiningResult;
use crate::structs::{AssociationRule, Itemset};
use crate::transactions::TransactionStore;
use crate::universe::ItemUniverse;
use num_format::{Locale, ToFormattedString};

/// Renders an itemset as `{label, label}`, falling back to `#id` for items
/// without a label.
pub struct ItemsetDisplay<'a> {
    itemset: &'a Itemset,
    store: &'a TransactionStore,
}

impl<'a> ItemsetDisplay<'a> {
    pub fn new(itemset: &'a Itemset, store: &'a TransactionStore) -> Self {
        Self { itemset, store }
    }
}

impl fmt::Display for ItemsetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.itemset.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.store.label(item) {
                Some(label) => f.write_str(label)?,
                None => write!(f, "{item}")?,
            }
        }
        f.write_str("}")
    }
}

pub struct RuleDisplay<'a> {
    rule: &'a AssociationRule,
    store: &'a TransactionStore,
}

impl<'a> RuleDisplay<'a> {
    pub fn new(rule: &'a AssociationRule, store: &'a TransactionStore) -> Self {
        Self { rule, store }
    }
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rule: {} => {}",
            ItemsetDisplay::new(&self.rule.antecedent, self.store),
            ItemsetDisplay::new(&self.rule.consequent, self.store)
        )?;
        writeln!(f, "Support: {}", self.rule.support)?;
        writeln!(f, "Confidence: {}", self.rule.confidence)
    }
}

/// One block per rule, separated by blank lines.
pub fn write_rules<W: Write>(
    out: &mut W,
    result: &MiningResult,
    store: &TransactionStore,
) -> io::Result<()> {
    for rule in result.rules() {
        writeln!(out, "{}", RuleDisplay::new(rule, store))?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatistics {
    pub transactions: usize,
    pub unique_items: usize,
    pub min_item_frequency: usize,
    pub max_item_frequency: usize,
    pub avg_transaction_width: f64,
}

impl DatasetStatistics {
    pub fn compute(store: &TransactionStore) -> Self {
        let universe = ItemUniverse::build(store);
        let (min_item_frequency, max_item_frequency) = universe
            .items()
            .iter()
            .map(|&item| universe.raw_count(item))
            .fold(None, |acc, count| match acc {
                None => Some((count, count)),
                Some((min_val, max_val)) => Some((min_val.min(count), max_val.max(count))),
            })
            .unwrap_or((0, 0));
        let total_width: usize = store.iter().map(|t| t.len()).sum();

        Self {
            transactions: store.len(),
            unique_items: universe.len(),
            min_item_frequency,
            max_item_frequency,
            avg_transaction_width: total_width as f64 / store.len() as f64,
        }
    }

    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Dataset Statistics:")?;
        writeln!(
            out,
            "Total transactions: {}",
            self.transactions.to_formatted_string(&Locale::en)
        )?;
        writeln!(
            out,
            "Total unique items: {}",
            self.unique_items.to_formatted_string(&Locale::en)
        )?;
        writeln!(
            out,
            "Item frequency range: {} - {}",
            self.min_item_frequency.to_formatted_string(&Locale::en),
            self.max_item_frequency.to_formatted_string(&Locale::en)
        )?;
        writeln!(
            out,
            "Average transaction width: {:.2}",
            self.avg_transaction_width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::mine;
    use crate::structs::{Item, MiningConfig};

    fn store() -> TransactionStore {
        TransactionStore::from_labels([vec!["a", "b"], vec!["a", "b"], vec!["a", "c"]]).unwrap()
    }

    #[test]
    fn test_itemset_display() {
        let store = store();
        let itemset = Itemset::new([Item(0), Item(2), Item(9)]);
        assert_eq!(
            ItemsetDisplay::new(&itemset, &store).to_string(),
            "{a, c, #9}"
        );
    }

    #[test]
    fn test_write_rules() {
        let store = store();
        let result = mine(&store, &MiningConfig::new(0.5, 0.3).unwrap()).unwrap();
        let mut out = Vec::new();
        write_rules(&mut out, &result, &store).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Rule: {a} => {b}\nSupport: 0.66"));
        assert!(text.contains("Confidence: 0.33"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_statistics() {
        let stats = DatasetStatistics::compute(&store());
        assert_eq!(stats.transactions, 3);
        assert_eq!(stats.unique_items, 3);
        assert_eq!(stats.min_item_frequency, 1);
        assert_eq!(stats.max_item_frequency, 3);
        assert!((stats.avg_transaction_width - 2.0).abs() < 1e-12);

        let mut out = Vec::new();
        stats.write(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Item frequency range: 1 - 3"));
    }

    #[test]
    fn test_statistics_thousands_separator() {
        let rows = (0..1500).map(|_| vec!["x"]);
        let store = TransactionStore::from_labels(rows).unwrap();
        let mut out = Vec::new();
        DatasetStatistics::compute(&store).write(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Total transactions: 1,500"));
    }
}
