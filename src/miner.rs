use crate::enumerator::ItemsetEnumerator;
use crate::error::Result;
use crate::frequent::collect_frequent_itemsets;
use crate::rules::{ConfidenceMeasure, RawCountConfidence, generate_rules};
use crate::structs::{AssociationRule, FrequentItemset, MiningConfig};
use crate::support::SupportCalculator;
use crate::transactions::TransactionStore;
use crate::universe::ItemUniverse;
use log::info;

/// An algorithm the timing harness can drive.
pub trait ItemsetMiner {
    fn name(&self) -> &str;

    fn mine(&self, store: &TransactionStore, config: &MiningConfig) -> Result<MiningResult>;
}

/// Everything one mining run produced. Owned by the caller; runs share nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningResult {
    universe: ItemUniverse,
    frequent_itemsets: Vec<FrequentItemset>,
    rules: Vec<AssociationRule>,
}

impl MiningResult {
    pub fn new(
        universe: ItemUniverse,
        frequent_itemsets: Vec<FrequentItemset>,
        rules: Vec<AssociationRule>,
    ) -> Self {
        Self {
            universe,
            frequent_itemsets,
            rules,
        }
    }

    pub fn universe(&self) -> &ItemUniverse {
        &self.universe
    }

    /// Ascending itemset size, then combinatorial order within a size.
    pub fn frequent_itemsets(&self) -> &[FrequentItemset] {
        &self.frequent_itemsets
    }

    pub fn rules(&self) -> &[AssociationRule] {
        &self.rules
    }

    pub fn into_parts(self) -> (ItemUniverse, Vec<FrequentItemset>, Vec<AssociationRule>) {
        (self.universe, self.frequent_itemsets, self.rules)
    }
}

/// Exhaustive miner used as the ground-truth baseline.
///
/// Enumerates the whole itemset lattice without pruning, so a run costs
/// O(2^N · T · N) for N distinct items and T transactions.
#[derive(Debug, Clone, Default)]
pub struct BruteForceMiner<M = RawCountConfidence> {
    measure: M,
}

impl BruteForceMiner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: ConfidenceMeasure> BruteForceMiner<M> {
    pub fn with_measure(measure: M) -> Self {
        Self { measure }
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }
}

impl<M: ConfidenceMeasure> ItemsetMiner for BruteForceMiner<M> {
    fn name(&self) -> &str {
        "Brute-force"
    }

    fn mine(&self, store: &TransactionStore, config: &MiningConfig) -> Result<MiningResult> {
        config.validate()?;

        let universe = ItemUniverse::build(store);
        let enumerator = ItemsetEnumerator::new(universe.items());
        let calculator = SupportCalculator::new(store);
        let frequent_itemsets =
            collect_frequent_itemsets(&enumerator, &calculator, config.min_support);
        let rules = generate_rules(
            &frequent_itemsets,
            &universe,
            config.min_confidence,
            &self.measure,
        );

        info!(
            "Mined T={} N={}: {} frequent itemsets, {} rules",
            store.len(),
            universe.len(),
            frequent_itemsets.len(),
            rules.len()
        );
        Ok(MiningResult::new(universe, frequent_itemsets, rules))
    }
}

/// Runs the brute-force baseline with the default confidence measure.
pub fn mine(store: &TransactionStore, config: &MiningConfig) -> Result<MiningResult> {
    BruteForceMiner::new().mine(store, config)
}

/// Builds a store from labelled rows and mines it.
pub fn mine_labels<R, S>(
    rows: impl IntoIterator<Item = R>,
    config: &MiningConfig,
) -> Result<MiningResult>
where
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    config.validate()?;
    let store = TransactionStore::from_labels(rows)?;
    mine(&store, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInput;
    use crate::structs::{Item, Itemset};
    use proptest::prelude::*;

    fn scenario() -> TransactionStore {
        TransactionStore::from_labels([vec!["a", "b"], vec!["a", "b"], vec!["a", "c"]]).unwrap()
    }

    #[test]
    fn test_rule_scenario() {
        let store = scenario();
        let config = MiningConfig::new(0.3, 0.3).unwrap();
        let result = mine(&store, &config).unwrap();
        let vocab = store.vocabulary().unwrap();
        let [a, b, c] = ["a", "b", "c"].map(|label| vocab.get(label).unwrap());

        let universe = result.universe();
        assert_eq!(universe.raw_count(a), 3);
        assert_eq!(universe.raw_count(b), 2);
        assert_eq!(universe.raw_count(c), 1);

        let frequent = result.frequent_itemsets();
        assert_eq!(frequent.len(), 2);
        assert_eq!(frequent[0].itemset, Itemset::new([a, b]));
        assert!((frequent[0].support - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(frequent[1].itemset, Itemset::new([a, c]));
        assert!((frequent[1].support - 1.0 / 3.0).abs() < 1e-12);

        let rules = result.rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].antecedent, Itemset::singleton(a));
        assert_eq!(rules[0].consequent, Itemset::singleton(b));
        assert!((rules[0].confidence - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(rules[1].antecedent, Itemset::singleton(a));
        assert_eq!(rules[1].consequent, Itemset::singleton(c));
        assert!((rules[1].confidence - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_rule_confidences() {
        let store = scenario();
        let result = mine(&store, &MiningConfig::new(0.3, 0.0).unwrap()).unwrap();
        let confidences: Vec<f64> = result.rules().iter().map(|r| r.confidence).collect();
        let expected = [2.0 / 9.0, 1.0 / 3.0, 1.0 / 9.0, 1.0 / 3.0];
        assert_eq!(confidences.len(), expected.len());
        for (got, want) in confidences.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn test_support_boundary() {
        let config = MiningConfig::new(1.0, 0.0).unwrap();
        let result = mine_labels([vec!["a", "b"]], &config).unwrap();
        assert_eq!(result.frequent_itemsets().len(), 1);
        assert_eq!(result.frequent_itemsets()[0].support, 1.0);
    }

    #[test]
    fn test_empty_dataset() {
        let rows: Vec<Vec<String>> = Vec::new();
        let err = mine_labels(rows, &MiningConfig::default()).unwrap_err();
        assert_eq!(err.invalid_input(), Some(&InvalidInput::EmptyDataset));
    }

    #[test]
    fn test_threshold_checked_before_work() {
        let store = scenario();
        let config = MiningConfig {
            min_support: 0.5,
            min_confidence: 2.0,
        };
        let err = mine(&store, &config).unwrap_err();
        assert!(matches!(
            err.invalid_input(),
            Some(InvalidInput::ThresholdOutOfRange {
                name: "min_confidence",
                ..
            })
        ));
    }

    #[test]
    fn test_custom_measure() {
        struct Always;
        impl ConfidenceMeasure for Always {
            fn confidence(&self, _: f64, _: Item, _: &ItemUniverse) -> f64 {
                1.0
            }
        }

        let store = scenario();
        let result = BruteForceMiner::with_measure(Always)
            .mine(&store, &MiningConfig::new(0.3, 1.0).unwrap())
            .unwrap();
        assert_eq!(result.rules().len(), 4);
    }

    #[test]
    fn test_runs_on_separate_threads() {
        let store = scenario();
        let config = MiningConfig::new(0.0, 0.0).unwrap();
        let (first, second) = std::thread::scope(|s| {
            let h1 = s.spawn(|| mine(&store, &config));
            let h2 = s.spawn(|| mine(&store, &config));
            (h1.join().unwrap(), h2.join().unwrap())
        });
        assert_eq!(first.unwrap(), second.unwrap());
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_no_singletons(
            rows in prop::collection::vec(prop::collection::vec(0u8..7, 1..6), 1..15),
            min_support in 0.0f64..=1.0,
            min_confidence in 0.0f64..=1.0,
        ) {
            let rows: Vec<Vec<String>> = rows
                .into_iter()
                .map(|row| row.into_iter().map(|i| format!("item{i}")).collect())
                .collect();
            let config = MiningConfig::new(min_support, min_confidence).unwrap();
            let first = mine_labels(rows.clone(), &config).unwrap();
            let second = mine_labels(rows, &config).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert!(first.frequent_itemsets().iter().all(|f| f.itemset.len() >= 2));
            prop_assert!(first.frequent_itemsets().iter().all(|f| f.support >= min_support));
            prop_assert!(first.rules().iter().all(|r| r.confidence >= min_confidence));
            prop_assert!(first
                .rules()
                .iter()
                .all(|r| r.consequent.len() == 1 && !r.antecedent.is_empty()));
        }
    }
}
