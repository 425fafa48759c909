use arm_bench::{
    BruteForceMiner, DatasetGenerator, DatasetLoader, InvalidInput, ItemUniverse, ItemsetMiner,
    MiningConfig, Sweep, SweepKind, TransactionStore, load_sweep_points, mine, mine_labels,
};
use tempfile::tempdir;

#[test]
fn generate_load_and_mine() {
    let dir = tempdir().unwrap();
    let generator = DatasetGenerator::with_synthetic_pool(8, 4).with_seed(11);
    let paths = generator
        .generate_fixed_transactions(dir.path(), 30, &[4, 6])
        .unwrap();

    let loader = DatasetLoader::new(dir.path());
    let store = loader.load_transactions(&paths[1]).unwrap();
    let config = MiningConfig::new(0.05, 0.01).unwrap();
    let result = mine(&store, &config).unwrap();

    let n = result.universe().len();
    assert!(n <= 6);
    // every frequent itemset is a size >= 2 subset with support above the bar
    for entry in result.frequent_itemsets() {
        assert!(entry.itemset.len() >= 2);
        assert!(entry.support >= 0.05);
    }
    for rule in result.rules() {
        let consequent = rule.consequent.items()[0];
        let expected = rule.support / result.universe().raw_count(consequent) as f64;
        assert_eq!(rule.confidence, expected);
        assert!(!rule.antecedent.contains(consequent));
    }

    // same input, same output
    assert_eq!(result, mine(&store, &config).unwrap());
}

#[test]
fn sizes_ascend_in_frequent_collection() {
    let rows = [
        vec!["bread", "milk", "eggs", "jam"],
        vec!["bread", "milk", "eggs"],
        vec!["bread", "milk"],
        vec!["jam", "eggs"],
    ];
    let result = mine_labels(rows, &MiningConfig::new(0.25, 0.0).unwrap()).unwrap();
    let sizes: Vec<usize> = result
        .frequent_itemsets()
        .iter()
        .map(|entry| entry.itemset.len())
        .collect();
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(sizes.last(), Some(&4));
}

#[test]
fn empty_dataset_is_invalid_input() {
    let err = TransactionStore::new(Vec::new()).unwrap_err();
    assert_eq!(err.invalid_input(), Some(&InvalidInput::EmptyDataset));
}

#[test]
fn sweep_over_generated_datasets() {
    let dir = tempdir().unwrap();
    let generator = DatasetGenerator::with_synthetic_pool(10, 3).with_seed(5);
    generator
        .generate_fixed_unique_items(dir.path(), 5, &[10, 20])
        .unwrap();

    let loader = DatasetLoader::new(dir.path());
    let points = load_sweep_points(&loader, SweepKind::FixedUniqueItems, 5, &[10, 20]).unwrap();
    assert_eq!(points[1].workload.transactions, 20);
    assert!(ItemUniverse::build(&points[1].store).len() <= 5);

    let baseline = BruteForceMiner::new();
    let sweep = Sweep::new(
        SweepKind::FixedUniqueItems,
        5,
        2,
        MiningConfig::new(0.1, 0.01).unwrap(),
    );
    let comparison: &dyn ItemsetMiner = &baseline;
    let report = sweep.run(&points, &baseline, &[comparison]).unwrap();

    assert_eq!(report.points.len(), 2);
    assert_eq!(report.points[1].timings.len(), 2);
    let estimated = &report.points[1].timings[0];
    assert!(estimated.estimated);
    let measured = &report.points[1].timings[1];
    assert!(!measured.estimated);
    assert_eq!(measured.samples.len(), 2);
}
