mod benchmark;
mod config;
mod dataloader;
mod enumerator;
mod error;
mod frequent;
mod generator;
mod miner;
mod report;
mod rules;
mod structs;
mod support;
mod transactions;
mod universe;
mod utils;
mod vocabulary;
pub use benchmark::{
    AlgorithmTiming, PointReport, Sweep, SweepKind, SweepPoint, SweepReport, Workload,
    estimate_brute_force_time, load_sweep_points, time_run,
};
pub use config::BenchmarkConfig;
pub use dataloader::{DatasetLoader, GroceryRecords, format_item_list, parse_item_list};
pub use enumerator::{Combinations, ItemsetEnumerator};
pub use error::{InvalidInput, MiningError, Result};
pub use frequent::collect_frequent_itemsets;
pub use generator::DatasetGenerator;
pub use miner::{BruteForceMiner, ItemsetMiner, MiningResult, mine, mine_labels};
pub use report::{DatasetStatistics, ItemsetDisplay, RuleDisplay, write_rules};
pub use rules::{ConfidenceMeasure, RawCountConfidence, generate_rules, raw_count_confidence};
pub use structs::{AssociationRule, FrequentItemset, Item, Itemset, MiningConfig, Transaction};
pub use support::SupportCalculator;
pub use transactions::TransactionStore;
pub use universe::ItemUniverse;
pub use utils::{fixed_transactions_path, fixed_unique_items_path};
pub use vocabulary::Vocabulary;
