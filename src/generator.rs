use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::BenchmarkConfig;
use crate::dataloader::{DatasetLoader, format_item_list};
use crate::error::{InvalidInput, Result};
use crate::utils::{fixed_transactions_path, fixed_unique_items_path};
use ahash::AHashSet;
use log::info;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

/// Samples synthetic transaction datasets from a pool of item labels.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    item_pool: Vec<String>,
    max_item_width: usize,
    seed: Option<u64>,
}

impl DatasetGenerator {
    pub fn new(item_pool: Vec<String>, max_item_width: usize) -> Self {
        Self {
            item_pool,
            max_item_width,
            seed: None,
        }
    }

    /// Labels `item_0`, `item_1`, ... for runs without a source dataset.
    pub fn with_synthetic_pool(pool_size: usize, max_item_width: usize) -> Self {
        Self::new(
            (0..pool_size).map(|i| format!("item_{i}")).collect(),
            max_item_width,
        )
    }

    /// Label pool and seed for the configured sweeps: the grocery item
    /// descriptions when a grocery dataset is set (resolved against the
    /// dataset directory), synthetic labels otherwise.
    pub fn for_benchmark(config: &BenchmarkConfig) -> Result<Self> {
        let required = config.required_pool_size();
        let mut generator = match &config.grocery_dataset {
            Some(path) => {
                let records = DatasetLoader::new(&config.dataset_dir).load_grocery_records(path)?;
                info!(
                    "Source dataset: {} transactions, {} unique items",
                    records.transactions.len(),
                    records.unique_items.len()
                );
                Self::new(records.unique_items, config.max_item_width)
            }
            None => Self::with_synthetic_pool(required, config.max_item_width),
        };
        if generator.pool_size() < required {
            return Err(InvalidInput::NotEnoughItems {
                requested: required,
                available: generator.pool_size(),
            }
            .into());
        }
        generator.seed = config.seed;
        Ok(generator)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn pool_size(&self) -> usize {
        self.item_pool.len()
    }

    fn rng(&self, stream: u64) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                rng.set_stream(stream);
                rng
            }
            None => ChaCha20Rng::from_os_rng(),
        }
    }

    fn check(&self, num_transactions: usize, num_unique_items: usize) -> Result<()> {
        if num_transactions == 0 {
            return Err(InvalidInput::ZeroCount {
                name: "num_transactions",
            }
            .into());
        }
        if num_unique_items == 0 {
            return Err(InvalidInput::ZeroCount {
                name: "num_unique_items",
            }
            .into());
        }
        if self.max_item_width == 0 {
            return Err(InvalidInput::ZeroCount {
                name: "max_item_width",
            }
            .into());
        }
        if num_unique_items > self.item_pool.len() {
            return Err(InvalidInput::NotEnoughItems {
                requested: num_unique_items,
                available: self.item_pool.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Each transaction draws `1..=max_item_width` labels, with replacement,
    /// from the first `num_unique_items` labels of the pool.
    pub fn sample(
        &self,
        num_transactions: usize,
        num_unique_items: usize,
    ) -> Result<Vec<Vec<String>>> {
        self.check(num_transactions, num_unique_items)?;
        let mut rng = self.rng(stream_id(num_transactions, num_unique_items));
        Ok(self.sample_with(&mut rng, num_transactions, num_unique_items))
    }

    fn sample_with(
        &self,
        rng: &mut ChaCha20Rng,
        num_transactions: usize,
        num_unique_items: usize,
    ) -> Vec<Vec<String>> {
        let available = &self.item_pool[..num_unique_items];
        (0..num_transactions)
            .map(|_| {
                let width = rng.random_range(1..=self.max_item_width);
                (0..width)
                    .filter_map(|_| available.choose(&mut *rng).cloned())
                    .collect()
            })
            .collect()
    }

    pub fn write_dataset(&self, path: &Path, transactions: &[Vec<String>]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_writer(File::create(path)?);
        writer.write_record(["Items"])?;
        for transaction in transactions {
            writer.write_record([format_item_list(transaction)])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// One dataset per distinct entry of `unique_item_counts`, all with
    /// `num_transactions` rows.
    pub fn generate_fixed_transactions(
        &self,
        output_dir: &Path,
        num_transactions: usize,
        unique_item_counts: &[usize],
    ) -> Result<Vec<PathBuf>> {
        let paths = distinct(unique_item_counts)
            .par_iter()
            .map(|&num_items| {
                let path = fixed_transactions_path(output_dir, num_transactions, num_items);
                let transactions = self.sample(num_transactions, num_items)?;
                self.write_dataset(&path, &transactions)?;
                Ok(path)
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Datasets with different numbers of unique items created successfully");
        Ok(paths)
    }

    /// One dataset per distinct entry of `transaction_counts`, all drawn from
    /// `num_unique_items` labels.
    pub fn generate_fixed_unique_items(
        &self,
        output_dir: &Path,
        num_unique_items: usize,
        transaction_counts: &[usize],
    ) -> Result<Vec<PathBuf>> {
        let paths = distinct(transaction_counts)
            .par_iter()
            .map(|&num_transactions| {
                let path = fixed_unique_items_path(output_dir, num_unique_items, num_transactions);
                let transactions = self.sample(num_transactions, num_unique_items)?;
                self.write_dataset(&path, &transactions)?;
                Ok(path)
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Datasets with different numbers of transactions created successfully");
        Ok(paths)
    }
}

/// Sweep values in first-seen order without repeats; each value owns one
/// output file.
fn distinct(counts: &[usize]) -> Vec<usize> {
    let mut seen = AHashSet::with_capacity(counts.len());
    counts.iter().copied().filter(|&c| seen.insert(c)).collect()
}

/// Distinct ChaCha stream per sweep point so parallel generation stays
/// reproducible under a fixed seed.
fn stream_id(num_transactions: usize, num_unique_items: usize) -> u64 {
    ((num_transactions as u64) << 32) ^ num_unique_items as u64
}
