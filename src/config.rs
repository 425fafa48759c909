use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{MiningError, Result};
use crate::structs::MiningConfig;
use serde::{Deserialize, Serialize};

/// Settings of the benchmark binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub mining: MiningConfig,
    pub iterations: usize,
    pub dataset_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Raw grocery purchases used as the label pool; synthetic labels otherwise.
    pub grocery_dataset: Option<PathBuf>,
    pub fixed_transactions_count: usize,
    pub unique_item_counts: Vec<usize>,
    pub fixed_unique_item_count: usize,
    pub transaction_counts: Vec<usize>,
    pub max_item_width: usize,
    pub seed: Option<u64>,
    /// Regenerate the sweep datasets before timing.
    pub regenerate: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            mining: MiningConfig {
                min_support: 0.002,
                min_confidence: 0.05,
            },
            iterations: 10,
            dataset_dir: PathBuf::from("./datasets"),
            output_dir: PathBuf::from("./reports"),
            grocery_dataset: None,
            fixed_transactions_count: 100,
            unique_item_counts: vec![10, 15, 20, 25, 30, 35, 40],
            fixed_unique_item_count: 20,
            transaction_counts: vec![50, 60, 70, 80, 90, 100, 110],
            max_item_width: 10,
            seed: None,
            regenerate: true,
        }
    }
}

impl BenchmarkConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Applies `DATASET_DIR`, `OUTPUT_DIR`, `GROCERY_DATASET`, `MIN_SUPPORT`,
    /// `MIN_CONFIDENCE`, `ITERATIONS`, `SEED` and `REGENERATE` when set.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup("DATASET_DIR") {
            self.dataset_dir = dir.into();
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = dir.into();
        }
        if let Some(path) = lookup("GROCERY_DATASET") {
            self.grocery_dataset = Some(path.into());
        }
        if let Some(value) = parse_var(&lookup, "MIN_SUPPORT")? {
            self.mining.min_support = value;
        }
        if let Some(value) = parse_var(&lookup, "MIN_CONFIDENCE")? {
            self.mining.min_confidence = value;
        }
        if let Some(value) = parse_var(&lookup, "ITERATIONS")? {
            self.iterations = value;
        }
        if let Some(value) = parse_var(&lookup, "SEED")? {
            self.seed = Some(value);
        }
        if let Some(value) = parse_var(&lookup, "REGENERATE")? {
            self.regenerate = value;
        }
        self.mining.validate()?;
        Ok(self)
    }

    /// Largest label pool any sweep point draws from.
    pub fn required_pool_size(&self) -> usize {
        self.unique_item_counts
            .iter()
            .copied()
            .chain([self.fixed_unique_item_count])
            .max()
            .unwrap_or(0)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| MiningError::Config {
                key: key.to_string(),
                message: format!("{raw:?}: {e}"),
            })
        })
        .transpose()
}
