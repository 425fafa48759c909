use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, anyhow};
use arm_bench::{DatasetLoader, DatasetStatistics, MiningConfig, mine, write_rules};
use log::info;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    env_logger::init();
    // dataset file: first argument, or `DATASET_FILE`
    let dataset_file: PathBuf = env::args()
        .nth(1)
        .or_else(|| env::var("DATASET_FILE").ok())
        .ok_or(anyhow!("usage: mine-dataset <transactions.csv>"))?
        .into();
    let min_support = env::var("MIN_SUPPORT").map_or(Ok(0.1), |v| v.parse::<f64>())?;
    let min_confidence = env::var("MIN_CONFIDENCE").map_or(Ok(0.5), |v| v.parse::<f64>())?;
    let config = MiningConfig::new(min_support, min_confidence)?;

    let loader = DatasetLoader::new(".");
    let store = if dataset_file.extension().is_some_and(|ext| ext == "csv") {
        loader.load_transactions(&dataset_file)?
    } else {
        loader.load_baskets(&dataset_file)?
    };

    let mut stdout = io::stdout().lock();
    DatasetStatistics::compute(&store).write(&mut stdout)?;
    writeln!(stdout)?;

    let start = Instant::now();
    let result = mine(&store, &config)?;
    info!("Mining completed in {:.3} seconds", start.elapsed().as_secs_f64());

    write_rules(&mut stdout, &result, &store)?;
    writeln!(
        stdout,
        "{} frequent itemsets, {} rules",
        result.frequent_itemsets().len(),
        result.rules().len()
    )?;
    Ok(())
}
