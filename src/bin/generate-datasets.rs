use anyhow::Result;
use arm_bench::{BenchmarkConfig, DatasetGenerator};
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    let config = match std::env::var("BENCH_CONFIG") {
        Ok(path) => BenchmarkConfig::load(path)?,
        Err(_) => BenchmarkConfig::default(),
    }
    .with_env_overrides()?;

    info!("dataset_dir: {}", config.dataset_dir.display());
    let generator = DatasetGenerator::for_benchmark(&config)?;

    // fixed number of transactions, varying number of unique items
    let paths = generator.generate_fixed_transactions(
        &config.dataset_dir,
        config.fixed_transactions_count,
        &config.unique_item_counts,
    )?;
    for path in paths {
        println!("{}", path.display());
    }

    // fixed number of unique items, varying number of transactions
    let paths = generator.generate_fixed_unique_items(
        &config.dataset_dir,
        config.fixed_unique_item_count,
        &config.transaction_counts,
    )?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}
