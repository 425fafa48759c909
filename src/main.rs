use anyhow::Result;
use arm_bench::{
    BenchmarkConfig, BruteForceMiner, DatasetGenerator, DatasetLoader, Sweep, SweepKind,
    load_sweep_points,
};
use log::info;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    env_logger::init();
    let config = match std::env::var("BENCH_CONFIG") {
        Ok(path) => BenchmarkConfig::load(path)?,
        Err(_) => BenchmarkConfig::default(),
    }
    .with_env_overrides()?;

    info!("dataset_dir: {}", config.dataset_dir.display());
    info!("output_dir: {}", config.output_dir.display());

    if config.regenerate {
        let generator = DatasetGenerator::for_benchmark(&config)?;
        generator.generate_fixed_transactions(
            &config.dataset_dir,
            config.fixed_transactions_count,
            &config.unique_item_counts,
        )?;
        generator.generate_fixed_unique_items(
            &config.dataset_dir,
            config.fixed_unique_item_count,
            &config.transaction_counts,
        )?;
    }

    let loader = DatasetLoader::new(&config.dataset_dir);
    let baseline = BruteForceMiner::new();
    let sweeps = [
        (
            SweepKind::FixedTransactions,
            config.fixed_transactions_count,
            &config.unique_item_counts,
            "fixed_num_transactions.json",
        ),
        (
            SweepKind::FixedUniqueItems,
            config.fixed_unique_item_count,
            &config.transaction_counts,
            "fixed_num_unique_items.json",
        ),
    ];

    for (kind, fixed, varying, report_name) in sweeps {
        let points = load_sweep_points(&loader, kind, fixed, varying)?;
        let sweep = Sweep::new(kind, fixed, config.iterations, config.mining);
        let report = sweep.run(&points, &baseline, &[])?;

        println!("\n{}", report.title);
        for point in &report.points {
            for timing in &point.timings {
                let mean = timing.mean.map_or("n/a".to_string(), |m| format!("{m:.6}"));
                let origin = if timing.estimated { "estimated" } else { "measured" };
                println!(
                    "{} = {:>4}  {:<12} {mean} sec ({origin})",
                    report.x_label,
                    kind.x_value(point.workload),
                    timing.algorithm
                );
            }
        }
        report.save(&config.output_dir.join(report_name))?;
    }

    Ok(())
}
