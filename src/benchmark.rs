//! Timing harness comparing mining algorithms over dataset sweeps.
//!
//! The brute-force baseline is only executed on the first (smallest) workload
//! of a sweep. Later workloads get an extrapolated time from the law
//! `time = c · 2^N · T`, with `c` calibrated on the measured sample of the
//! same iteration. Every other miner is measured at every workload.

use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use crate::dataloader::DatasetLoader;
use crate::error::{InvalidInput, MiningError, Result};
use crate::miner::ItemsetMiner;
use crate::structs::MiningConfig;
use crate::transactions::TransactionStore;
use crate::utils::{fixed_transactions_path, fixed_unique_items_path};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Size of a dataset as seen by the complexity law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub transactions: usize,
    pub unique_items: usize,
}

impl Workload {
    pub fn new(transactions: usize, unique_items: usize) -> Self {
        Self {
            transactions,
            unique_items,
        }
    }
}

/// `c = measured / (2^N_s · T_s)`, returns `c · 2^N_t · T_t`.
pub fn estimate_brute_force_time(
    measured_secs: f64,
    source: Workload,
    target: Workload,
) -> Result<f64> {
    if source.transactions == 0 {
        return Err(InvalidInput::ZeroCount {
            name: "source transactions",
        }
        .into());
    }
    let c = measured_secs / (2f64.powf(source.unique_items as f64) * source.transactions as f64);
    Ok(c * 2f64.powf(target.unique_items as f64) * target.transactions as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepKind {
    /// T fixed, N varies.
    FixedTransactions,
    /// N fixed, T varies.
    FixedUniqueItems,
}

impl SweepKind {
    pub fn x_label(self) -> &'static str {
        match self {
            SweepKind::FixedTransactions => "Number of unique items",
            SweepKind::FixedUniqueItems => "Number of transactions",
        }
    }

    pub fn x_value(self, workload: Workload) -> usize {
        match self {
            SweepKind::FixedTransactions => workload.unique_items,
            SweepKind::FixedUniqueItems => workload.transactions,
        }
    }

    pub fn workload(self, fixed: usize, varying: usize) -> Workload {
        match self {
            SweepKind::FixedTransactions => Workload::new(fixed, varying),
            SweepKind::FixedUniqueItems => Workload::new(varying, fixed),
        }
    }

    pub fn title(self, fixed: usize) -> String {
        match self {
            SweepKind::FixedTransactions => format!("Fixed number of {fixed} transactions"),
            SweepKind::FixedUniqueItems => format!("Fixed number of {fixed} unique items"),
        }
    }

    fn dataset_path(self, dir: &Path, workload: Workload) -> std::path::PathBuf {
        match self {
            SweepKind::FixedTransactions => {
                fixed_transactions_path(dir, workload.transactions, workload.unique_items)
            }
            SweepKind::FixedUniqueItems => {
                fixed_unique_items_path(dir, workload.unique_items, workload.transactions)
            }
        }
    }
}

/// A loaded dataset at one point of a sweep.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub workload: Workload,
    pub store: TransactionStore,
}

/// Loads the generated dataset of every sweep point, in the given order.
pub fn load_sweep_points(
    loader: &DatasetLoader,
    kind: SweepKind,
    fixed: usize,
    varying: &[usize],
) -> Result<Vec<SweepPoint>> {
    varying
        .iter()
        .map(|&value| {
            let workload = kind.workload(fixed, value);
            let path = kind.dataset_path(loader.dataset_path(), workload);
            let store = loader.load_transactions(&path)?;
            Ok(SweepPoint { workload, store })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmTiming {
    pub algorithm: String,
    pub samples: Vec<f64>,
    pub mean: Option<f64>,
    /// Samples were extrapolated rather than measured.
    pub estimated: bool,
}

impl AlgorithmTiming {
    fn new(algorithm: &str, samples: Vec<f64>, estimated: bool) -> Self {
        let mean = (!samples.is_empty())
            .then(|| samples.iter().sum::<f64>() / samples.len() as f64);
        Self {
            algorithm: algorithm.to_string(),
            samples,
            mean,
            estimated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    pub workload: Workload,
    pub timings: Vec<AlgorithmTiming>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub title: String,
    pub kind: SweepKind,
    pub x_label: String,
    pub points: Vec<PointReport>,
}

impl SweepReport {
    pub fn timing(&self, point: usize, algorithm: &str) -> Option<&AlgorithmTiming> {
        self.points
            .get(point)?
            .timings
            .iter()
            .find(|t| t.algorithm == algorithm)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        info!("Sweep report saved to {}", path.display());
        Ok(())
    }
}

/// Wall-clock seconds of one mining run; the mined collections are dropped
/// after the clock stops.
pub fn time_run(
    miner: &dyn ItemsetMiner,
    store: &TransactionStore,
    config: &MiningConfig,
) -> Result<f64> {
    let start = Instant::now();
    let result = miner.mine(store, config)?;
    let elapsed = start.elapsed().as_secs_f64();
    drop(result);
    Ok(elapsed)
}

pub struct Sweep {
    kind: SweepKind,
    fixed: usize,
    iterations: usize,
    config: MiningConfig,
}

impl Sweep {
    pub fn new(kind: SweepKind, fixed: usize, iterations: usize, config: MiningConfig) -> Self {
        Self {
            kind,
            fixed,
            iterations,
            config,
        }
    }

    /// Runs every iteration at every point. `baseline` is measured at the
    /// first point and extrapolated elsewhere; `comparisons` are measured
    /// everywhere.
    pub fn run(
        &self,
        points: &[SweepPoint],
        baseline: &dyn ItemsetMiner,
        comparisons: &[&dyn ItemsetMiner],
    ) -> Result<SweepReport> {
        self.config.validate()?;
        if self.iterations == 0 {
            return Err(InvalidInput::ZeroCount { name: "iterations" }.into());
        }

        let progress = ProgressBar::new((points.len() * self.iterations) as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{wide_bar}] {pos}/{len} ({eta})")
                .map_err(|e| MiningError::Config {
                    key: "progress template".to_string(),
                    message: e.to_string(),
                })?,
        );

        let mut reports: Vec<PointReport> = Vec::with_capacity(points.len());
        // per-iteration baseline samples at the first point
        let mut calibration: Vec<Option<f64>> = Vec::new();

        for (index, point) in points.iter().enumerate() {
            let mut baseline_samples = Vec::with_capacity(self.iterations);
            let mut comparison_samples =
                vec![Vec::with_capacity(self.iterations); comparisons.len()];

            for i in 0..self.iterations {
                if index == 0 {
                    let sample = self.measure(baseline, point);
                    calibration.push(sample);
                    baseline_samples.extend(sample);
                } else if let Some(measured) = calibration[i] {
                    baseline_samples.push(estimate_brute_force_time(
                        measured,
                        points[0].workload,
                        point.workload,
                    )?);
                } else {
                    warn!(
                        "No calibration sample for iteration {i}, skipping estimate at {:?}",
                        point.workload
                    );
                }

                for (miner, samples) in comparisons.iter().zip(comparison_samples.iter_mut()) {
                    samples.extend(self.measure(*miner, point));
                }
                progress.inc(1);
            }

            let mut timings = vec![AlgorithmTiming::new(
                baseline.name(),
                baseline_samples,
                index > 0,
            )];
            timings.extend(
                comparisons
                    .iter()
                    .zip(comparison_samples)
                    .map(|(miner, samples)| AlgorithmTiming::new(miner.name(), samples, false)),
            );
            for timing in &timings {
                self.log_average(timing, point.workload);
            }
            info!("{}", "*".repeat(20));
            reports.push(PointReport {
                workload: point.workload,
                timings,
            });
        }
        progress.finish_and_clear();

        Ok(SweepReport {
            title: self.kind.title(self.fixed),
            kind: self.kind,
            x_label: self.kind.x_label().to_string(),
            points: reports,
        })
    }

    /// A failed run is logged and yields no sample.
    fn measure(&self, miner: &dyn ItemsetMiner, point: &SweepPoint) -> Option<f64> {
        match time_run(miner, &point.store, &self.config) {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!(
                    "Skipping {} sample at {:?}: {e}",
                    miner.name(),
                    point.workload
                );
                None
            }
        }
    }

    fn log_average(&self, timing: &AlgorithmTiming, workload: Workload) {
        match timing.mean {
            Some(avg) => info!(
                "average execution time for {}: {avg} sec (T= {} N= {})",
                timing.algorithm, workload.transactions, workload.unique_items
            ),
            None => warn!(
                "no samples for {} (T= {} N= {})",
                timing.algorithm, workload.transactions, workload.unique_items
            ),
        }
    }
}
