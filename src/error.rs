//! Error types shared by the mining engine, the loaders and the timing harness.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiningError>;

/// Violated precondition of a mining run or a harness call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// Support would be a division by zero.
    #[error("dataset contains no transactions")]
    EmptyDataset,

    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("requested {requested} unique items but only {available} are available")]
    NotEnoughItems { requested: usize, available: usize },

    #[error("{name} must be greater than zero")]
    ZeroCount { name: &'static str },
}

#[derive(Debug, Error)]
pub enum MiningError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {key}: {message}")]
    Config { key: String, message: String },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl MiningError {
    /// The violated precondition, if this is an input error.
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            MiningError::InvalidInput(reason) => Some(reason),
            _ => None,
        }
    }
}
