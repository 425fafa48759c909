use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{MiningError, Result};
use crate::transactions::TransactionStore;
use ahash::AHashSet;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;

const ITEMS_COLUMN: &str = "Items";

pub struct DatasetLoader {
    dataset_path: PathBuf,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self {
            dataset_path: Path::new("./datasets").to_path_buf(),
        }
    }
}

impl DatasetLoader {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dataset_path.join(file)
        }
    }
}

/// Raw grocery purchases grouped into baskets.
#[derive(Debug, Clone, Default)]
pub struct GroceryRecords {
    pub transactions: Vec<Vec<String>>,
    /// Distinct item descriptions in first-seen row order.
    pub unique_items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GroceryRow {
    #[serde(rename = "Member_number")]
    member_number: u64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "itemDescription")]
    item_description: String,
}

impl DatasetLoader {
    /// Reads a CSV whose `Items` column holds list literals such as
    /// `['whole milk', 'yogurt']`.
    pub fn read_item_lists(&self, file: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
        let path = self.resolve(file.as_ref());
        let mut reader = csv::Reader::from_path(&path)?;
        let column = reader
            .headers()?
            .iter()
            .position(|h| h == ITEMS_COLUMN)
            .ok_or_else(|| MiningError::Parse {
                path: path.clone(),
                line: 1,
                message: format!("missing `{ITEMS_COLUMN}` column"),
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let cell = record.get(column).ok_or_else(|| MiningError::Parse {
                path: path.clone(),
                line,
                message: "row is shorter than the header".to_string(),
            })?;
            let labels = parse_item_list(cell);
            if labels.is_empty() {
                debug!("{}:{line}: empty transaction", path.display());
            }
            rows.push(labels);
        }
        info!("Loaded {} transactions from {}", rows.len(), path.display());
        Ok(rows)
    }

    pub fn load_transactions(&self, file: impl AsRef<Path>) -> Result<TransactionStore> {
        TransactionStore::from_labels(self.read_item_lists(file)?)
    }

    /// One transaction per line, labels separated by commas. A blank line is
    /// an empty transaction.
    pub fn load_baskets(&self, file: impl AsRef<Path>) -> Result<TransactionStore> {
        let path = self.resolve(file.as_ref());
        let content = fs::read_to_string(&path)?;
        let rows: Vec<Vec<&str>> = content
            .lines()
            .enumerate()
            .map(|(i, line)| {
                let labels: Vec<_> = line
                    .split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .collect();
                if labels.is_empty() {
                    debug!("{}:{}: empty transaction", path.display(), i + 1);
                }
                labels
            })
            .collect();
        TransactionStore::from_labels(rows)
    }

    /// Groups `Member_number,Date,itemDescription` rows into one basket per
    /// (member, date), ordered by member number then date.
    pub fn load_grocery_records(&self, file: impl AsRef<Path>) -> Result<GroceryRecords> {
        let path = self.resolve(file.as_ref());
        let mut reader = csv::Reader::from_path(&path)?;
        let mut baskets: BTreeMap<(u64, String), Vec<String>> = BTreeMap::new();
        let mut seen = AHashSet::new();
        let mut unique_items = Vec::new();
        let mut rows = 0usize;

        for row in reader.deserialize() {
            let row: GroceryRow = row?;
            rows += 1;
            if seen.insert(row.item_description.clone()) {
                unique_items.push(row.item_description.clone());
            }
            baskets
                .entry((row.member_number, row.date))
                .or_default()
                .push(row.item_description);
        }

        info!(
            "Read {rows} grocery rows from {}: {} transactions, {} unique items",
            path.display(),
            baskets.len(),
            unique_items.len()
        );
        Ok(GroceryRecords {
            transactions: baskets.into_values().collect(),
            unique_items,
        })
    }
}

/// Extracts the quoted labels of a list literal. Both quote styles are
/// accepted; `\'`, `\"` and `\\` are unescaped.
pub fn parse_item_list(cell: &str) -> Vec<String> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).unwrap()
    });
    RE.captures_iter(cell)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| unescape(m.as_str()))
        .collect()
}

/// Inverse of [`parse_item_list`].
pub fn format_item_list<S: AsRef<str>>(labels: &[S]) -> String {
    let quoted: Vec<String> = labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            if label.contains('\'') && !label.contains('"') {
                format!("\"{}\"", label.replace('\\', "\\\\"))
            } else {
                format!("'{}'", label.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
