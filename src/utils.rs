use std::path::{Path, PathBuf};

pub(crate) const FIXED_TRANSACTIONS_DIR: &str = "fixed_num_transactions";
pub(crate) const FIXED_UNIQUE_ITEMS_DIR: &str = "fixed_num_unique_items";

#[inline]
fn count_str(count: usize) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(count).to_owned()
}

/// `<dir>/fixed_num_transactions/{T}_transactions_{N}_unique_items.csv`
pub fn fixed_transactions_path(dir: &Path, transactions: usize, unique_items: usize) -> PathBuf {
    dir.join(FIXED_TRANSACTIONS_DIR).join(format!(
        "{}_transactions_{}_unique_items.csv",
        count_str(transactions),
        count_str(unique_items)
    ))
}

/// `<dir>/fixed_num_unique_items/{N}_unique_items_{T}_transactions.csv`
pub fn fixed_unique_items_path(dir: &Path, unique_items: usize, transactions: usize) -> PathBuf {
    dir.join(FIXED_UNIQUE_ITEMS_DIR).join(format!(
        "{}_unique_items_{}_transactions.csv",
        count_str(unique_items),
        count_str(transactions)
    ))
}
