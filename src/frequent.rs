use crate::enumerator::ItemsetEnumerator;
use crate::structs::FrequentItemset;
use crate::support::SupportCalculator;
use log::debug;

/// Scores every enumerated candidate and keeps those with
/// `support >= min_support`, in enumeration order.
///
/// No pruning: each of the `2^N - N - 1` candidates costs one full scan.
pub fn collect_frequent_itemsets(
    enumerator: &ItemsetEnumerator<'_>,
    calculator: &SupportCalculator<'_>,
    min_support: f64,
) -> Vec<FrequentItemset> {
    let mut candidates = 0usize;
    let frequent: Vec<_> = enumerator
        .iter()
        .inspect(|_| candidates += 1)
        .filter_map(|itemset| {
            let support = calculator.support(&itemset);
            (support >= min_support).then_some(FrequentItemset { itemset, support })
        })
        .collect();
    debug!(
        "Scored {candidates} candidates, {} frequent at min_support={min_support}",
        frequent.len()
    );
    frequent
}
