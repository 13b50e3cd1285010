//! Category summary
//!
//! Totals transactions per category (or label) and folds the small ones
//! into the "Misc" bucket.

use crate::error::SankeyResult;
use crate::models::{CategorySums, Transaction};

/// Total `transactions` per grouping key
///
/// The key is the label when `prefer_labels` is set and the transaction has
/// one, otherwise the category. Keys totalling strictly less than
/// `threshold` are folded into "Misc". Fails when a total overflows.
pub fn summarize_transactions(
    transactions: &[Transaction],
    prefer_labels: bool,
    threshold: i64,
) -> SankeyResult<CategorySums> {
    let mut sums = CategorySums::new();
    for txn in transactions {
        sums.add(txn.grouping_key(prefer_labels), txn.amount())?;
    }

    let categories = sums.len();
    sums.collapse_below(threshold)?;
    log::debug!(
        "Summarized {} transactions into {} categories ({} after threshold {})",
        transactions.len(),
        categories,
        sums.len(),
        threshold
    );

    Ok(sums)
}
