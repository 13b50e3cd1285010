//! Transaction filter
//!
//! Selects the transactions that take part in one pass of a report: inside
//! the window, not from an ignored vendor, not in an ignored category or
//! label, and on the requested side of the ledger.

use std::collections::HashSet;

use crate::config::Config;
use crate::models::{DateWindow, Transaction, TransactionKind};

/// Rules for selecting transactions
#[derive(Debug, Clone)]
pub struct TransactionFilter {
    pub window: DateWindow,
    pub ignore_vendors: HashSet<String>,
    pub ignore_categories: HashSet<String>,
    pub prefer_labels: bool,
    pub kind: TransactionKind,
}

impl TransactionFilter {
    /// A filter with no exclusions that keeps debits inside `window`
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            ignore_vendors: HashSet::new(),
            ignore_categories: HashSet::new(),
            prefer_labels: false,
            kind: TransactionKind::default(),
        }
    }

    /// Build the filter described by the configuration
    pub fn from_config(config: &Config, kind: TransactionKind) -> Self {
        let rules = &config.transactions;
        Self {
            window: config.window(),
            ignore_vendors: rules.ignore_vendors.iter().cloned().collect(),
            ignore_categories: rules.ignore_categories.iter().cloned().collect(),
            prefer_labels: rules.prefer_labels,
            kind,
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_prefer_labels(mut self, prefer_labels: bool) -> Self {
        self.prefer_labels = prefer_labels;
        self
    }

    pub fn ignore_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.ignore_vendors.insert(vendor.into());
        self
    }

    pub fn ignore_category(mut self, category: impl Into<String>) -> Self {
        self.ignore_categories.insert(category.into());
        self
    }

    /// Check if a transaction passes every rule
    pub fn accepts(&self, txn: &Transaction) -> bool {
        if !self.window.contains(txn.date()) {
            return false;
        }

        if self.ignore_vendors.contains(txn.vendor()) {
            return false;
        }

        if self.prefer_labels && txn.has_label() && self.ignore_categories.contains(txn.label()) {
            return false;
        }

        if self.ignore_categories.contains(txn.category()) {
            return false;
        }

        self.kind.matches(txn.is_debit())
    }
}

/// Keep the transactions accepted by `filter`, in their original order
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let kept: Vec<Transaction> = transactions
        .iter()
        .filter(|txn| filter.accepts(txn))
        .cloned()
        .collect();

    log::debug!(
        "Kept {} of {} {} transactions in {}",
        kept.len(),
        transactions.len(),
        filter.kind,
        filter.window
    );
    kept
}
