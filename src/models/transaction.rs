//! Transaction model
//!
//! Represents one ledger entry as exported by a budgeting tool: a dated,
//! categorized debit or credit against a vendor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the ledger a filter keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account
    #[default]
    Debit,
    /// Money entering the account
    Credit,
    /// Both sides
    Both,
}

impl TransactionKind {
    /// Check if a transaction with the given debit flag is of this kind
    pub fn matches(&self, is_debit: bool) -> bool {
        match self {
            Self::Debit => is_debit,
            Self::Credit => !is_debit,
            Self::Both => true,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// A single ledger transaction
///
/// Fields are private: once built a transaction is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    vendor: String,
    amount: i64,
    is_debit: bool,
    category: String,
    label: String,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// `amount` is in whole currency units; a negative value is clamped to
    /// zero since ledger amounts are unsigned and direction lives in
    /// `is_debit`.
    pub fn new(
        date: NaiveDate,
        vendor: impl Into<String>,
        amount: i64,
        is_debit: bool,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            vendor: vendor.into(),
            amount: amount.max(0),
            is_debit,
            category: category.into(),
            label: String::new(),
        }
    }

    /// Attach a user label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Transaction date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Vendor name
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Amount in whole currency units
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Check if this is a debit
    pub fn is_debit(&self) -> bool {
        self.is_debit
    }

    /// Ledger category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// User label, empty when unset
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if a label is set
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }

    /// Name this transaction is grouped under
    ///
    /// The label wins over the category when `prefer_labels` is set and a
    /// label exists.
    pub fn grouping_key(&self, prefer_labels: bool) -> &str {
        if prefer_labels && self.has_label() {
            &self.label
        } else {
            &self.category
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Transaction {} {}>", self.vendor, self.amount)
    }
}

/// A transaction paired with the transaction it was funded from
///
/// Only used to render single diagnostic flow strings. The source is a
/// plain borrow, so chains can never become cyclic.
#[derive(Debug, Clone, Copy)]
pub struct SourcedTransaction<'a> {
    transaction: &'a Transaction,
    source: Option<&'a Transaction>,
}

impl<'a> SourcedTransaction<'a> {
    /// A transaction without a known source
    pub fn new(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            source: None,
        }
    }

    /// A transaction funded from `source`
    pub fn with_source(transaction: &'a Transaction, source: &'a Transaction) -> Self {
        Self {
            transaction,
            source: Some(source),
        }
    }

    /// Render as `{source category} [{amount}] {category}`
    pub fn flow_string(&self) -> String {
        let source = self.source.map(Transaction::category).unwrap_or("NULL");
        format!(
            "{} [{}] {}",
            source,
            self.transaction.amount(),
            self.transaction.category()
        )
    }
}
