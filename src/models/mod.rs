//! Core data models for sankey-gen
//!
//! This module contains the values that flow through the report pipeline:
//! ledger transactions, the reporting window, per-category sums and the
//! flow lines written to the diagram file.

pub mod category_sums;
pub mod flow;
pub mod transaction;
pub mod window;

pub use category_sums::{CategorySums, MISC};
pub use flow::{percent_of, FlowLine, FROM_SAVINGS, TOTAL_INCOME, TO_SAVINGS};
pub use transaction::{SourcedTransaction, Transaction, TransactionKind};
pub use window::DateWindow;
